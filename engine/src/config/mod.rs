//! Config Module
//!
//! Persisted tool preferences.

pub mod tool_prefs;

pub use tool_prefs::{ConfigError, ToolPrefs, default_prefs_path};
