//! Prop Cannon - headless front end for the level-design tools
//!
//! Runs the scatter brush, grid snapper and preference loading outside an
//! editor, against a small analytic demo scene.
//!
//! Run with: `cargo run --bin prop-cannon -- scatter --x 1 --z -2 --seed 7`
//!
//! Subcommands:
//! - scatter: Scatter one brush stroke and print the candidates as JSON
//! - snap: Snap a point with the configured grid
//! - prefs: Print the effective preferences (optionally writing them back)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use glam::{Quat, Vec3};
use serde::Serialize;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use prop_cannon_engine::config::{ToolPrefs, default_prefs_path};
use prop_cannon_engine::physics::{Collider, SceneColliders, SurfaceQuery};
use prop_cannon_engine::scatter::{
    PlacementCandidate, PropTemplate, ScatterConfig, ScatterPlanner, TangentFrame,
};
use prop_cannon_engine::world::GridKind;

/// Height the brush ray is cast down from.
const BRUSH_RAY_HEIGHT: f32 = 50.0;

#[derive(Parser, Debug)]
#[command(name = "prop-cannon")]
#[command(about = "Prop scatter and grid snapping tools for level design")]
#[command(version)]
struct Args {
    /// Path to the preferences file
    #[arg(short, long, default_value_os_t = default_prefs_path())]
    prefs: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scatter one brush stroke over the demo scene
    Scatter {
        /// Brush center X
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        x: f32,
        /// Brush center Z
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        z: f32,
        /// Override the brush radius
        #[arg(long)]
        radius: Option<f32>,
        /// Override the sample count
        #[arg(long)]
        count: Option<usize>,
        /// Fixed RNG seed
        #[arg(long)]
        seed: Option<u64>,
        /// Template as `name` or `name:clearance_height` (repeatable)
        #[arg(short, long = "template")]
        templates: Vec<String>,
        /// Print rejected candidates too
        #[arg(long)]
        all: bool,
    },
    /// Snap a point with the configured grid
    Snap {
        #[arg(allow_hyphen_values = true)]
        x: f32,
        #[arg(allow_hyphen_values = true)]
        y: f32,
        #[arg(allow_hyphen_values = true)]
        z: f32,
        /// Force polar snapping
        #[arg(long)]
        polar: bool,
        /// Override the grid size
        #[arg(long)]
        size: Option<f32>,
    },
    /// Print the effective preferences
    Prefs {
        /// Write the sanitized preferences back to the file
        #[arg(long)]
        save: bool,
    },
}

/// Candidate as printed by `scatter`.
#[derive(Serialize)]
struct CandidateOutput {
    template: Option<String>,
    position: Vec3,
    rotation: Quat,
    normal: Vec3,
    valid: bool,
}

impl From<&PlacementCandidate> for CandidateOutput {
    fn from(candidate: &PlacementCandidate) -> Self {
        Self {
            template: candidate.template.as_ref().map(|t| t.name.clone()),
            position: candidate.position,
            rotation: candidate.rotation,
            normal: candidate.normal,
            valid: candidate.valid,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Prop Cannon v{}", env!("CARGO_PKG_VERSION"));

    let prefs = ToolPrefs::load(&args.prefs)
        .with_context(|| format!("loading preferences from {}", args.prefs.display()))?;

    match args.command {
        Command::Scatter {
            x,
            z,
            radius,
            count,
            seed,
            templates,
            all,
        } => {
            let mut config = prefs.scatter.clone();
            if let Some(radius) = radius {
                config.radius = radius;
            }
            if let Some(count) = count {
                config.spawn_count = count;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            let pool = templates
                .iter()
                .map(|arg| parse_template(arg).map(Arc::new))
                .collect::<Result<Vec<_>>>()?;
            run_scatter(config, pool, x, z, all)?;
        }
        Command::Snap {
            x,
            y,
            z,
            polar,
            size,
        } => {
            let mut snapper = prefs.snapper;
            if polar {
                snapper.kind = GridKind::Polar;
            }
            if let Some(size) = size {
                snapper.grid_size = size;
            }
            let snapped = snapper.snap(Vec3::new(x, y, z));
            println!("{} {} {}", snapped.x, snapped.y, snapped.z);
        }
        Command::Prefs { save } => {
            println!("{}", serde_json::to_string_pretty(&prefs)?);
            if save {
                prefs
                    .save(&args.prefs)
                    .with_context(|| format!("saving preferences to {}", args.prefs.display()))?;
            }
        }
    }

    Ok(())
}

fn run_scatter(
    config: ScatterConfig,
    pool: Vec<Arc<PropTemplate>>,
    x: f32,
    z: f32,
    all: bool,
) -> Result<()> {
    let scene = demo_scene();

    let origin = Vec3::new(x, BRUSH_RAY_HEIGHT, z);
    let Some(hit) = scene.cast(origin, Vec3::NEG_Y) else {
        bail!("brush ray at ({x}, {z}) hit nothing");
    };
    let frame = TangentFrame::from_hit(&hit, Vec3::Z);

    let mut planner = ScatterPlanner::new(config);
    planner.set_pool(pool);

    let candidates = if all {
        planner.preview(&frame, &scene, &scene)
    } else {
        planner.commit(&frame, &scene, &scene)
    };
    if candidates.is_empty() {
        warn!("No candidates resolved");
    }

    let output: Vec<CandidateOutput> = candidates.iter().map(CandidateOutput::from).collect();
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Parse `name` or `name:clearance_height`.
fn parse_template(arg: &str) -> Result<PropTemplate> {
    match arg.split_once(':') {
        Some((name, height)) => {
            let height: f32 = height
                .parse()
                .with_context(|| format!("invalid clearance height in template '{arg}'"))?;
            Ok(PropTemplate::new(name).with_clearance(height))
        }
        None => Ok(PropTemplate::new(arg)),
    }
}

/// Ground plane with a crate stack, a low wall and a boulder.
fn demo_scene() -> SceneColliders {
    SceneColliders::new()
        .with(Collider::ground(0.0))
        .with(Collider::cuboid(Vec3::new(3.0, 0.5, 0.0), Vec3::new(0.5, 0.5, 0.5)))
        .with(Collider::cuboid(Vec3::new(3.0, 1.5, 0.0), Vec3::new(0.5, 0.5, 0.5)))
        .with(Collider::cuboid(Vec3::new(-4.0, 0.75, 2.0), Vec3::new(0.25, 0.75, 3.0)))
        .with(Collider::Sphere {
            center: Vec3::new(0.0, 0.0, -5.0),
            radius: 1.5,
        })
        .with(Collider::Aabb {
            min: Vec3::new(-1.0, 3.0, 4.0),
            max: Vec3::new(1.0, 3.5, 6.0),
        })
}
