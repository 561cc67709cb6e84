//! Template selection for the scatter brush.

use std::sync::Arc;

use tracing::debug;

use super::sampling::PropTemplate;

/// Ordered templates with a parallel inclusion mask.
///
/// The mask only changes through explicit toggles. The active pool handed to
/// sample generation is the selected templates in library order.
#[derive(Clone, Debug, Default)]
pub struct SelectionSet {
    templates: Vec<Arc<PropTemplate>>,
    selected: Vec<bool>,
}

impl SelectionSet {
    /// New set with nothing selected.
    pub fn new(templates: impl IntoIterator<Item = PropTemplate>) -> Self {
        Self::from_shared(templates.into_iter().map(Arc::new).collect())
    }

    pub fn from_shared(templates: Vec<Arc<PropTemplate>>) -> Self {
        let selected = vec![false; templates.len()];
        Self {
            templates,
            selected,
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn templates(&self) -> &[Arc<PropTemplate>] {
        &self.templates
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    /// Flip one entry. Returns the new state, or `None` for an out-of-range index.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let state = self.selected.get_mut(index)?;
        *state = !*state;
        debug!(index, selected = *state, "Template selection toggled");
        Some(*state)
    }

    /// Set one entry. Returns false for an out-of-range index.
    pub fn set_selected(&mut self, index: usize, selected: bool) -> bool {
        match self.selected.get_mut(index) {
            Some(state) => {
                *state = selected;
                true
            }
            None => false,
        }
    }

    pub fn select_all(&mut self) {
        self.selected.fill(true);
    }

    pub fn clear_selection(&mut self) {
        self.selected.fill(false);
    }

    /// Replace the template list (e.g. after the host rescans its library).
    ///
    /// The mask is kept when the length is unchanged and reset otherwise.
    pub fn replace_templates(&mut self, templates: Vec<Arc<PropTemplate>>) {
        if templates.len() != self.selected.len() {
            self.selected = vec![false; templates.len()];
        }
        self.templates = templates;
    }

    /// Selected templates, in order.
    pub fn active_pool(&self) -> Vec<Arc<PropTemplate>> {
        self.templates
            .iter()
            .zip(&self.selected)
            .filter(|(_, selected)| **selected)
            .map(|(template, _)| Arc::clone(template))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> SelectionSet {
        SelectionSet::new([
            PropTemplate::new("rock"),
            PropTemplate::new("bush"),
            PropTemplate::new("crate").with_clearance(1.0),
        ])
    }

    #[test]
    fn test_starts_unselected() {
        let set = library();
        assert_eq!(set.len(), 3);
        assert!(set.active_pool().is_empty());
    }

    #[test]
    fn test_toggle_builds_pool_in_order() {
        let mut set = library();
        assert_eq!(set.toggle(2), Some(true));
        assert_eq!(set.toggle(0), Some(true));

        let names: Vec<_> = set.active_pool().iter().map(|t| t.name.clone()).collect();
        assert_eq!(names, vec!["rock", "crate"]);

        assert_eq!(set.toggle(0), Some(false));
        assert_eq!(set.active_pool().len(), 1);
    }

    #[test]
    fn test_out_of_range() {
        let mut set = library();
        assert_eq!(set.toggle(9), None);
        assert!(!set.set_selected(9, true));
        assert!(!set.is_selected(9));
    }

    #[test]
    fn test_select_all_and_clear() {
        let mut set = library();
        set.select_all();
        assert_eq!(set.active_pool().len(), 3);
        set.clear_selection();
        assert!(set.active_pool().is_empty());
    }

    #[test]
    fn test_replace_templates_resets_mask_on_length_change() {
        let mut set = library();
        set.select_all();

        let same_len = set.templates().to_vec();
        set.replace_templates(same_len);
        assert_eq!(set.active_pool().len(), 3);

        set.replace_templates(vec![Arc::new(PropTemplate::new("tree"))]);
        assert_eq!(set.len(), 1);
        assert!(!set.is_selected(0));
    }
}
