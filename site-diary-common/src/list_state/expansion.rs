use std::collections::HashSet;
use std::hash::Hash;

#[derive(Clone, Debug, Default)]
pub struct ExpansionTracker<Id> {
    expanded: HashSet<Id>,
}

impl<Id: Copy + Eq + Hash> ExpansionTracker<Id> {
    pub fn new() -> Self {
        Self {
            expanded: HashSet::new(),
        }
    }

    /// Expands a collapsed row, collapses an expanded one.
    pub fn toggle(&mut self, id: Id) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn collapse(&mut self, id: Id) {
        self.expanded.remove(&id);
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn is_expanded(&self, id: Id) -> bool {
        self.expanded.contains(&id)
    }

    pub fn expanded_ids(&self) -> &HashSet<Id> {
        &self.expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_original_state() {
        let mut tracker = ExpansionTracker::new();

        tracker.toggle(4i64);
        assert!(tracker.is_expanded(4));

        tracker.toggle(4);
        assert!(!tracker.is_expanded(4));
        assert!(tracker.expanded_ids().is_empty());
    }

    #[test]
    fn rows_expand_independently() {
        let mut tracker = ExpansionTracker::new();
        tracker.toggle(1i64);
        tracker.toggle(2);
        tracker.toggle(3);
        tracker.toggle(2);

        assert!(tracker.is_expanded(1));
        assert!(!tracker.is_expanded(2));
        assert!(tracker.is_expanded(3));
        assert_eq!(tracker.expanded_ids().len(), 2);
    }

    #[test]
    fn collapse_is_unconditional() {
        let mut tracker = ExpansionTracker::new();
        tracker.toggle(1i64);

        tracker.collapse(1);
        tracker.collapse(1);
        tracker.collapse(8);

        assert!(!tracker.is_expanded(1));
        assert!(!tracker.is_expanded(8));
    }

    #[test]
    fn collapse_all_clears_everything() {
        let mut tracker = ExpansionTracker::new();
        for id in 0..5i64 {
            tracker.toggle(id);
        }

        tracker.collapse_all();

        assert!(tracker.expanded_ids().is_empty());
    }
}
