#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditState<Id> {
    #[default]
    Idle,
    Editing(Id),
    Adding,
}

/// At most one row of a list is open for editing, or the "new row" form is open, never both.
#[derive(Clone, Debug, Default)]
pub struct EditTracker<Id> {
    state: EditState<Id>,
}

impl<Id: Copy + PartialEq> EditTracker<Id> {
    pub fn new() -> Self {
        Self {
            state: EditState::Idle,
        }
    }

    pub fn state(&self) -> EditState<Id> {
        self.state
    }

    pub fn start_add(&mut self) {
        self.state = EditState::Adding;
    }

    pub fn start_edit(&mut self, id: Id) {
        self.state = EditState::Editing(id);
    }

    pub fn cancel(&mut self) {
        self.state = EditState::Idle;
    }

    pub fn is_adding(&self) -> bool {
        matches!(self.state, EditState::Adding)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, EditState::Idle)
    }

    pub fn editing_id(&self) -> Option<Id> {
        match self.state {
            EditState::Editing(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_editing(&self, id: Id) -> bool {
        self.editing_id() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let tracker = EditTracker::<i64>::new();

        assert!(tracker.is_idle());
        assert!(!tracker.is_adding());
        assert_eq!(tracker.editing_id(), None);
    }

    #[test]
    fn start_add_clears_edit_target() {
        let mut tracker = EditTracker::new();
        tracker.start_edit(7);
        tracker.start_add();

        assert!(tracker.is_adding());
        assert_eq!(tracker.editing_id(), None);
        assert_eq!(tracker.state(), EditState::Adding);
    }

    #[test]
    fn start_edit_clears_adding() {
        let mut tracker = EditTracker::new();
        tracker.start_add();
        tracker.start_edit(3);

        assert!(!tracker.is_adding());
        assert_eq!(tracker.editing_id(), Some(3));
        assert!(tracker.is_editing(3));
        assert!(!tracker.is_editing(4));
    }

    #[test]
    fn editing_another_row_replaces_the_target() {
        let mut tracker = EditTracker::new();
        tracker.start_edit(1);
        tracker.start_edit(2);

        assert_eq!(tracker.editing_id(), Some(2));
    }

    #[test]
    fn cancel_returns_to_idle_from_any_state() {
        let mut tracker = EditTracker::new();

        tracker.start_add();
        tracker.cancel();
        assert!(tracker.is_idle());

        tracker.start_edit(9);
        tracker.cancel();
        assert!(tracker.is_idle());

        tracker.cancel();
        assert!(tracker.is_idle());
    }
}
