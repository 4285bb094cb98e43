use std::future::Future;

/// A delete that has been requested but not yet confirmed.
#[derive(Clone, Debug, Default)]
pub struct DeleteTracker<Id> {
    pending: Option<Id>,
}

impl<Id: Copy> DeleteTracker<Id> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn open(&mut self, id: Id) {
        self.pending = Some(id);
    }

    pub fn close(&mut self) {
        self.pending = None;
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<Id> {
        self.pending
    }

    /// Runs `on_delete` for the pending target and closes the tracker once it finishes,
    /// whether it succeeded or not. Returns `None` without calling `on_delete` if nothing is
    /// pending.
    pub async fn confirm<F, Fut, R>(&mut self, on_delete: F) -> Option<R>
    where
        F: FnOnce(Id) -> Fut,
        Fut: Future<Output = R>,
    {
        let id = self.pending?;
        let outcome = on_delete(id).await;
        self.close();

        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_and_close() {
        let mut tracker = DeleteTracker::new();
        assert!(!tracker.is_open());

        tracker.open(12i64);
        assert!(tracker.is_open());
        assert_eq!(tracker.pending(), Some(12));

        tracker.open(13);
        assert_eq!(tracker.pending(), Some(13));

        tracker.close();
        assert!(!tracker.is_open());
        assert_eq!(tracker.pending(), None);
    }

    #[test]
    fn close_with_nothing_open_is_a_no_op() {
        let mut tracker = DeleteTracker::<i64>::new();

        tracker.close();
        assert!(!tracker.is_open());
        assert_eq!(tracker.pending(), None);

        tracker.open(4);
        tracker.close();
        tracker.close();
        assert!(!tracker.is_open());
        assert_eq!(tracker.pending(), None);
    }

    #[tokio::test]
    async fn confirm_runs_delete_for_pending_target_then_closes() {
        let mut tracker = DeleteTracker::new();
        tracker.open(5i64);

        let outcome = tracker
            .confirm(|id| async move { Ok::<i64, String>(id * 10) })
            .await;

        assert_eq!(outcome, Some(Ok(50)));
        assert!(!tracker.is_open());
    }

    #[tokio::test]
    async fn confirm_closes_even_when_delete_fails() {
        let mut tracker = DeleteTracker::new();
        tracker.open(5i64);

        let outcome = tracker
            .confirm(|_| async { Err::<(), &str>("store unavailable") })
            .await;

        assert_eq!(outcome, Some(Err("store unavailable")));
        assert_eq!(tracker.pending(), None);
    }

    #[tokio::test]
    async fn confirm_without_pending_target_does_nothing() {
        let mut tracker = DeleteTracker::<i64>::new();
        let mut called = false;

        let outcome = tracker
            .confirm(|_| {
                called = true;
                async {}
            })
            .await;

        assert_eq!(outcome, None);
        assert!(!called);
    }
}
