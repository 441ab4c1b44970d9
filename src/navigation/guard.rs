//! Unsaved-changes navigation guard.
//!
//! The guard never navigates by itself. It only decides whether a navigation
//! may proceed now, and otherwise remembers it until the user confirms or
//! cancels. `A` is the deferred action run instead of a plain route change.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GuardState {
    Unblocked,
    BlockedIdle,
    BlockedPendingConfirmation,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PendingNavigation<A> {
    pub location: String,
    pub action: Option<A>,
}

/// What confirming a held navigation does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Release<A> {
    /// The caller's deferred action takes over.
    Run(A),
    /// Plain route change to the recorded location.
    Navigate(String),
}

impl<A> PendingNavigation<A> {
    pub fn release(self) -> Release<A> {
        match self.action {
            Some(action) => Release::Run(action),
            None => Release::Navigate(self.location),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum NavigationDecision {
    /// Nothing is blocking; the caller navigates right away.
    Proceed,
    /// Held until the user answers the confirmation dialog.
    Held,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NavigationGuard<A> {
    has_unsaved_changes: bool,
    pending: Option<PendingNavigation<A>>,
}

impl<A> Default for NavigationGuard<A> {
    fn default() -> Self {
        Self {
            has_unsaved_changes: false,
            pending: None,
        }
    }
}

impl<A> NavigationGuard<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GuardState {
        match (self.has_unsaved_changes, self.pending.is_some()) {
            (false, _) => GuardState::Unblocked,
            (true, false) => GuardState::BlockedIdle,
            (true, true) => GuardState::BlockedPendingConfirmation,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.has_unsaved_changes
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_location(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.location.as_str())
    }

    /// Clearing the flag drops any pending navigation too.
    pub fn set_has_unsaved_changes(&mut self, value: bool) {
        self.has_unsaved_changes = value;
        if !value {
            self.pending = None;
        }
    }

    /// A later attempt replaces an earlier pending one.
    pub fn attempt(&mut self, location: impl Into<String>, action: Option<A>) -> NavigationDecision {
        if !self.has_unsaved_changes {
            return NavigationDecision::Proceed;
        }

        self.pending = Some(PendingNavigation {
            location: location.into(),
            action,
        });
        NavigationDecision::Held
    }

    /// Releases the pending navigation and unblocks. No-op unless pending.
    pub fn confirm(&mut self) -> Option<PendingNavigation<A>> {
        let pending = self.pending.take()?;
        self.has_unsaved_changes = false;
        Some(pending)
    }

    /// Drops the pending navigation; the unsaved flag stays set.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Guard = NavigationGuard<&'static str>;

    #[test]
    fn test_unblocked_attempt_proceeds() {
        let mut g = Guard::new();
        assert_eq!(g.state(), GuardState::Unblocked);
        assert_eq!(g.attempt("/page/x", None), NavigationDecision::Proceed);
        assert_eq!(g.state(), GuardState::Unblocked);
        assert_eq!(g.pending_location(), None);
    }

    #[test]
    fn test_blocked_attempt_then_confirm() {
        let mut g = Guard::new();
        g.set_has_unsaved_changes(true);
        assert_eq!(g.state(), GuardState::BlockedIdle);

        assert_eq!(g.attempt("/x", None), NavigationDecision::Held);
        assert_eq!(g.state(), GuardState::BlockedPendingConfirmation);
        assert_eq!(g.pending_location(), Some("/x"));

        let released = g.confirm().unwrap();
        assert_eq!(released.location, "/x");
        assert_eq!(released.action, None);
        assert_eq!(g.state(), GuardState::Unblocked);
        assert!(!g.has_unsaved_changes());
        assert_eq!(g.pending_location(), None);
    }

    #[test]
    fn test_cancel_keeps_unsaved_flag() {
        let mut g = Guard::new();
        g.set_has_unsaved_changes(true);
        g.attempt("/x", Some("cb"));
        g.cancel();

        assert_eq!(g.state(), GuardState::BlockedIdle);
        assert!(g.has_unsaved_changes());
        assert_eq!(g.pending_location(), None);
        assert_eq!(g.confirm(), None);
    }

    #[test]
    fn test_last_attempt_wins() {
        let mut g = Guard::new();
        g.set_has_unsaved_changes(true);
        g.attempt("/first", Some("first"));
        g.attempt("/second", Some("second"));

        let released = g.confirm().unwrap();
        assert_eq!(released.location, "/second");
        assert_eq!(released.action, Some("second"));
    }

    #[test]
    fn test_confirm_outside_pending_is_noop() {
        let mut g = Guard::new();
        g.set_has_unsaved_changes(true);
        assert_eq!(g.confirm(), None);
        assert_eq!(g.state(), GuardState::BlockedIdle);

        let mut idle = Guard::new();
        assert_eq!(idle.confirm(), None);
        assert_eq!(idle.state(), GuardState::Unblocked);
    }

    #[test]
    fn test_leaving_editor_after_cancel_is_not_held() {
        let mut g = Guard::new();
        g.set_has_unsaved_changes(true);

        // Editor cancel: drop the edits, then leave.
        g.set_has_unsaved_changes(false);
        assert_eq!(g.attempt("/page/x", None), NavigationDecision::Proceed);
        assert!(!g.is_pending());
    }

    #[test]
    fn test_release_prefers_deferred_action() {
        let mut g = Guard::new();
        g.set_has_unsaved_changes(true);
        g.attempt("/page/a", Some("open a"));
        assert_eq!(g.confirm().map(|p| p.release()), Some(Release::Run("open a")));

        g.set_has_unsaved_changes(true);
        g.attempt("/page/b", None);
        assert_eq!(
            g.confirm().map(|p| p.release()),
            Some(Release::Navigate("/page/b".to_string()))
        );
    }

    #[test]
    fn test_clearing_unsaved_drops_pending() {
        let mut g = Guard::new();
        g.set_has_unsaved_changes(true);
        g.attempt("/x", Some("cb"));
        g.set_has_unsaved_changes(false);

        assert_eq!(g.state(), GuardState::Unblocked);
        assert!(!g.is_pending());
        assert!(!g.is_blocked());
    }
}
