//! Session state and the authentication seam.
//!
//! The hosted authentication service is an external collaborator; this
//! module owns only the process-wide session state machine and the
//! gateway trait the presentation layer talks through. State transitions
//! are synchronous and single-threaded: subscribers re-render before
//! `transition` returns.

pub mod local;

use serde::{Deserialize, Serialize};

use crate::errors::Result;

pub use local::LocalGateway;

/// An authenticated user session as surfaced by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Tri-state session signal: `Unknown` while the initial lookup is still
/// resolving, then `Active` or `Inactive`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unknown,
    Active(Session),
    Inactive,
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active(_))
    }
}

/// Contract of the external authentication service.
pub trait SessionGateway {
    fn current_session(&self) -> Result<Option<Session>>;
    fn sign_in(&mut self, email: &str, password: &str) -> Result<Session>;
    fn sign_up(&mut self, email: &str, password: &str, display_name: &str) -> Result<Session>;
    fn sign_out(&mut self) -> Result<()>;
}

type Subscriber = Box<dyn Fn(&SessionState)>;

/// Process-wide session state with an explicit transition table:
/// `Unknown -> Active | Inactive`, `Active -> Inactive`,
/// `Inactive -> Active`, and `Active -> Active` (the service re-emits
/// sessions on token refresh). `Unknown` is entered only once, at
/// startup. Subscribers are notified synchronously on every accepted
/// transition.
pub struct SessionTracker {
    state: SessionState,
    subscribers: Vec<Subscriber>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self {
            state: SessionState::Unknown,
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn subscribe(&mut self, subscriber: impl Fn(&SessionState) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Applies a transition if the table allows it. Rejected transitions
    /// leave the state untouched and notify nobody.
    pub fn transition(&mut self, next: SessionState) -> bool {
        let allowed = matches!(
            (&self.state, &next),
            (SessionState::Unknown, SessionState::Active(_))
                | (SessionState::Unknown, SessionState::Inactive)
                | (SessionState::Active(_), SessionState::Inactive)
                | (SessionState::Active(_), SessionState::Active(_))
                | (SessionState::Inactive, SessionState::Active(_))
        );
        if !allowed {
            tracing::warn!(from = ?self.state, to = ?next, "session transition rejected");
            return false;
        }
        self.state = next;
        for subscriber in &self.subscribers {
            subscriber(&self.state);
        }
        true
    }

    /// Resolves the initial `Unknown` state against the gateway. A
    /// gateway failure degrades to `Inactive` rather than wedging the
    /// view layer in the loading state.
    pub fn resolve_initial(&mut self, gateway: &dyn SessionGateway) {
        let next = match gateway.current_session() {
            Ok(Some(session)) => SessionState::Active(session),
            Ok(None) => SessionState::Inactive,
            Err(err) => {
                tracing::warn!(error = %err, "session lookup failed; treating as signed out");
                SessionState::Inactive
            }
        };
        self.transition(next);
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session(email: &str) -> Session {
        Session {
            email: email.into(),
            display_name: None,
        }
    }

    #[test]
    fn transition_table_is_enforced() {
        let mut tracker = SessionTracker::new();
        assert!(tracker.transition(SessionState::Inactive));
        // Unknown is never re-entered.
        assert!(!tracker.transition(SessionState::Unknown));
        assert!(tracker.transition(SessionState::Active(session("a@b.c"))));
        // Refresh while active is a legal self-transition.
        assert!(tracker.transition(SessionState::Active(session("a@b.c"))));
        assert!(tracker.transition(SessionState::Inactive));
        // Signed-out to signed-out has no edge in the table.
        assert!(!tracker.transition(SessionState::Inactive));
    }

    #[test]
    fn subscribers_run_synchronously_on_accepted_transitions() {
        let seen: Rc<RefCell<Vec<bool>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut tracker = SessionTracker::new();
        tracker.subscribe(move |state| sink.borrow_mut().push(state.is_active()));

        tracker.transition(SessionState::Active(session("a@b.c")));
        tracker.transition(SessionState::Inactive);
        tracker.transition(SessionState::Inactive); // rejected, no notification
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    struct FixedGateway(Option<Session>);

    impl SessionGateway for FixedGateway {
        fn current_session(&self) -> crate::errors::Result<Option<Session>> {
            Ok(self.0.clone())
        }
        fn sign_in(&mut self, _: &str, _: &str) -> crate::errors::Result<Session> {
            unreachable!()
        }
        fn sign_up(&mut self, _: &str, _: &str, _: &str) -> crate::errors::Result<Session> {
            unreachable!()
        }
        fn sign_out(&mut self) -> crate::errors::Result<()> {
            unreachable!()
        }
    }

    #[test]
    fn resolve_initial_moves_out_of_unknown() {
        let mut tracker = SessionTracker::new();
        tracker.resolve_initial(&FixedGateway(Some(session("a@b.c"))));
        assert!(tracker.state().is_active());

        let mut tracker = SessionTracker::new();
        tracker.resolve_initial(&FixedGateway(None));
        assert_eq!(*tracker.state(), SessionState::Inactive);
    }
}
