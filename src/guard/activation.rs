use tokio::sync::watch;

use super::policy::{GuardPolicy, RenderOutcome};
use crate::models::Role;
use crate::session::{AuthOutcome, DenialKind, SessionResolver};
use crate::utils::LoggingHelper;

/// State of one guard activation
///
/// Starts at `Pending` and moves exactly once to a terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Pending,
    Authorized(Role),
    Denied(DenialKind),
}

impl GuardState {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Apply a guard's acceptance predicate to a resolver outcome
    #[must_use]
    pub fn from_outcome(policy: GuardPolicy, outcome: AuthOutcome) -> Self {
        match outcome {
            AuthOutcome::Granted(role) if policy.accepts(role) => Self::Authorized(role),
            AuthOutcome::Granted(role) => Self::Denied(DenialKind::RoleRejected(role)),
            AuthOutcome::Denied(kind) => Self::Denied(kind),
        }
    }
}

/// A route guard: one policy bound to a resolver
#[derive(Clone)]
pub struct RouteGuard {
    policy: GuardPolicy,
    resolver: SessionResolver,
}

impl RouteGuard {
    #[must_use]
    pub fn new(policy: GuardPolicy, resolver: SessionResolver) -> Self {
        Self { policy, resolver }
    }

    #[must_use]
    pub const fn policy(&self) -> GuardPolicy {
        self.policy
    }

    /// Resolve the session once and settle, without an observable pending phase
    pub async fn evaluate(&self) -> GuardState {
        let outcome = self.resolver.resolve().await;
        GuardState::from_outcome(self.policy, outcome)
    }

    /// Start a new activation
    ///
    /// Resolution runs on a spawned task. The returned handle reads `Pending`
    /// until the task publishes the terminal state. Must be called from
    /// within a Tokio runtime.
    #[must_use]
    pub fn activate(&self) -> GuardActivation {
        let (state_tx, state_rx) = watch::channel(GuardState::Pending);
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        let guard = self.clone();
        let policy = self.policy;

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = async {
                    cancel_rx.wait_for(|cancelled| *cancelled).await.is_ok()
                } => {
                    LoggingHelper::log_guard_cancelled(policy);
                }
                state = guard.evaluate() => {
                    publish(policy, &cancel_rx, &state_tx, state);
                }
            }
        });

        GuardActivation {
            policy,
            state: state_rx,
            cancel: cancel_tx,
        }
    }
}

fn publish(
    policy: GuardPolicy,
    cancel_rx: &watch::Receiver<bool>,
    state_tx: &watch::Sender<GuardState>,
    state: GuardState,
) {
    // The borrow holds the cancel channel's read lock, so a concurrent
    // cancel() cannot complete between this check and the send.
    let cancelled = cancel_rx.borrow();
    if *cancelled {
        LoggingHelper::log_guard_cancelled(policy);
        return;
    }
    LoggingHelper::log_guard_settled(policy, &state);
    state_tx.send_replace(state);
}

/// Handle to one in-flight or settled guard activation
///
/// Dropping the handle cancels the activation.
pub struct GuardActivation {
    policy: GuardPolicy,
    state: watch::Receiver<GuardState>,
    cancel: watch::Sender<bool>,
}

impl GuardActivation {
    #[must_use]
    pub const fn policy(&self) -> GuardPolicy {
        self.policy
    }

    #[must_use]
    pub fn current(&self) -> GuardState {
        self.state.borrow().clone()
    }

    /// What the page shows right now
    #[must_use]
    pub fn render(&self) -> RenderOutcome {
        self.policy.render(&self.state.borrow())
    }

    /// Wait for the terminal state
    ///
    /// Returns `None` if the activation was cancelled before it settled.
    pub async fn settled(&mut self) -> Option<GuardState> {
        if self.is_cancelled() {
            return None;
        }
        self.state
            .wait_for(GuardState::is_terminal)
            .await
            .ok()
            .map(|state| state.clone())
    }

    /// Stop the in-flight resolution; no state is published after this returns
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }
}

impl Drop for GuardActivation {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::StaticTokenProvider;
    use crate::testing::mock::MockSessionSource;
    use std::sync::Arc;

    fn guard(policy: GuardPolicy, source: &Arc<MockSessionSource>, token: &str) -> RouteGuard {
        let resolver = SessionResolver::new(
            source.clone(),
            Arc::new(StaticTokenProvider::from_token(token)),
        );
        RouteGuard::new(policy, resolver)
    }

    async fn wait_for_calls(source: &MockSessionSource, calls: usize) {
        while source.calls() < calls {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_admin_guard_table() {
        let cases = [
            ("admin", GuardState::Authorized(Role::Admin)),
            (
                "customer",
                GuardState::Denied(DenialKind::RoleRejected(Role::Customer)),
            ),
        ];
        for (role, expected) in cases {
            let source = Arc::new(MockSessionSource::with_role(role));
            let state = guard(GuardPolicy::Admin, &source, "abc123").evaluate().await;
            assert_eq!(state, expected);
        }
    }

    #[tokio::test]
    async fn test_customer_guard_table() {
        let cases = [
            ("customer", GuardState::Authorized(Role::Customer)),
            (
                "admin",
                GuardState::Denied(DenialKind::RoleRejected(Role::Admin)),
            ),
        ];
        for (role, expected) in cases {
            let source = Arc::new(MockSessionSource::with_role(role));
            let state = guard(GuardPolicy::Customer, &source, "abc123").evaluate().await;
            assert_eq!(state, expected);
        }
    }

    #[tokio::test]
    async fn test_unknown_role_is_denied_by_every_guard() {
        for policy in [GuardPolicy::Root, GuardPolicy::Admin, GuardPolicy::Customer] {
            let source = Arc::new(MockSessionSource::with_role("owner"));
            let state = guard(policy, &source, "abc123").evaluate().await;
            assert_eq!(
                state,
                GuardState::Denied(DenialKind::UnknownRole("owner".to_string()))
            );
        }
    }

    #[tokio::test]
    async fn test_failure_is_denied_not_error() {
        let source = Arc::new(MockSessionSource::failing(500));
        let guard = guard(GuardPolicy::Admin, &source, "abc123");

        let state = guard.evaluate().await;
        assert_eq!(state, GuardState::Denied(DenialKind::NetworkOrServerFailure));
        assert_eq!(
            GuardPolicy::Admin.render(&state),
            GuardPolicy::Admin.render(&GuardState::Denied(DenialKind::NoCredential))
        );
    }

    #[tokio::test]
    async fn test_activations_are_idempotent_and_uncached() {
        let source = Arc::new(MockSessionSource::with_role("customer"));
        let guard = guard(GuardPolicy::Customer, &source, "abc123");

        let first = guard.activate().settled().await;
        let second = guard.activate().settled().await;

        assert_eq!(first, Some(GuardState::Authorized(Role::Customer)));
        assert_eq!(first, second);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_pending_is_observed_first() {
        let source = Arc::new(MockSessionSource::with_role("admin").gated());
        let mut activation = guard(GuardPolicy::Admin, &source, "abc123").activate();

        assert_eq!(activation.current(), GuardState::Pending);
        assert_eq!(activation.render(), RenderOutcome::Loading);

        wait_for_calls(&source, 1).await;
        assert_eq!(activation.current(), GuardState::Pending);

        source.release();
        assert_eq!(
            activation.settled().await,
            Some(GuardState::Authorized(Role::Admin))
        );
        assert_eq!(activation.render(), RenderOutcome::Content);
    }

    #[tokio::test]
    async fn test_cancelled_activation_never_publishes() {
        let source = Arc::new(MockSessionSource::with_role("admin").gated());
        let mut activation = guard(GuardPolicy::Admin, &source, "abc123").activate();

        wait_for_calls(&source, 1).await;
        activation.cancel();
        source.release();
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert!(activation.is_cancelled());
        assert_eq!(activation.current(), GuardState::Pending);
        assert_eq!(activation.settled().await, None);
    }

    #[tokio::test]
    async fn test_dropped_activation_never_publishes() {
        let source = Arc::new(MockSessionSource::with_role("admin").gated());
        let activation = guard(GuardPolicy::Admin, &source, "abc123").activate();
        let mut state = activation.state.clone();

        wait_for_calls(&source, 1).await;
        drop(activation);
        source.release();

        assert!(state.changed().await.is_err());
        assert_eq!(*state.borrow(), GuardState::Pending);
    }

    #[tokio::test]
    async fn test_no_credential_settles_without_lookup() {
        let source = Arc::new(MockSessionSource::with_role("admin"));
        for policy in [GuardPolicy::Root, GuardPolicy::Admin, GuardPolicy::Customer] {
            let mut activation = guard(policy, &source, "").activate();
            let state = activation.settled().await;
            assert_eq!(state, Some(GuardState::Denied(DenialKind::NoCredential)));
        }
        assert_eq!(source.calls(), 0);
    }
}
