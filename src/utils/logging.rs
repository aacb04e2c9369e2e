// Recurring log events, kept in one place so their wording stays consistent
use crate::guard::{GuardPolicy, GuardState};
use crate::session::DenialKind;
use log::{debug, info, warn};

pub struct LoggingHelper;

impl LoggingHelper {
    /// Log the terminal state of a guard activation
    pub fn log_guard_settled(policy: GuardPolicy, state: &GuardState) {
        match state {
            GuardState::Pending => debug!("⏳ {policy} guard still pending"),
            GuardState::Authorized(role) => info!("✅ {policy} guard authorized role {role}"),
            GuardState::Denied(kind) => info!("🚫 {policy} guard denied: {kind}"),
        }
    }

    /// Log that an activation was cancelled before it settled
    pub fn log_guard_cancelled(policy: GuardPolicy) {
        debug!("⏹️  {policy} guard activation cancelled");
    }

    /// Log a session lookup that did not produce a usable role
    pub fn log_session_denied(kind: &DenialKind) {
        match kind {
            DenialKind::NoCredential => debug!("No credential present, skipping session lookup"),
            DenialKind::NetworkOrServerFailure => warn!("Session lookup failed: {kind}"),
            DenialKind::UnknownRole(_) | DenialKind::RoleRejected(_) => {
                warn!("Session lookup denied: {kind}");
            }
        }
    }

    /// Log a successful sign-in; the token itself is never logged
    pub fn log_login_success(username: &str) {
        info!("🔑 User {username} signed in");
    }

    /// Log a failed sign-in or sign-up
    pub fn log_auth_failure(action: &str, username: &str, reason: &str) {
        warn!("❌ {action} failed for {username}: {reason}");
    }

    /// Log a successful catalog mutation
    pub fn log_catalog_created(kind: &str, name: &str) {
        info!("🆕 Created {kind} {name:?}");
    }

    /// Log a failed catalog mutation
    pub fn log_catalog_failure(kind: &str, reason: &str) {
        warn!("Failed to create {kind}: {reason}");
    }

    /// Log a catalog read that fell back to an empty view
    pub fn log_catalog_unavailable(what: &str, reason: &str) {
        warn!("Could not load {what}: {reason}");
    }
}
