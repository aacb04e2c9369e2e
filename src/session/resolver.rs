//! Session resolution: from a possibly-absent credential to a role
//!
//! Every call with a credential performs exactly one session lookup. Nothing
//! is cached or shared between calls, and no failure escapes: transport
//! errors, non-2xx statuses and malformed bodies all become
//! [`DenialKind::NetworkOrServerFailure`].

use async_trait::async_trait;
use std::sync::Arc;

use super::credential::Credential;
use super::store::TokenProvider;
use crate::api::ApiError;
use crate::models::{Role, SessionPayload, UnknownRole};
use crate::utils::LoggingHelper;

/// Where session information comes from
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// Perform one session lookup for `credential`
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup cannot produce a session payload
    async fn fetch_session(&self, credential: &Credential) -> Result<SessionPayload, ApiError>;
}

/// Why access was not granted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DenialKind {
    #[error("no credential in session")]
    NoCredential,
    #[error("session lookup failed")]
    NetworkOrServerFailure,
    #[error("session reported unrecognized role {0:?}")]
    UnknownRole(String),
    #[error("role {0} is not accepted here")]
    RoleRejected(Role),
}

/// Result of one resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Granted(Role),
    Denied(DenialKind),
}

#[derive(Clone)]
pub struct SessionResolver {
    source: Arc<dyn SessionSource>,
    tokens: Arc<dyn TokenProvider>,
}

impl SessionResolver {
    #[must_use]
    pub fn new(source: Arc<dyn SessionSource>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { source, tokens }
    }

    /// Resolve the credential currently held by the token provider
    pub async fn resolve(&self) -> AuthOutcome {
        let credential = self.tokens.credential();
        self.resolve_credential(credential.as_ref()).await
    }

    /// Resolve an explicit credential
    pub async fn resolve_credential(&self, credential: Option<&Credential>) -> AuthOutcome {
        let Some(credential) = credential else {
            let kind = DenialKind::NoCredential;
            LoggingHelper::log_session_denied(&kind);
            return AuthOutcome::Denied(kind);
        };

        let outcome = match self.source.fetch_session(credential).await {
            Ok(payload) => match payload.role.parse::<Role>() {
                Ok(role) => AuthOutcome::Granted(role),
                Err(UnknownRole(role)) => AuthOutcome::Denied(DenialKind::UnknownRole(role)),
            },
            Err(err) => {
                log::debug!("Session lookup error: {err}");
                AuthOutcome::Denied(DenialKind::NetworkOrServerFailure)
            }
        };

        if let AuthOutcome::Denied(kind) = &outcome {
            LoggingHelper::log_session_denied(kind);
        }
        outcome
    }
}
