//! Token providers: where the resolver reads the current credential from
//!
//! The resolver never reaches into a global store. Each resolver is given a
//! provider, which in production is a snapshot of the request's session cookie.

use super::credential::Credential;

/// Source of the current session's credential
pub trait TokenProvider: Send + Sync {
    /// The credential for this session context, if one is held
    fn credential(&self) -> Option<Credential>;
}

/// Provider holding a fixed credential (or none)
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider {
    credential: Option<Credential>,
}

impl StaticTokenProvider {
    #[must_use]
    pub fn new(credential: Option<Credential>) -> Self {
        Self { credential }
    }

    /// Provider for a raw token string; blank strings yield an empty provider
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        Self::new(Credential::new(token))
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

impl TokenProvider for StaticTokenProvider {
    fn credential(&self) -> Option<Credential> {
        self.credential.clone()
    }
}

/// Credential read from the session cookie of one incoming request
///
/// The cookie is decrypted once when the request arrives, so every guard
/// within the request sees the same value.
#[derive(Debug, Clone)]
pub struct RequestTokenProvider {
    credential: Option<Credential>,
}

impl RequestTokenProvider {
    #[must_use]
    pub(crate) fn new(credential: Option<Credential>) -> Self {
        Self { credential }
    }
}

impl TokenProvider for RequestTokenProvider {
    fn credential(&self) -> Option<Credential> {
        self.credential.clone()
    }
}
