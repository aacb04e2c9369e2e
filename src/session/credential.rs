use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque bearer token issued by the catalog API at login
///
/// Never empty. `Debug` is redacted so the token cannot leak into logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token, rejecting empty and whitespace-only values
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    #[must_use]
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Contents of the sealed session cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredential {
    pub token: Credential,
    pub issued_at: DateTime<Utc>,
}

impl StoredCredential {
    #[must_use]
    pub fn new(token: Credential) -> Self {
        Self {
            token,
            issued_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_tokens_are_not_credentials() {
        assert!(Credential::new("").is_none());
        assert!(Credential::new("   \t").is_none());
        assert!(Credential::new("abc123").is_some());
    }

    #[test]
    fn test_debug_is_redacted() {
        let credential = Credential::new("super-secret-token").unwrap();
        let stored = StoredCredential::new(credential.clone());

        assert!(!format!("{credential:?}").contains("super-secret-token"));
        assert!(!format!("{stored:?}").contains("super-secret-token"));
    }

    #[test]
    fn test_bearer_header() {
        let credential = Credential::new("abc123").unwrap();
        assert_eq!(credential.bearer_header(), "Bearer abc123");
        assert_eq!(credential.as_str(), "abc123");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let credential = Credential::new("abc123").unwrap();
        assert_eq!(serde_json::to_string(&credential).unwrap(), "\"abc123\"");
    }
}
