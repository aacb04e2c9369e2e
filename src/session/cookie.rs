use actix_web::{cookie::Cookie, HttpRequest};
use anyhow::Result;

use super::credential::{Credential, StoredCredential};
use super::store::RequestTokenProvider;
use crate::utils::cookie_utils::{
    create_cookie, create_expired_cookie, extract_cookie_value, CookieOptions, COOKIE_NAME,
};
use crate::utils::crypto::{decrypt_data, derive_encryption_key, encrypt_data};

/// Seals and opens the browser-session cookie that holds the bearer credential
///
/// The cookie has no `Max-Age`, so the browser discards it when the session
/// ends. There is exactly one credential cookie name per deployment.
#[derive(Clone)]
pub struct CredentialCookies {
    encryption_key: [u8; 32],
    cookie_secure: bool,
}

impl CredentialCookies {
    #[must_use]
    pub fn new(encryption_key: [u8; 32], cookie_secure: bool) -> Self {
        Self {
            encryption_key,
            cookie_secure,
        }
    }

    /// Derive the cookie key from the configured session secret
    #[must_use]
    pub fn from_secret(session_secret: &str, cookie_secure: bool) -> Self {
        Self::new(derive_encryption_key(session_secret.as_bytes()), cookie_secure)
    }

    /// Create the sealed credential cookie for a freshly issued token
    ///
    /// # Errors
    ///
    /// Returns an error if encryption fails
    pub fn create_credential_cookie(&self, credential: &Credential) -> Result<Cookie<'static>> {
        let stored = StoredCredential::new(credential.clone());
        let value = encrypt_data(&stored, &self.encryption_key)?;
        Ok(create_cookie(
            COOKIE_NAME,
            value,
            CookieOptions {
                secure: self.cookie_secure,
                ..Default::default()
            },
        ))
    }

    /// Cookie that removes the credential from the browser
    #[must_use]
    pub fn create_expired_cookie(&self) -> Cookie<'static> {
        create_expired_cookie(COOKIE_NAME, self.cookie_secure)
    }

    /// Open the credential cookie of a request
    ///
    /// A missing cookie, or one that does not decrypt under the current key
    /// (tampered, or sealed before a secret rotation), reads as no credential.
    #[must_use]
    pub fn read_credential(&self, req: &HttpRequest) -> Option<Credential> {
        let sealed = extract_cookie_value(req, COOKIE_NAME)?;
        if sealed.is_empty() {
            return None;
        }

        match decrypt_data::<StoredCredential>(&sealed, &self.encryption_key) {
            Ok(stored) => Some(stored.token),
            Err(err) => {
                log::warn!("Ignoring unreadable session cookie: {err}");
                None
            }
        }
    }

    /// Snapshot the request's credential as a token provider
    #[must_use]
    pub fn token_provider(&self, req: &HttpRequest) -> RequestTokenProvider {
        RequestTokenProvider::new(self.read_credential(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::TokenProvider;
    use actix_web::test::TestRequest;

    fn cookies() -> CredentialCookies {
        CredentialCookies::from_secret("cookie-test-secret", true)
    }

    #[test]
    fn test_credential_cookie_attributes() {
        let credential = Credential::new("abc123").unwrap();
        let cookie = cookies().create_credential_cookie(&credential).unwrap();

        assert_eq!(cookie.name(), COOKIE_NAME);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert!(cookie.max_age().is_none());
        assert!(!cookie.value().contains("abc123"));
    }

    #[test]
    fn test_read_credential_round_trip() {
        let factory = cookies();
        let credential = Credential::new("abc123").unwrap();
        let cookie = factory.create_credential_cookie(&credential).unwrap();

        let req = TestRequest::default().cookie(cookie).to_http_request();
        assert_eq!(factory.read_credential(&req), Some(credential.clone()));
        assert_eq!(factory.token_provider(&req).credential(), Some(credential));
    }

    #[test]
    fn test_cookie_from_other_key_reads_as_absent() {
        let credential = Credential::new("abc123").unwrap();
        let cookie = cookies().create_credential_cookie(&credential).unwrap();

        let other = CredentialCookies::from_secret("rotated-secret", true);
        let req = TestRequest::default().cookie(cookie).to_http_request();
        assert!(other.read_credential(&req).is_none());
    }

    #[test]
    fn test_missing_or_garbage_cookie() {
        let factory = cookies();
        let req = TestRequest::default().to_http_request();
        assert!(factory.read_credential(&req).is_none());

        let req = TestRequest::default()
            .cookie(Cookie::new(COOKIE_NAME, "garbage"))
            .to_http_request();
        assert!(factory.read_credential(&req).is_none());
    }

    #[test]
    fn test_expired_cookie_respects_secure_flag() {
        let cookie = CredentialCookies::from_secret("s", false).create_expired_cookie();
        assert_eq!(cookie.name(), COOKIE_NAME);
        assert_eq!(cookie.secure(), Some(false));
    }
}
