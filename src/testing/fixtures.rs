//! Test fixtures providing pre-built test objects

use actix_web::cookie::Cookie;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::guard::{GuardPolicy, RouteGuard};
use crate::session::{Credential, CredentialCookies, SessionResolver, SessionSource, StaticTokenProvider};
use crate::settings::StorefrontSettings;
use crate::state::AppState;

use super::constants::TEST_SESSION_SECRET;

/// Central fixture provider for all test data
pub struct TestFixtures;

impl TestFixtures {
    /// Settings pointing at `api_base_url` with a fixed secret and insecure cookies
    #[must_use]
    pub fn settings(api_base_url: &str) -> StorefrontSettings {
        let mut settings = StorefrontSettings::default();
        settings.api.base_url = api_base_url.to_string();
        settings.session.session_secret = TEST_SESSION_SECRET.to_string();
        settings.cookies.secure = false;
        settings
    }

    #[must_use]
    pub fn cookies() -> CredentialCookies {
        CredentialCookies::from_secret(TEST_SESSION_SECRET, false)
    }

    /// # Panics
    ///
    /// Panics if `token` is blank.
    #[must_use]
    pub fn credential(token: &str) -> Credential {
        Credential::new(token).unwrap()
    }

    /// Sealed session cookie holding `token`, as the browser would send it
    ///
    /// # Panics
    ///
    /// Panics if `token` is blank or encryption fails.
    #[must_use]
    pub fn credential_cookie(token: &str) -> Cookie<'static> {
        Self::cookies()
            .create_credential_cookie(&Self::credential(token))
            .unwrap()
    }

    /// Resolver over `source` holding a fixed token (blank for none)
    #[must_use]
    pub fn resolver(source: Arc<dyn SessionSource>, token: &str) -> SessionResolver {
        SessionResolver::new(source, Arc::new(StaticTokenProvider::from_token(token)))
    }

    #[must_use]
    pub fn guard(policy: GuardPolicy, source: Arc<dyn SessionSource>, token: &str) -> RouteGuard {
        RouteGuard::new(policy, Self::resolver(source, token))
    }

    /// App state talking to `api_base_url`, with session lookups answered by `source`
    ///
    /// # Panics
    ///
    /// Panics if `api_base_url` is not a valid URL.
    #[must_use]
    pub fn app_state_with_source(api_base_url: &str, source: Arc<dyn SessionSource>) -> AppState {
        AppState::with_session_source(ApiClient::new(api_base_url).unwrap(), Self::cookies(), source)
    }

    /// App state talking to `api_base_url` for everything
    ///
    /// # Panics
    ///
    /// Panics if `api_base_url` is not a valid URL.
    #[must_use]
    pub fn app_state(api_base_url: &str) -> AppState {
        AppState::from_settings(&Self::settings(api_base_url)).unwrap()
    }
}
