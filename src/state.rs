use actix_web::HttpRequest;
use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::guard::{GuardPolicy, RouteGuard};
use crate::session::{
    Credential, CredentialCookies, RequestTokenProvider, SessionResolver, SessionSource,
};
use crate::settings::StorefrontSettings;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub cookies: CredentialCookies,
    session_source: Arc<dyn SessionSource>,
}

impl AppState {
    /// State whose session lookups go to the catalog API itself
    #[must_use]
    pub fn new(api: ApiClient, cookies: CredentialCookies) -> Self {
        let session_source: Arc<dyn SessionSource> = Arc::new(api.clone());
        Self::with_session_source(api, cookies, session_source)
    }

    /// State with a separately injected session source
    #[must_use]
    pub fn with_session_source(
        api: ApiClient,
        cookies: CredentialCookies,
        session_source: Arc<dyn SessionSource>,
    ) -> Self {
        Self {
            api,
            cookies,
            session_source,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the configured API base URL is invalid
    pub fn from_settings(settings: &StorefrontSettings) -> Result<Self, ApiError> {
        let api = ApiClient::from_settings(settings)?;
        let cookies =
            CredentialCookies::from_secret(&settings.session.session_secret, settings.cookies.secure);
        Ok(Self::new(api, cookies))
    }

    /// Resolver reading the credential of this request's cookie
    #[must_use]
    pub fn resolver(&self, req: &HttpRequest) -> SessionResolver {
        SessionResolver::new(
            self.session_source.clone(),
            Arc::new(self.cookies.token_provider(req)),
        )
    }

    /// Resolver over a credential the caller has already read
    #[must_use]
    pub fn resolver_for(&self, credential: Option<Credential>) -> SessionResolver {
        SessionResolver::new(
            self.session_source.clone(),
            Arc::new(RequestTokenProvider::new(credential)),
        )
    }

    #[must_use]
    pub fn guard(&self, policy: GuardPolicy, req: &HttpRequest) -> RouteGuard {
        RouteGuard::new(policy, self.resolver(req))
    }

    #[must_use]
    pub fn guard_for(&self, policy: GuardPolicy, credential: Option<Credential>) -> RouteGuard {
        RouteGuard::new(policy, self.resolver_for(credential))
    }
}
