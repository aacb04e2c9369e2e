use async_trait::async_trait;
use log::debug;
use reqwest::{header, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::ApiError;
use crate::models::{
    AccessToken, Category, CategoryWithProducts, NewCategory, NewProduct, NewUser, Product,
    SessionPayload, UserPublic,
};
use crate::session::{Credential, SessionSource};
use crate::settings::StorefrontSettings;

const TOKEN_PATH: &str = "api/v1/users/token";
const USERS_PATH: &str = "api/v1/users/";
const SESSION_PATH: &str = "api/v1/users/my_session/";
const CATEGORIES_PATH: &str = "api/v1/categories";
const PRODUCTS_PATH: &str = "api/v1/products";

/// Typed client for the remote catalog API
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the configured base URL is invalid
    pub fn from_settings(settings: &StorefrontSettings) -> Result<Self, ApiError> {
        Self::new(&settings.api.base_url)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// Exchange username and password for a bearer token (form-encoded)
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or a body
    /// without a usable token
    pub async fn login(&self, username: &str, password: &str) -> Result<Credential, ApiError> {
        let request = self
            .http
            .post(self.endpoint(TOKEN_PATH)?)
            .form(&[("username", username), ("password", password)]);
        let token: AccessToken = Self::send_json(request).await?;
        Credential::new(token.access_token)
            .ok_or_else(|| ApiError::Malformed("empty access token".to_string()))
    }

    /// Register a new account
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status
    pub async fn signup(&self, user: &NewUser) -> Result<UserPublic, ApiError> {
        let request = self.http.post(self.endpoint(USERS_PATH)?).json(user);
        Self::send_json(request).await
    }

    /// Look up the session bound to a credential
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or a body
    /// that is not a session object with a role
    pub async fn session_info(&self, credential: &Credential) -> Result<SessionPayload, ApiError> {
        let request = Self::authorized(
            self.http.get(self.endpoint(SESSION_PATH)?),
            Some(credential),
        );
        Self::send_json(request).await
    }

    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        Self::send_json(self.http.get(self.endpoint(CATEGORIES_PATH)?)).await
    }

    /// Fetch one category together with its products
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status
    pub async fn category(&self, id: i64) -> Result<CategoryWithProducts, ApiError> {
        let path = format!("{CATEGORIES_PATH}/{id}");
        Self::send_json(self.http.get(self.endpoint(&path)?)).await
    }

    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status
    pub async fn create_category(
        &self,
        credential: Option<&Credential>,
        category: &NewCategory,
    ) -> Result<Category, ApiError> {
        let request = Self::authorized(
            self.http.post(self.endpoint(CATEGORIES_PATH)?).json(category),
            credential,
        );
        Self::send_json(request).await
    }

    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status
    pub async fn products(&self, credential: Option<&Credential>) -> Result<Vec<Product>, ApiError> {
        let request = Self::authorized(self.http.get(self.endpoint(PRODUCTS_PATH)?), credential);
        Self::send_json(request).await
    }

    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status
    pub async fn create_product(
        &self,
        credential: &Credential,
        product: &NewProduct,
    ) -> Result<Product, ApiError> {
        let request = Self::authorized(
            self.http.post(self.endpoint(PRODUCTS_PATH)?).json(product),
            Some(credential),
        );
        Self::send_json(request).await
    }

    fn authorized(request: RequestBuilder, credential: Option<&Credential>) -> RequestBuilder {
        match credential {
            Some(credential) => request.header(header::AUTHORIZATION, credential.bearer_header()),
            None => request,
        }
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = extract_detail(&body);
        debug!("Catalog API returned {status}: {detail}");
        Err(ApiError::Status {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl SessionSource for ApiClient {
    async fn fetch_session(&self, credential: &Credential) -> Result<SessionPayload, ApiError> {
        self.session_info(credential).await
    }
}

/// Pull a human-readable message out of an error body
///
/// The backend reports `{"detail": "..."}` for domain errors and
/// `{"detail": [{"msg": "..."}, ...]}` for validation errors. Anything else
/// is returned trimmed as-is.
#[must_use]
pub fn extract_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    match value.get("detail") {
        Some(serde_json::Value::String(detail)) => detail.clone(),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
        None => body.trim().to_string(),
    }
}
