//! HTTP response handling system
//!
//! This module provides a unified interface for creating HTTP responses across the application,
//! offering consistent patterns for errors, redirects, rendered pages and JSON responses while
//! keeping the common error bodies pre-serialized.

use actix_web::{cookie::Cookie, http::header, http::StatusCode, HttpResponse};
use serde_json::{json, Value};

// ===============================
// CACHED RESPONSES FOR PERFORMANCE
// ===============================

/// Global instance of pre-serialized common responses
static CACHED_RESPONSES: std::sync::LazyLock<CachedResponses> =
    std::sync::LazyLock::new(CachedResponses::new);

/// Container for pre-serialized common HTTP response bodies
struct CachedResponses {
    not_found: String,
}

impl CachedResponses {
    fn new() -> Self {
        Self {
            not_found: Self::create_json("not_found", "The requested resource does not exist"),
        }
    }

    fn create_json(error: &str, message: &str) -> String {
        json!({
            "error": error,
            "message": message
        })
        .to_string()
    }

    fn respond(status: StatusCode, body: &str) -> HttpResponse {
        HttpResponse::build(status)
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .body(body.to_owned())
    }
}

/// Unified response builder that handles all types of HTTP responses
pub struct ResponseBuilder;

impl ResponseBuilder {
    // ===============================
    // ERROR RESPONSE METHODS
    // ===============================

    /// Create a `NotFound` (404) error response with optional customization
    #[must_use]
    pub fn not_found() -> ErrorResponseBuilder {
        ErrorResponseBuilder::new(ErrorType::NotFound)
    }

    // ===============================
    // SUCCESS RESPONSE METHODS
    // ===============================

    /// Create a redirect response (302 Found) with optional cookies and messages
    #[must_use]
    pub fn redirect(location: &str) -> RedirectBuilder {
        RedirectBuilder::new(location)
    }

    /// Create an OK response (200) with JSON content
    #[must_use]
    pub fn ok() -> JsonResponseBuilder {
        JsonResponseBuilder::new(StatusCode::OK)
    }

    /// Create a rendered HTML page response
    #[must_use]
    pub fn page(status: StatusCode, body: String) -> HttpResponse {
        HttpResponse::build(status)
            .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .body(body)
    }

    // ===============================
    // CONVENIENCE METHODS
    // ===============================

    /// Unknown guard name or page
    #[must_use]
    pub fn unknown_resource(kind: &str, name: &str) -> HttpResponse {
        Self::not_found()
            .with_error_code("not_found")
            .with_message(&format!("Unknown {kind}: {name}"))
            .build()
    }
}

// ===============================
// BUILDER TYPES
// ===============================

/// Builder for error responses with fluent interface
pub struct ErrorResponseBuilder {
    error_type: ErrorType,
    error_code: Option<String>,
    message: Option<String>,
}

/// Builder for redirect responses
pub struct RedirectBuilder {
    location: String,
    cookies: Vec<Cookie<'static>>,
}

/// Builder for JSON responses
pub struct JsonResponseBuilder {
    status_code: StatusCode,
    headers: Vec<(String, String)>,
}

/// Supported HTTP error response types
#[derive(Clone, Copy)]
enum ErrorType {
    NotFound,
}

impl ErrorType {
    const fn status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }

    const fn default_error_code(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
        }
    }
}

// ===============================
// ERROR RESPONSE BUILDER IMPL
// ===============================

impl ErrorResponseBuilder {
    fn new(error_type: ErrorType) -> Self {
        Self {
            error_type,
            error_code: None,
            message: None,
        }
    }

    /// Set a custom error code (e.g., "`unknown_guard`")
    #[must_use]
    pub fn with_error_code(mut self, code: &str) -> Self {
        self.error_code = Some(code.to_string());
        self
    }

    /// Set a custom error message
    #[must_use]
    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    /// Build the final `HttpResponse`
    #[must_use]
    pub fn build(self) -> HttpResponse {
        if self.error_code.is_none() && self.message.is_none() {
            return self.build_cached_response();
        }
        self.build_custom_response()
    }

    fn build_cached_response(&self) -> HttpResponse {
        let body = match self.error_type {
            ErrorType::NotFound => &CACHED_RESPONSES.not_found,
        };
        CachedResponses::respond(self.error_type.status(), body)
    }

    fn build_custom_response(self) -> HttpResponse {
        let error_code = self
            .error_code
            .unwrap_or_else(|| self.error_type.default_error_code().to_string());
        let message = self.message.unwrap_or_default();

        let body: Value = json!({
            "error": error_code,
            "message": message,
        });

        HttpResponse::build(self.error_type.status())
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .json(body)
    }
}

// ===============================
// REDIRECT BUILDER IMPL
// ===============================

impl RedirectBuilder {
    fn new(location: &str) -> Self {
        Self {
            location: location.to_string(),
            cookies: Vec::new(),
        }
    }

    /// Add a cookie to the redirect response
    #[must_use]
    pub fn with_cookie(mut self, cookie: Cookie<'static>) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// Append a percent-encoded query parameter to the redirect URL
    #[must_use]
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        let separator = if self.location.contains('?') { '&' } else { '?' };
        self.location = format!(
            "{}{separator}{key}={}",
            self.location,
            urlencoding::encode(value)
        );
        self
    }

    /// Carry an error message to the next page
    #[must_use]
    pub fn with_error(self, message: &str) -> Self {
        self.with_param("error", message)
    }

    /// Carry a success message to the next page
    #[must_use]
    pub fn with_notice(self, message: &str) -> Self {
        self.with_param("notice", message)
    }

    /// Build the final redirect response
    #[must_use]
    pub fn build(self) -> HttpResponse {
        let mut builder = HttpResponse::Found();
        for cookie in self.cookies {
            builder.cookie(cookie);
        }
        builder
            .insert_header((header::LOCATION, self.location))
            .finish()
    }
}

// ===============================
// JSON RESPONSE BUILDER IMPL
// ===============================

impl JsonResponseBuilder {
    fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        }
    }

    /// Add a custom header
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Build the response with JSON content
    #[must_use]
    pub fn json<T: serde::Serialize>(self, data: &T) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code);
        for (name, value) in self.headers {
            builder.insert_header((name, value));
        }
        builder.json(data)
    }
}
