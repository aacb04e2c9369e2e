//! HTTP request builders for testing handlers

use actix_web::cookie::Cookie;
use actix_web::http::Method;
use actix_web::test;

use super::fixtures::TestFixtures;

/// Fluent builder over [`test::TestRequest`]
pub struct RequestBuilder {
    method: Method,
    uri: String,
    cookies: Vec<Cookie<'static>>,
    form: Vec<(String, String)>,
}

impl RequestBuilder {
    #[must_use]
    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    #[must_use]
    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_string(),
            cookies: Vec::new(),
            form: Vec::new(),
        }
    }

    /// Add a cookie to the request
    #[must_use]
    pub fn with_cookie(mut self, cookie: Cookie<'static>) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// Send the sealed credential cookie for `token`
    #[must_use]
    pub fn signed_in_as(self, token: &str) -> Self {
        self.with_cookie(TestFixtures::credential_cookie(token))
    }

    /// Add a form field; the request is sent form-encoded if any are set
    #[must_use]
    pub fn form_field(mut self, name: &str, value: &str) -> Self {
        self.form.push((name.to_string(), value.to_string()));
        self
    }

    /// Build the final `TestRequest`
    #[must_use]
    pub fn build(self) -> test::TestRequest {
        let mut req = test::TestRequest::default()
            .method(self.method)
            .uri(&self.uri);

        for cookie in self.cookies {
            req = req.cookie(cookie);
        }

        if !self.form.is_empty() {
            req = req.set_form(self.form);
        }

        req
    }
}
