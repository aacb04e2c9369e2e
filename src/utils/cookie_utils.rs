use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;

/// Name of the cookie holding the sealed bearer credential
pub const COOKIE_NAME: &str = "storefront_session";

/// Options for cookie creation
pub struct CookieOptions {
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
    /// `None` keeps the cookie for the browser session only
    pub max_age: Option<actix_web::cookie::time::Duration>,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            http_only: true,
            secure: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age: None,
        }
    }
}

/// Build a cookie from a name, value and options
#[must_use]
pub fn create_cookie(name: &str, value: String, options: CookieOptions) -> Cookie<'static> {
    let mut builder = Cookie::build(name.to_owned(), value)
        .http_only(options.http_only)
        .secure(options.secure)
        .same_site(options.same_site)
        .path(options.path);
    if let Some(max_age) = options.max_age {
        builder = builder.max_age(max_age);
    }
    builder.finish()
}

/// Create an expired cookie to clear a specific cookie
#[must_use]
pub fn create_expired_cookie(name: &str, secure: bool) -> Cookie<'static> {
    Cookie::build(name.to_owned(), "")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(actix_web::cookie::time::Duration::seconds(-1))
        .finish()
}

/// Extract a cookie value from a request, if present
#[must_use]
pub fn extract_cookie_value(req: &HttpRequest, cookie_name: &str) -> Option<String> {
    req.cookie(cookie_name)
        .map(|cookie| cookie.value().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_default_cookie_is_session_scoped() {
        let cookie = create_cookie(COOKIE_NAME, "v".to_string(), CookieOptions::default());
        assert_eq!(cookie.name(), "storefront_session");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.max_age().is_none());
        assert!(cookie.expires().is_none());
    }

    #[test]
    fn test_expired_cookie() {
        let cookie = create_expired_cookie(COOKIE_NAME, false);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.secure(), Some(false));
        assert!(cookie.max_age().is_some_and(|age| age.is_negative()));
    }

    #[test]
    fn test_extract_cookie_value() {
        let req = TestRequest::default()
            .cookie(Cookie::new(COOKIE_NAME, "sealed"))
            .to_http_request();
        assert_eq!(extract_cookie_value(&req, COOKIE_NAME).as_deref(), Some("sealed"));
        assert!(extract_cookie_value(&req, "other").is_none());
    }
}
