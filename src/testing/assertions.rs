//! Custom assertion helpers for testing
//!
//! They work on any response type, so they apply both to handler output and
//! to `ServiceResponse`s from `actix_web::test`.

use actix_web::http::header::{HeaderMap, LOCATION, SET_COOKIE};
use actix_web::http::StatusCode;

use crate::utils::cookie_utils::COOKIE_NAME;

/// Assert that a status code matches
///
/// # Panics
///
/// Panics if the status does not match the expected status code.
pub fn assert_status(status: StatusCode, expected_status: u16) {
    assert_eq!(
        status.as_u16(),
        expected_status,
        "Expected status {expected_status}, got {status}"
    );
}

/// Assert a 302 redirect to `expected_location`
///
/// # Panics
///
/// Panics if the status is not 302 or the `Location` header differs.
pub fn assert_redirect(status: StatusCode, headers: &HeaderMap, expected_location: &str) {
    assert_status(status, 302);
    assert_header_value(headers, LOCATION.as_str(), expected_location);
}

/// Assert that a header has a specific value
///
/// # Panics
///
/// Panics if the header is not present or has a different value.
pub fn assert_header_value(headers: &HeaderMap, header_name: &str, expected_value: &str) {
    if let Some(header_value) = headers.get(header_name) {
        assert_eq!(
            header_value.to_str().unwrap_or(""),
            expected_value,
            "Header '{header_name}' has wrong value"
        );
    } else {
        panic!("Header '{header_name}' not found in response");
    }
}

/// Return the `Set-Cookie` header for the credential cookie
///
/// # Panics
///
/// Panics if the response does not set the credential cookie.
#[must_use]
pub fn credential_set_cookie(headers: &HeaderMap) -> String {
    headers
        .get_all(SET_COOKIE)
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&format!("{COOKIE_NAME}=")))
        .map(ToString::to_string)
        .unwrap_or_else(|| panic!("Response does not set the {COOKIE_NAME} cookie"))
}

/// Assert that a rendered body contains `needle`
///
/// # Panics
///
/// Panics if the body is not UTF-8 or does not contain `needle`.
pub fn assert_body_contains(body: &[u8], needle: &str) {
    let text = std::str::from_utf8(body).expect("Body should be UTF-8");
    assert!(
        text.contains(needle),
        "Expected body to contain {needle:?}, got:\n{text}"
    );
}

/// Assert that a rendered body does not contain `needle`
///
/// # Panics
///
/// Panics if the body is not UTF-8 or contains `needle`.
pub fn assert_body_lacks(body: &[u8], needle: &str) {
    let text = std::str::from_utf8(body).expect("Body should be UTF-8");
    assert!(
        !text.contains(needle),
        "Expected body not to contain {needle:?}, got:\n{text}"
    );
}
