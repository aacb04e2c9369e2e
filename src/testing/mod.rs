//! Unified testing utilities for the storefront
//!
//! Available to unit tests and, through the `testing` feature, to the
//! integration tests under `tests/`.
//!
//! ## Organization
//!
//! - [`fixtures`] - Pre-built settings, cookies, credentials and app state
//! - [`requests`] - HTTP request builders for testing handlers
//! - [`assertions`] - Custom assertion helpers for common patterns
//! - [`mock`] - A counting mock session source and a fake catalog backend
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront::testing::{fixtures::TestFixtures, mock::MockSessionSource};
//!
//! let source = std::sync::Arc::new(MockSessionSource::with_role("admin"));
//! let guard = TestFixtures::guard(storefront::GuardPolicy::Admin, source.clone(), "abc123");
//! ```

pub mod assertions;
pub mod fixtures;
pub mod mock;
pub mod requests;

// Re-export commonly used items for convenience
pub use assertions::*;
pub use fixtures::TestFixtures;
pub use mock::{FakeBackend, MockSessionSource};
pub use requests::RequestBuilder;

/// Common test constants
pub mod constants {
    /// Session secret used by test cookie factories
    pub const TEST_SESSION_SECRET: &str = "storefront-test-session-secret-0123456789";

    /// Token used in the canonical admin scenario
    pub const TEST_TOKEN: &str = "abc123";

    /// Seeded admin account of the fake backend
    pub const ADMIN_USERNAME: &str = "admin";
    pub const ADMIN_PASSWORD: &str = "admin-password";
    pub const ADMIN_TOKEN: &str = "token-admin";

    /// Seeded customer account of the fake backend
    pub const CUSTOMER_USERNAME: &str = "alice";
    pub const CUSTOMER_PASSWORD: &str = "alice-password";
    pub const CUSTOMER_TOKEN: &str = "token-alice";
}
