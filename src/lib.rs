#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Version of the storefront application
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod api;
pub mod guard;
pub mod handlers;
pub mod models;
pub mod session;
pub mod settings;
pub mod state;
pub mod utils;

// Test fixtures, mocks and the fake catalog backend
#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use api::{ApiClient, ApiError};
pub use guard::{GuardActivation, GuardPolicy, GuardState, RenderOutcome, RouteGuard};
pub use models::Role;
pub use session::{AuthOutcome, Credential, DenialKind, SessionResolver};
pub use settings::StorefrontSettings;
pub use state::AppState;
