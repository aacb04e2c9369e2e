//! Session Management Module
//!
//! This module holds the storefront's session: the bearer credential, the
//! encrypted browser-session cookie that stores it, and the resolver that
//! turns it into a role.
//!
//! # Modules
//!
//! - [`credential`] - The bearer credential and its stored form
//! - [`cookie`] - Sealing and opening the credential cookie
//! - [`store`] - Token providers injected into the resolver
//! - [`resolver`] - One-shot role lookup against the session endpoint

pub mod cookie;
pub mod credential;
pub mod resolver;
pub mod store;

// Re-export commonly used items for convenience
pub use cookie::CredentialCookies;
pub use credential::{Credential, StoredCredential};
pub use resolver::{AuthOutcome, DenialKind, SessionResolver, SessionSource};
pub use store::{RequestTokenProvider, StaticTokenProvider, TokenProvider};
