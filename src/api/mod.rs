//! Catalog API access
//!
//! - [`client`] - typed wrappers over the backend's REST endpoints

pub mod client;

pub use client::{extract_detail, ApiClient};

/// Failure talking to the catalog API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("request to catalog API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog API returned {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("unexpected response from catalog API: {0}")]
    Malformed(String),
}

impl ApiError {
    /// The message to show a user: the backend's detail when there is one
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { detail, .. } if !detail.is_empty() => detail.clone(),
            Self::Status { status, .. } => format!("Request failed with status code {status}"),
            other => other.to_string(),
        }
    }
}
