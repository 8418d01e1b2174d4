//! Error types for the Plaid client.

use serde::Deserialize;

/// Error body returned by Plaid on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaidApiError {
    pub error_type: String,
    pub error_code: String,
    pub error_message: String,
    #[serde(default)]
    pub display_message: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PlaidError {
    #[error("Plaid {status} {}: {}", .error.error_code, .error.error_message)]
    Api { status: u16, error: PlaidApiError },
    #[error("Plaid returned HTTP {status} without an error body")]
    Status { status: u16 },
    #[error("Plaid request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to parse Plaid response")]
    Malformed {
        #[source]
        source: anyhow::Error,
    },
}

impl PlaidError {
    /// HTTP status reported by Plaid, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Status { status } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Malformed { .. } => None,
        }
    }

    /// Plaid's machine-readable error code, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { error, .. } => Some(&error.error_code),
            _ => None,
        }
    }
}
