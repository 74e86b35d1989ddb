// ── Core error types ──
//
// Two kinds reach the user: local validation failures, which never touch
// the network, and API failures, which carry the raw server message.
// Transport-level detail is deliberately flattened: a missing issue and a
// crashed server both surface as `CoreError::Api`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Rejected locally before any request was made (e.g. empty title).
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// Any non-success transport or parse outcome.
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code, when the server answered.
        status: Option<u16>,
    },

    /// `save` was requested with no edit form open.
    #[error("No issue is open for editing")]
    NoPendingEdit,

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::NoPendingEdit)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<trackly_api::Error> for CoreError {
    fn from(err: trackly_api::Error) -> Self {
        match err {
            trackly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            trackly_api::Error::Tls(message) => CoreError::Config { message },
            other => CoreError::Api {
                status: other.status(),
                message: other.raw_message(),
            },
        }
    }
}
