//! Error taxonomy for completion requests.

use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias using [`ChatError`].
pub type Result<T> = std::result::Result<T, ChatError>;

/// Every fatal way a completion request can end.
///
/// A malformed success response from the provider is not an error: it
/// degrades to empty content.
#[derive(Error, Debug)]
pub enum ChatError {
    /// Provider credentials or endpoint missing. Raised before any I/O.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The post store failed.
    #[error("post retrieval failed: {0}")]
    Retrieval(String),

    /// The provider answered with a non-success HTTP status.
    #[error("provider returned HTTP {status}: {body}")]
    Provider { status: u16, body: String },

    /// The provider could not be reached or did not answer in time.
    #[error("provider request failed: {0}")]
    Transport(#[from] TransportError),
}

impl ChatError {
    /// Machine-readable code used in API error bodies and logs.
    pub fn code(&self) -> &'static str {
        match self {
            ChatError::Configuration(_) => "configuration",
            ChatError::Retrieval(_) => "retrieval_failed",
            ChatError::Provider { .. } => "provider_error",
            ChatError::Transport(TransportError::Timeout) => "timeout",
            ChatError::Transport(TransportError::Connection(_)) => "upstream_unreachable",
        }
    }
}
