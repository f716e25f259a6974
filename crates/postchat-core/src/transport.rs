//! HTTP transport abstraction for the completion client.
//!
//! The completion client never talks to the network directly; it hands a
//! fully built request to an [`HttpTransport`]. The root package provides
//! a reqwest implementation with a bounded timeout; tests substitute a
//! fake that returns canned responses and records what was sent.

use async_trait::async_trait;
use thiserror::Error;

/// Status and body of an HTTP response, read to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to obtain any HTTP response at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("{0}")]
    Connection(String),
}

/// Sends a single JSON `POST` and returns the raw response.
///
/// Implementations must not retry: one call maps to one upstream attempt.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        let ok = HttpResponse {
            status: 204,
            body: String::new(),
        };
        let err = HttpResponse {
            status: 500,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!err.is_success());
    }
}
