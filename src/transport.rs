//! reqwest-backed [`HttpTransport`].
//!
//! One [`reqwest::Client`] is built at startup with the configured timeout
//! and shared by every request. A call either returns the full response
//! (any status) or a [`TransportError`]:
//!
//! - elapsed timeout → [`TransportError::Timeout`]
//! - DNS, connect, TLS, or body read failure → [`TransportError::Connection`]
//!
//! There is no retry or backoff here; a failed call fails the request.

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

use postchat_core::transport::{HttpResponse, HttpTransport, TransportError};

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Connection(err.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> std::result::Result<HttpResponse, TransportError> {
        let mut request = self.client.post(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.json(body).send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        Ok(HttpResponse { status, body })
    }
}
