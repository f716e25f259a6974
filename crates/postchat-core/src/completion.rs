//! Azure OpenAI chat-completions client.
//!
//! Translates a composed message list into one provider request:
//!
//! ```text
//! POST {endpoint}/openai/deployments/{deployment}/chat/completions?api-version={version}
//! api-key: <key>
//! Content-Type: application/json
//!
//! { "messages": [...], "temperature": 0.4 | 0.8, "max_tokens": 500 }
//! ```
//!
//! # Failure handling
//!
//! - Non-2xx status → [`ChatError::Provider`] with status and body text.
//! - Transport failure (timeout, refused connection) → [`ChatError::Transport`].
//! - 2xx with an unexpected body → empty content, logged as a warning.
//!
//! Nothing is retried.

use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::error::{ChatError, Result};
use crate::models::Message;
use crate::mode::Mode;
use crate::transport::HttpTransport;

/// API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

/// Upper bound on generated tokens per completion.
pub const MAX_TOKENS: u32 = 500;

/// Sampling temperature for `mode`: literal in strict, freer in dynamic.
pub fn temperature(mode: Mode) -> f64 {
    match mode {
        Mode::Strict => 0.4,
        Mode::Dynamic => 0.8,
    }
}

/// Provider settings as read from configuration, possibly incomplete.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub deployment: Option<String>,
    pub api_version: Option<String>,
}

/// Validated provider configuration.
#[derive(Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub endpoint: String,
    pub deployment: String,
    pub api_version: String,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .finish()
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl ProviderConfig {
    /// Validate settings. Empty strings count as missing.
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self> {
        let mut missing = Vec::new();
        let api_key = present(&settings.api_key);
        let endpoint = present(&settings.endpoint);
        let deployment = present(&settings.deployment);
        if api_key.is_none() {
            missing.push("api_key");
        }
        if endpoint.is_none() {
            missing.push("endpoint");
        }
        if deployment.is_none() {
            missing.push("deployment");
        }

        match (api_key, endpoint, deployment) {
            (Some(api_key), Some(endpoint), Some(deployment)) => Ok(Self {
                api_key,
                endpoint,
                deployment,
                api_version: present(&settings.api_version)
                    .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            }),
            _ => Err(ChatError::Configuration(format!(
                "missing provider setting(s): {}",
                missing.join(", ")
            ))),
        }
    }

    /// Chat-completions URL for this deployment.
    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}

/// The subset of the provider response that is read. Every level is
/// optional so a partial body degrades to empty content.
#[derive(Debug, Default, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Default, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Default, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Raw completion as returned by the provider, before any policy.
#[derive(Debug, Clone)]
pub struct ProviderReply {
    /// `choices[0].message.content`, or empty when absent.
    pub content: String,
    /// Parsed response body, `Null` if it was not JSON.
    pub raw: serde_json::Value,
}

/// Extract `choices[0].message.content` from a success body.
///
/// Returns `None` for the content when the body is not JSON or has an
/// unexpected shape.
pub fn parse_reply(body: &str) -> (Option<String>, serde_json::Value) {
    let raw: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return (None, serde_json::Value::Null),
    };
    let content = serde_json::from_value::<ChatCompletionResponse>(raw.clone())
        .ok()
        .and_then(|r| r.choices.into_iter().next())
        .and_then(|c| c.message)
        .and_then(|m| m.content);
    (content, raw)
}

/// Sends composed conversations to the provider over an [`HttpTransport`].
pub struct CompletionClient<'a> {
    transport: &'a dyn HttpTransport,
}

impl<'a> CompletionClient<'a> {
    pub fn new(transport: &'a dyn HttpTransport) -> Self {
        Self { transport }
    }

    /// Send one completion request and return the raw reply.
    pub async fn send(
        &self,
        config: &ProviderConfig,
        messages: &[Message],
        mode: Mode,
    ) -> Result<ProviderReply> {
        let url = config.completions_url();
        let temp = temperature(mode);
        let body = serde_json::json!({
            "messages": messages,
            "temperature": temp,
            "max_tokens": MAX_TOKENS,
        });

        debug!(
            url = %url,
            temperature = temp,
            messages = messages.len(),
            "sending completion request"
        );

        let headers = [
            ("api-key", config.api_key.as_str()),
            ("Content-Type", "application/json"),
        ];
        let response = self.transport.post_json(&url, &headers, &body).await?;

        if !response.is_success() {
            error!(status = response.status, "provider returned an error");
            return Err(ChatError::Provider {
                status: response.status,
                body: response.body,
            });
        }

        let (content, raw) = parse_reply(&response.body);
        let content = content.unwrap_or_else(|| {
            warn!(
                status = response.status,
                "provider response had no choices[0].message.content; using empty content"
            );
            String::new()
        });

        Ok(ProviderReply { content, raw })
    }
}
