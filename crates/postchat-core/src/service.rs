//! Completion orchestration.
//!
//! [`ChatService`] is the single entry point for "complete a conversation".
//! Each call is a stateless pass:
//!
//! 1. Validate provider settings (no I/O if they are incomplete).
//! 2. Resolve the effective [`Mode`].
//! 3. Retrieve snippets from the [`PostStore`].
//! 4. Compose the prompt.
//! 5. Send one completion request over the [`HttpTransport`].
//! 6. Apply the response policy.
//!
//! Steps run strictly in sequence. The service holds no mutable state, so
//! one instance can serve any number of concurrent requests.

use std::sync::Arc;

use tracing::info;

use crate::completion::{CompletionClient, ProviderConfig, ProviderSettings};
use crate::error::Result;
use crate::models::{CompletionResult, ConversationRequest, Message};
use crate::mode::{resolve_mode, Mode};
use crate::policy::apply_policy;
use crate::prompt::compose;
use crate::retrieve::retrieve;
use crate::store::PostStore;
use crate::transport::HttpTransport;

/// Drives retrieval, composition, the provider call, and the policy.
pub struct ChatService {
    store: Arc<dyn PostStore>,
    transport: Arc<dyn HttpTransport>,
    settings: ProviderSettings,
}

impl ChatService {
    pub fn new(
        store: Arc<dyn PostStore>,
        transport: Arc<dyn HttpTransport>,
        settings: ProviderSettings,
    ) -> Self {
        Self {
            store,
            transport,
            settings,
        }
    }

    /// Complete a conversation.
    pub async fn complete(&self, request: &ConversationRequest) -> Result<CompletionResult> {
        let config = ProviderConfig::from_settings(&self.settings)?;
        let mode = resolve_mode(request.mode, request.ground_with_posts);

        let snippets = retrieve(self.store.as_ref(), mode).await?;
        let messages = compose(mode, &snippets, &request.messages);
        let reply = CompletionClient::new(self.transport.as_ref())
            .send(&config, &messages, mode)
            .await?;
        let content = apply_policy(mode, reply.content);

        info!(
            mode = %mode,
            snippets = snippets.len(),
            turns = messages.len() - 1,
            "completion finished"
        );

        Ok(CompletionResult {
            content,
            mode,
            raw: reply.raw,
        })
    }

    /// Retrieve context for `mode` and compose the outgoing message list.
    ///
    /// Does not contact the provider; used for prompt inspection as well.
    pub async fn prepare(&self, mode: Mode, history: &[Message]) -> Result<Vec<Message>> {
        let snippets = retrieve(self.store.as_ref(), mode).await?;
        Ok(compose(mode, &snippets, history))
    }
}
