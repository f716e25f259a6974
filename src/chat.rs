//! Service wiring and the `chat` / `context` CLI commands.
//!
//! [`build_service`] assembles a [`ChatService`] from configuration: the
//! SQLite post store, the reqwest transport with the configured timeout,
//! and the provider settings (file values overlaid with environment).

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use postchat_core::models::{ConversationRequest, Message};
use postchat_core::{ChatService, Mode};

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqlitePostStore;
use crate::transport::ReqwestTransport;

/// Build the completion service described by `config`.
pub async fn build_service(config: &Config) -> Result<ChatService> {
    let pool = db::connect(config).await?;
    let transport = ReqwestTransport::new(Duration::from_secs(config.provider.timeout_secs))
        .context("Failed to build HTTP client")?;

    Ok(ChatService::new(
        Arc::new(SqlitePostStore::new(pool)),
        Arc::new(transport),
        config.provider.settings(),
    ))
}

/// CLI entry point for `postchat chat`.
///
/// `no_ground` is the legacy flag: it sends `groundWithPosts = false`,
/// which only takes effect when `mode` is not given.
pub async fn run_chat(
    config: &Config,
    message: &str,
    mode: Option<Mode>,
    no_ground: bool,
) -> Result<()> {
    let service = build_service(config).await?;
    let request = ConversationRequest {
        messages: vec![Message::user(message)],
        mode,
        ground_with_posts: no_ground.then_some(false),
    };

    let result = service.complete(&request).await?;
    tracing::debug!(mode = %result.mode, "chat finished");
    println!("{}", result.content);
    Ok(())
}

/// CLI entry point for `postchat context`: print the system prompt that
/// would be sent for `mode`, without calling the provider.
pub async fn run_context(config: &Config, mode: Mode) -> Result<()> {
    let service = build_service(config).await?;
    let messages = service.prepare(mode, &[]).await?;

    println!("--- System prompt ({}) ---", mode);
    for message in &messages {
        println!("{}", message.content);
    }
    Ok(())
}
