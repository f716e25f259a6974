//! Core data models that flow through a completion request.
//!
//! Nothing here outlives a single request: posts are read, rendered into
//! snippets, embedded in a prompt, and discarded.

use serde::{Deserialize, Deserializer, Serialize};

use crate::mode::Mode;

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat turn. `content` is never null; an empty string is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Inbound "complete a conversation" request.
///
/// `mode` is the explicit field; `ground_with_posts` is the legacy boolean
/// (`true` → strict, `false` → dynamic). See [`crate::mode::resolve_mode`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRequest {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub mode: Option<Mode>,
    #[serde(default)]
    pub ground_with_posts: Option<bool>,
}

/// A stored post as exposed by the post store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Storage identity; higher ids were stored later.
    pub id: i64,
    pub title: String,
    /// Publication date as stored (e.g. `2024-05-01`), if any.
    pub date: Option<String>,
    /// Raw HTML body.
    pub content: String,
}

/// Outcome of one completion request.
#[derive(Debug, Clone)]
pub struct CompletionResult {
    /// Final text after the response policy.
    pub content: String,
    pub mode: Mode,
    /// Provider JSON exactly as received (`Null` if it was not JSON).
    pub raw: serde_json::Value,
}
