//! # postchat core
//!
//! Runtime-agnostic completion orchestration for postchat: grounding
//! modes, context retrieval over a [`store::PostStore`], prompt
//! composition, the Azure OpenAI chat-completions client over an
//! injected [`transport::HttpTransport`], and the response policy.
//!
//! This crate contains no tokio, sqlx, reqwest, or axum dependency. The
//! root `postchat` package supplies the SQLite store, the reqwest
//! transport, the HTTP server, and the CLI.
//!
//! ```text
//! ConversationRequest
//!        │ resolve_mode
//!        ▼
//!   retrieve ──▶ compose ──▶ CompletionClient::send ──▶ apply_policy
//!  (PostStore)              (HttpTransport)
//!        │
//!        ▼
//!  CompletionResult { content, mode, raw }
//! ```

pub mod completion;
pub mod error;
pub mod models;
pub mod mode;
pub mod policy;
pub mod prompt;
pub mod retrieve;
pub mod service;
pub mod snippet;
pub mod store;
pub mod transport;

pub use error::{ChatError, Result};
pub use mode::{resolve_mode, Mode};
pub use service::ChatService;
