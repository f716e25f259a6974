//! # postchat
//!
//! Chat completions grounded in a private corpus of blog posts.
//!
//! A conversation arrives with a grounding mode (or the legacy
//! `groundWithPosts` flag). The most recent posts are read from SQLite,
//! stripped of markup, and embedded in a system prompt; a single request
//! goes to an Azure OpenAI deployment; the reply passes through the
//! mode's response policy and is returned.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────────────────────────┐   ┌──────────────┐
//! │  SQLite  │──▶│ ChatService (postchat-core)  │──▶│ Azure OpenAI │
//! │  posts   │   │ retrieve→compose→send→policy │   │ deployment   │
//! └──────────┘   └──────────────┬───────────────┘   └──────────────┘
//!                               │
//!                 ┌─────────────┴─────────────┐
//!                 ▼                           ▼
//!            ┌──────────┐               ┌──────────┐
//!            │   CLI    │               │   HTTP   │
//!            │(postchat)│               │  (axum)  │
//!            └──────────┘               └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! postchat init                              # create database schema
//! postchat posts --limit 10                  # inspect the corpus
//! postchat context --mode dynamic            # print the system prompt
//! postchat chat "What did I write about Rome?"
//! postchat serve                             # start the HTTP API
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and `AZURE_OPENAI_*` overrides |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema creation |
//! | [`sqlite_store`] | SQLite `PostStore` |
//! | [`transport`] | reqwest `HttpTransport` with timeout |
//! | [`chat`] | Service wiring, `chat` and `context` commands |
//! | [`posts`] | `posts` command |
//! | [`server`] | HTTP server |
//! | [`logging`] | tracing subscriber setup |

pub mod chat;
pub mod config;
pub mod db;
pub mod logging;
pub mod migrate;
pub mod posts;
pub mod server;
pub mod sqlite_store;
pub mod transport;
