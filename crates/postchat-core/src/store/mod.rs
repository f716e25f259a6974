//! Read-only access to the post corpus.
//!
//! The [`PostStore`] trait is the only capability the completion pipeline
//! needs from storage: "give me the N most recent posts". The root package
//! implements it over SQLite; [`memory::InMemoryPostStore`] serves tests
//! and embedders.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::Post;

/// Abstract post source.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Return up to `limit` posts, newest `date` first.
    ///
    /// Posts with equal dates are ordered by storage order, most recently
    /// stored first. Posts without a date come after all dated posts.
    async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>>;
}
