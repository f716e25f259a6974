//! Context retrieval: recent posts rendered as bounded snippets.
//!
//! The retrieval budget is coupled to the mode:
//!
//! | Mode | Posts fetched | Body chars per snippet |
//! |------|---------------|------------------------|
//! | strict | [`STRICT_POST_LIMIT`] | [`STRICT_BODY_CHARS`] |
//! | dynamic | [`DYNAMIC_POST_LIMIT`] | [`DYNAMIC_BODY_CHARS`] |
//!
//! Snippets are recomputed on every request; nothing is cached.

use tracing::debug;

use crate::error::{ChatError, Result};
use crate::mode::Mode;
use crate::snippet::{strip_html, truncate, RetrievedSnippet};
use crate::store::PostStore;

pub const STRICT_POST_LIMIT: usize = 50;
pub const DYNAMIC_POST_LIMIT: usize = 30;
pub const STRICT_BODY_CHARS: usize = 1200;
pub const DYNAMIC_BODY_CHARS: usize = 600;

/// Number of posts fetched for `mode`.
pub fn post_limit(mode: Mode) -> usize {
    match mode {
        Mode::Strict => STRICT_POST_LIMIT,
        Mode::Dynamic => DYNAMIC_POST_LIMIT,
    }
}

/// Maximum body characters per snippet for `mode`, marker excluded.
pub fn body_budget(mode: Mode) -> usize {
    match mode {
        Mode::Strict => STRICT_BODY_CHARS,
        Mode::Dynamic => DYNAMIC_BODY_CHARS,
    }
}

/// Fetch the most recent posts for `mode` and render them as snippets,
/// preserving the store's order.
///
/// An empty store yields an empty list. A store error is fatal and is
/// reported as [`ChatError::Retrieval`].
pub async fn retrieve(store: &dyn PostStore, mode: Mode) -> Result<Vec<RetrievedSnippet>> {
    let limit = post_limit(mode);
    let budget = body_budget(mode);

    let posts = store
        .recent_posts(limit)
        .await
        .map_err(|e| ChatError::Retrieval(format!("{:#}", e)))?;

    debug!(mode = %mode, limit, fetched = posts.len(), "retrieved posts");

    Ok(posts
        .into_iter()
        .take(limit)
        .map(|post| RetrievedSnippet {
            title: post.title,
            date: post.date,
            body: truncate(&strip_html(&post.content), budget),
        })
        .collect())
}
