//! `postchat posts`: list the posts the assistant would see.

use anyhow::Result;

use postchat_core::snippet::{strip_html, truncate};
use postchat_core::store::PostStore;

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqlitePostStore;

const PREVIEW_CHARS: usize = 60;

/// CLI entry point: prints the most recent posts, newest first.
pub async fn run_posts(config: &Config, limit: usize) -> Result<()> {
    let pool = db::connect(config).await?;
    let store = SqlitePostStore::new(pool);
    let posts = store.recent_posts(limit).await?;
    store.pool().close().await;

    if posts.is_empty() {
        println!("No posts.");
        return Ok(());
    }

    println!("{:<6} {:<12} {:<32} PREVIEW", "ID", "DATE", "TITLE");
    for post in &posts {
        println!(
            "{:<6} {:<12} {:<32} {}",
            post.id,
            post.date.as_deref().unwrap_or("-"),
            truncate(&post.title, 30),
            truncate(&strip_html(&post.content), PREVIEW_CHARS)
        );
    }
    println!();
    println!("{} post(s)", posts.len());

    Ok(())
}
