//! SQLite-backed [`PostStore`] implementation.
//!
//! Reads the `posts` table created by [`crate::migrate`]. The store is
//! read-only: posts are written by the blog application that owns the
//! table.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use postchat_core::models::Post;
use postchat_core::store::PostStore;

/// SQLite implementation of the [`PostStore`] trait.
pub struct SqlitePostStore {
    pool: SqlitePool,
}

impl SqlitePostStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl PostStore for SqlitePostStore {
    async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>> {
        // SQLite sorts NULL lowest, so undated posts fall to the end.
        let rows = sqlx::query(
            "SELECT id, title, date, content FROM posts ORDER BY date DESC, id DESC LIMIT ?",
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| Post {
                id: row.get("id"),
                title: row.get::<Option<String>, _>("title").unwrap_or_default(),
                date: row.get("date"),
                content: row.get::<Option<String>, _>("content").unwrap_or_default(),
            })
            .collect())
    }
}
