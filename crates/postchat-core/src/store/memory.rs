//! In-memory [`PostStore`] implementation for testing and embedding.
//!
//! Posts live in a `Vec` behind `std::sync::RwLock`; ids are assigned in
//! insertion order, matching an auto-increment column.

use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::models::Post;

use super::PostStore;

/// In-memory post store.
pub struct InMemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }

    /// Store a post and return its assigned id.
    pub fn insert(&self, title: &str, date: Option<&str>, content: &str) -> i64 {
        let mut posts = self.posts.write().unwrap_or_else(|e| e.into_inner());
        let id = posts.len() as i64 + 1;
        posts.push(Post {
            id,
            title: title.to_string(),
            date: date.map(str::to_string),
            content: content.to_string(),
        });
        id
    }

    pub fn len(&self) -> usize {
        self.posts.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>> {
        let posts = self
            .posts
            .read()
            .map_err(|_| anyhow!("post store lock poisoned"))?;

        let mut sorted: Vec<Post> = posts.clone();
        // Option<String> orders None first, so reversing puts undated last.
        sorted.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        sorted.truncate(limit);
        Ok(sorted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn newest_first_with_storage_order_tiebreak() {
        let store = InMemoryPostStore::new();
        store.insert("old", Some("2023-01-01"), "a");
        store.insert("same-day first", Some("2024-03-03"), "b");
        store.insert("same-day second", Some("2024-03-03"), "c");
        store.insert("undated", None, "d");
        store.insert("newest", Some("2024-12-31"), "e");

        let titles: Vec<String> = store
            .recent_posts(10)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(
            titles,
            vec!["newest", "same-day second", "same-day first", "old", "undated"]
        );
    }

    #[tokio::test]
    async fn respects_limit() {
        let store = InMemoryPostStore::new();
        for i in 0..5 {
            let date = format!("2024-01-0{}", i + 1);
            store.insert(&format!("p{}", i), Some(date.as_str()), "");
        }
        let posts = store.recent_posts(2).await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "p4");
        assert_eq!(posts[1].title, "p3");
    }

    #[tokio::test]
    async fn empty_store() {
        let store = InMemoryPostStore::default();
        assert!(store.is_empty());
        assert!(store.recent_posts(50).await.unwrap().is_empty());
    }
}
