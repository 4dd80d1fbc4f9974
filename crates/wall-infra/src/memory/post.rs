use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use wall_core::domain::Post;
use wall_core::error::RepoError;
use wall_core::ports::{BaseRepository, PostRepository};

/// Post store behind an async RwLock; the lock serializes writers.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored posts, expired or not.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        Ok(self.store.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self.store.read().await.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, RepoError> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|_, post| post.created_at >= cutoff);
        Ok((before - store.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryPostRepository::new();
        let post = repo
            .insert(Post::new("hello".into(), None, Utc::now()))
            .await
            .unwrap();

        let found = repo.find_by_id(post.id).await.unwrap();
        assert_eq!(found, Some(post));
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let repo = InMemoryPostRepository::new();
        repo.insert(Post::new("keep".into(), None, Utc::now()))
            .await
            .unwrap();

        assert!(!repo.delete(Uuid::new_v4()).await.unwrap());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = InMemoryPostRepository::new();
        let base = Utc::now();
        for offset in [5, 1, 3] {
            repo.insert(Post::new(
                format!("post {offset}"),
                None,
                base + Duration::seconds(offset),
            ))
            .await
            .unwrap();
        }

        let texts: Vec<String> = repo
            .list_newest_first()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.text)
            .collect();
        assert_eq!(texts, ["post 5", "post 3", "post 1"]);
    }

    #[tokio::test]
    async fn test_delete_created_before_keeps_cutoff() {
        let repo = InMemoryPostRepository::new();
        let cutoff = Utc::now();
        repo.insert(Post::new("old".into(), None, cutoff - Duration::seconds(1)))
            .await
            .unwrap();
        repo.insert(Post::new("edge".into(), None, cutoff))
            .await
            .unwrap();

        assert_eq!(repo.delete_created_before(cutoff).await.unwrap(), 1);
        let remaining = repo.list_newest_first().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].text, "edge");
    }
}
