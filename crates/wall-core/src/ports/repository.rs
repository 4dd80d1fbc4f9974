use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Post, Report};
use crate::error::RepoError;

/// Generic repository trait defining the append-only CRUD the wall needs.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Returns whether anything was removed;
    /// a missing ID is not an error.
    async fn delete(&self, id: ID) -> Result<bool, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All stored posts, newest first.
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError>;

    /// Physically delete posts created strictly before `cutoff`.
    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, RepoError>;
}

/// Report repository.
#[async_trait]
pub trait ReportRepository: BaseRepository<Report, Uuid> {
    async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Report>, RepoError>;

    /// All reports, newest first.
    async fn list_newest_first(&self) -> Result<Vec<Report>, RepoError>;
}
