//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use wall_core::domain::{Post, Report};
use wall_core::error::RepoError;
use wall_core::ports::{PostRepository, ReportRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::report::{self, Entity as ReportEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL report repository.
pub type PostgresReportRepository = PostgresBaseRepository<ReportEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, RepoError> {
        let cutoff: DateTimeWithTimeZone = cutoff.into();
        let result = PostEntity::delete_many()
            .filter(post::Column::CreatedAt.lt(cutoff))
            .exec(&self.db)
            .await
            .map_err(repo_error)?;

        tracing::debug!(rows = result.rows_affected, "Deleted expired posts");
        Ok(result.rows_affected)
    }
}

#[async_trait]
impl ReportRepository for PostgresReportRepository {
    async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Report>, RepoError> {
        let result = ReportEntity::find()
            .filter(report::Column::PostId.eq(post_id))
            .order_by_desc(report::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn list_newest_first(&self) -> Result<Vec<Report>, RepoError> {
        let result = ReportEntity::find()
            .order_by_desc(report::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
