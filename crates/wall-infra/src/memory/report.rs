use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use wall_core::domain::Report;
use wall_core::error::RepoError;
use wall_core::ports::{BaseRepository, ReportRepository};

/// Append-only report log.
#[derive(Default)]
pub struct InMemoryReportRepository {
    store: RwLock<Vec<Report>>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Report, Uuid> for InMemoryReportRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, report: Report) -> Result<Report, RepoError> {
        self.store.write().await.push(report.clone());
        Ok(report)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|r| r.id != id);
        Ok(store.len() != before)
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Report>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().filter(|r| r.post_id == post_id).cloned().collect())
    }

    async fn list_newest_first(&self) -> Result<Vec<Report>, RepoError> {
        let mut reports = self.store.read().await.clone();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_reports_by_post() {
        let repo = InMemoryReportRepository::new();
        let post_id = Uuid::new_v4();
        repo.insert(Report::new(post_id, Some("spam".into()), Utc::now()))
            .await
            .unwrap();
        repo.insert(Report::new(Uuid::new_v4(), None, Utc::now()))
            .await
            .unwrap();

        let reports = repo.find_by_post_id(post_id).await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].reason.as_deref(), Some("spam"));
    }
}
