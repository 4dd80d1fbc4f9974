//! Application state - shared across all handlers.

use std::sync::Arc;

use wall_core::ports::{PostRepository, ReportRepository};
use wall_core::{AbuseFilter, WallService};
use wall_infra::database::{DatabaseConfig, DatabaseConnections};
use wall_infra::{InMemoryPostRepository, InMemoryReportRepository};

#[cfg(feature = "postgres")]
use wall_infra::database::{PostgresPostRepository, PostgresReportRepository};

use crate::config::WallConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub wall: WallService,
    pub db: Option<Arc<DatabaseConnections>>,
}

struct Storage {
    db: Option<Arc<DatabaseConnections>>,
    posts: Arc<dyn PostRepository>,
    reports: Arc<dyn ReportRepository>,
}

impl Storage {
    fn in_memory() -> Self {
        Self {
            db: None,
            posts: Arc::new(InMemoryPostRepository::new()),
            reports: Arc::new(InMemoryReportRepository::new()),
        }
    }
}

impl AppState {
    /// Build the application state with the configured storage backend.
    pub async fn new(db_config: Option<&DatabaseConfig>, wall: &WallConfig) -> Self {
        let storage = connect_storage(db_config).await;
        let state = Self::with_storage(storage, wall);
        tracing::info!(
            ttl_secs = state.wall.policy().ttl.num_seconds(),
            max_post_length = state.wall.policy().max_post_length,
            "Application state initialized"
        );
        state
    }

    /// State backed by the in-memory store.
    #[cfg(test)]
    pub fn in_memory(wall: &WallConfig) -> Self {
        Self::with_storage(Storage::in_memory(), wall)
    }

    fn with_storage(storage: Storage, config: &WallConfig) -> Self {
        let filter = AbuseFilter::new().with_blocked_words(&config.blocked_words);
        let wall = WallService::new(storage.posts, storage.reports, config.policy.clone())
            .with_filter(filter);

        Self {
            wall,
            db: storage.db,
        }
    }
}

#[cfg(feature = "postgres")]
async fn connect_storage(db_config: Option<&DatabaseConfig>) -> Storage {
    let Some(config) = db_config else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return Storage::in_memory();
    };

    match DatabaseConnections::init(config).await {
        Ok(connections) => {
            let conn = Arc::new(connections);
            Storage {
                posts: Arc::new(PostgresPostRepository::new(conn.main.clone())),
                reports: Arc::new(PostgresReportRepository::new(conn.main.clone())),
                db: Some(conn),
            }
        }
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            Storage::in_memory()
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn connect_storage(_db_config: Option<&DatabaseConfig>) -> Storage {
    tracing::info!("Running without postgres feature - using in-memory repository");
    Storage::in_memory()
}
