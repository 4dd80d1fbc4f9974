//! Wall maintenance jobs run by the scheduler.

use std::sync::Arc;

use tokio_cron_scheduler::JobSchedulerError;

use wall_core::WallService;
use wall_core::domain::Post;
use wall_core::ports::FillerSource;

use super::{Scheduler, SchedulerConfig};

/// Delete expired posts without waiting for a read.
pub async fn sweep_expired(wall: &WallService) -> u64 {
    match wall.sweep_expired().await {
        Ok(purged) => {
            if purged > 0 {
                tracing::info!(purged, "Scheduled sweep removed expired posts");
            }
            purged
        }
        Err(e) => {
            tracing::error!(error = %e, "Scheduled sweep failed");
            0
        }
    }
}

/// Post one automated message, but only when the wall is empty.
pub async fn post_filler(wall: &WallService, source: &dyn FillerSource) -> Option<Post> {
    match wall.list_active().await {
        Ok(active) if !active.is_empty() => {
            tracing::debug!(active = active.len(), "Wall has live posts, skipping filler");
            return None;
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(error = %e, "Could not read wall for filler job");
            return None;
        }
    }

    let text = source.next_text().await?;
    match wall.submit_automated(&text, None).await {
        Ok(post) => {
            tracing::info!(post_id = %post.id, "Filler post added");
            Some(post)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Filler text was not accepted");
            None
        }
    }
}

/// Register the sweep and filler jobs.
pub async fn register(
    scheduler: &Scheduler,
    config: &SchedulerConfig,
    wall: WallService,
    filler: Arc<dyn FillerSource>,
) -> Result<(), JobSchedulerError> {
    let sweep_wall = wall.clone();
    scheduler
        .add_cron(&config.sweep_cron, move || {
            let wall = sweep_wall.clone();
            async move {
                sweep_expired(&wall).await;
            }
        })
        .await?;

    if let Some(schedule) = &config.filler_cron {
        scheduler
            .add_cron(schedule, move || {
                let wall = wall.clone();
                let filler = filler.clone();
                async move {
                    post_filler(&wall, filler.as_ref()).await;
                }
            })
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use wall_core::WallPolicy;
    use wall_core::ports::ManualClock;
    use wall_infra::{InMemoryPostRepository, InMemoryReportRepository, RotatingFillerSource};

    fn wall(clock: Arc<ManualClock>) -> WallService {
        WallService::new(
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryReportRepository::new()),
            WallPolicy {
                ttl: Duration::minutes(5),
                max_post_length: 280,
            },
        )
        .with_clock(clock)
    }

    #[tokio::test]
    async fn test_filler_only_posts_on_empty_wall() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let wall = wall(clock.clone());
        let source = RotatingFillerSource::new(["first filler", "second filler"]);

        let post = post_filler(&wall, &source).await.unwrap();
        assert!(post.is_automated);
        assert_eq!(post.text, "first filler");

        assert!(post_filler(&wall, &source).await.is_none());

        clock.advance(Duration::minutes(6));
        let post = post_filler(&wall, &source).await.unwrap();
        assert_eq!(post.text, "second filler");
    }

    #[tokio::test]
    async fn test_filler_text_still_goes_through_filter() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let wall = wall(clock);
        let source = RotatingFillerSource::new(["BUY NOW!!!!!"]);

        assert!(post_filler(&wall, &source).await.is_none());
        assert!(wall.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sweep_counts_expired() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let wall = wall(clock.clone());
        wall.submit("short lived", None).await.unwrap();

        assert_eq!(sweep_expired(&wall).await, 0);
        clock.advance(Duration::minutes(6));
        assert_eq!(sweep_expired(&wall).await, 1);
    }
}
