//! Cron-style job scheduler using tokio-cron-scheduler.

#[cfg(feature = "scheduler")]
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Scheduler configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Enable scheduler.
    pub enabled: bool,
    /// Schedule of the expiry sweep (six-field cron, seconds first).
    pub sweep_cron: String,
    /// Schedule of the filler job; `None` disables filler posts.
    pub filler_cron: Option<String>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sweep_cron: "0 */5 * * * *".to_string(),
            filler_cron: Some("0 0 * * * *".to_string()),
        }
    }
}

impl SchedulerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("SCHEDULER_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.enabled),
            sweep_cron: std::env::var("SWEEP_CRON").unwrap_or(defaults.sweep_cron),
            filler_cron: match std::env::var("FILLER_CRON") {
                Ok(v) if v.trim().is_empty() || v == "off" => None,
                Ok(v) => Some(v),
                Err(_) => defaults.filler_cron,
            },
        }
    }
}

/// Cron job scheduler wrapper.
#[cfg(feature = "scheduler")]
pub struct Scheduler {
    inner: JobScheduler,
    config: SchedulerConfig,
}

#[cfg(feature = "scheduler")]
impl Scheduler {
    /// Create a new scheduler.
    pub async fn new(config: SchedulerConfig) -> Result<Self, JobSchedulerError> {
        let inner = JobScheduler::new().await?;
        Ok(Self { inner, config })
    }

    /// Add a cron job.
    ///
    /// # Example
    /// ```ignore
    /// scheduler.add_cron("0 */5 * * * *", || async {
    ///     tracing::info!("Running sweep");
    /// }).await?;
    /// ```
    pub async fn add_cron<F, Fut>(
        &self,
        schedule: &str,
        task: F,
    ) -> Result<uuid::Uuid, JobSchedulerError>
    where
        F: Fn() -> Fut + Send + Sync + Clone + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let job = Job::new_async(schedule, move |_uuid, _lock| {
            let task = task.clone();
            Box::pin(async move {
                task().await;
            })
        })?;

        let id = self.inner.add(job).await?;
        tracing::info!(schedule = %schedule, job_id = %id, "Cron job registered");
        Ok(id)
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), JobSchedulerError> {
        if !self.config.enabled {
            tracing::info!("Scheduler disabled");
            return Ok(());
        }

        self.inner.start().await?;
        tracing::info!("Scheduler started");
        Ok(())
    }

    /// Stop the scheduler.
    pub async fn shutdown(&mut self) -> Result<(), JobSchedulerError> {
        self.inner.shutdown().await?;
        tracing::info!("Scheduler stopped");
        Ok(())
    }
}
