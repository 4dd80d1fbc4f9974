//! The wall: admission, expiry, deletion and reporting of posts.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::instrument;
use uuid::Uuid;

use crate::domain::{ActivePost, Post, Report};
use crate::error::DomainError;
use crate::moderation::AbuseFilter;
use crate::ports::{Clock, PostRepository, ReportRepository, SystemClock};

/// Longest accepted image reference.
pub const MAX_IMAGE_URL_LENGTH: usize = 2048;
/// Longest accepted report reason.
pub const MAX_REPORT_REASON_LENGTH: usize = 500;

/// Admission and expiry rules shared by the write and read paths.
#[derive(Debug, Clone)]
pub struct WallPolicy {
    /// How long a post stays visible after creation.
    pub ttl: Duration,
    /// Maximum text length in characters, after trimming.
    pub max_post_length: usize,
}

impl Default for WallPolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::hours(24),
            max_post_length: 280,
        }
    }
}

/// Message wall service.
#[derive(Clone)]
pub struct WallService {
    posts: Arc<dyn PostRepository>,
    reports: Arc<dyn ReportRepository>,
    filter: Arc<AbuseFilter>,
    clock: Arc<dyn Clock>,
    policy: WallPolicy,
}

impl WallService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        reports: Arc<dyn ReportRepository>,
        policy: WallPolicy,
    ) -> Self {
        Self {
            posts,
            reports,
            filter: Arc::new(AbuseFilter::new()),
            clock: Arc::new(SystemClock),
            policy,
        }
    }

    pub fn with_filter(mut self, filter: AbuseFilter) -> Self {
        self.filter = Arc::new(filter);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn policy(&self) -> &WallPolicy {
        &self.policy
    }

    /// Validate and store a user post.
    ///
    /// Surrounding whitespace is trimmed first; the emptiness and length
    /// checks apply to the trimmed text, which is what gets stored.
    #[instrument(skip(self, text, image_url))]
    pub async fn submit(&self, text: &str, image_url: Option<&str>) -> Result<Post, DomainError> {
        self.admit(text, image_url, false).await
    }

    /// Validate and store a post produced by a background job.
    #[instrument(skip(self, text, image_url))]
    pub async fn submit_automated(
        &self,
        text: &str,
        image_url: Option<&str>,
    ) -> Result<Post, DomainError> {
        self.admit(text, image_url, true).await
    }

    /// Purge expired posts, then return the live ones newest first.
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> Result<Vec<ActivePost>, DomainError> {
        let now = self.clock.now();
        self.sweep_before(self.cutoff(now)).await?;

        // A post inserted behind the sweep is still held to the cutoff.
        let active = self
            .posts
            .list_newest_first()
            .await?
            .into_iter()
            .filter(|post| !post.is_expired(self.policy.ttl, now))
            .map(|post| ActivePost {
                remaining: post.remaining_at(self.policy.ttl, now),
                post,
            })
            .collect();

        Ok(active)
    }

    /// Physically delete every post past its TTL.
    pub async fn sweep_expired(&self) -> Result<u64, DomainError> {
        let now = self.clock.now();
        self.sweep_before(self.cutoff(now)).await
    }

    /// Remove a post. Unknown IDs are a no-op.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let removed = self.posts.delete(id).await?;
        tracing::info!(post_id = %id, removed, "Post delete requested");
        Ok(())
    }

    /// Record a report against a post. The post is not required to exist.
    #[instrument(skip(self, reason))]
    pub async fn report(&self, post_id: Uuid, reason: Option<&str>) -> Result<Report, DomainError> {
        let reason = match reason.map(str::trim).filter(|r| !r.is_empty()) {
            Some(r) if r.chars().count() > MAX_REPORT_REASON_LENGTH => {
                return Err(DomainError::Validation(format!(
                    "Report reason exceeds {MAX_REPORT_REASON_LENGTH} characters"
                )));
            }
            other => other.map(str::to_string),
        };

        let report = Report::new(post_id, reason, self.clock.now());
        let report = self.reports.insert(report).await?;
        tracing::info!(report_id = %report.id, post_id = %post_id, "Post reported");
        Ok(report)
    }

    /// All reports, newest first.
    pub async fn list_reports(&self) -> Result<Vec<Report>, DomainError> {
        Ok(self.reports.list_newest_first().await?)
    }

    async fn admit(
        &self,
        text: &str,
        image_url: Option<&str>,
        automated: bool,
    ) -> Result<Post, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::Validation("Message text is required".to_string()));
        }
        if text.chars().count() > self.policy.max_post_length {
            return Err(DomainError::Validation(format!(
                "Message exceeds {} characters",
                self.policy.max_post_length
            )));
        }
        if let Some(kind) = self.filter.check(text) {
            tracing::info!(reason = ?kind, automated, "Post rejected by abuse filter");
            return Err(DomainError::Rejected(kind));
        }
        let image_url = normalize_image_url(image_url)?;

        let mut post = Post::new(text.to_string(), image_url, self.clock.now());
        if automated {
            post = post.automated();
        }

        let post = self.posts.insert(post).await?;
        tracing::info!(post_id = %post.id, automated, "Post accepted");
        Ok(post)
    }

    async fn sweep_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let purged = self.posts.delete_created_before(cutoff).await?;
        if purged > 0 {
            tracing::debug!(purged, %cutoff, "Expired posts purged");
        }
        Ok(purged)
    }

    /// Creation time before which posts are expired. Saturates at the
    /// earliest representable time for TTLs reaching past it.
    fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.policy.ttl)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

fn normalize_image_url(image_url: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(url) = image_url.map(str::trim).filter(|u| !u.is_empty()) else {
        return Ok(None);
    };

    if url.len() > MAX_IMAGE_URL_LENGTH {
        return Err(DomainError::Validation(format!(
            "Image reference exceeds {MAX_IMAGE_URL_LENGTH} characters"
        )));
    }
    let lower = url.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return Err(DomainError::Validation(
            "Image reference must be an http(s) URL".to_string(),
        ));
    }
    Ok(Some(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_normalisation() {
        assert_eq!(normalize_image_url(None).unwrap(), None);
        assert_eq!(normalize_image_url(Some("   ")).unwrap(), None);
        assert_eq!(
            normalize_image_url(Some(" https://img.example/a.png ")).unwrap(),
            Some("https://img.example/a.png".to_string())
        );
        assert!(matches!(
            normalize_image_url(Some("javascript:alert(1)")),
            Err(DomainError::Validation(_))
        ));

        let long = format!("https://{}", "a".repeat(MAX_IMAGE_URL_LENGTH));
        assert!(normalize_image_url(Some(&long)).is_err());
    }
}
