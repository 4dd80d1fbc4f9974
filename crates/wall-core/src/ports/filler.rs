//! Filler port - text for automated posts that keep a quiet wall alive.

use async_trait::async_trait;

/// Producer of automated post text.
#[async_trait]
pub trait FillerSource: Send + Sync {
    /// Next text to post, or `None` when the source has nothing to offer.
    async fn next_text(&self) -> Option<String>;
}
