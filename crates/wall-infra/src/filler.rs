//! Built-in filler source for automated wall posts.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use wall_core::ports::FillerSource;

const DEFAULT_PHRASES: &[&str] = &[
    "The wall is quiet. Say something nice!",
    "Posts here fade away after a while, so make them count.",
    "Tip: you can attach an image link to your message.",
    "Be kind. Reported posts are reviewed.",
];

/// Cycles through a fixed list of phrases in order.
pub struct RotatingFillerSource {
    phrases: Vec<String>,
    cursor: AtomicUsize,
}

impl RotatingFillerSource {
    /// Source over `phrases`; blank entries are dropped.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.trim().is_empty())
                .collect(),
            cursor: AtomicUsize::new(0),
        }
    }
}

impl Default for RotatingFillerSource {
    fn default() -> Self {
        Self::new(DEFAULT_PHRASES.iter().copied())
    }
}

#[async_trait]
impl FillerSource for RotatingFillerSource {
    async fn next_text(&self) -> Option<String> {
        if self.phrases.is_empty() {
            return None;
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.phrases.len();
        Some(self.phrases[index].clone())
    }
}
