use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a short public message on the wall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub image_url: Option<String>,
    pub is_automated: bool,
}

impl Post {
    /// Create a new post stamped with the given creation time.
    pub fn new(text: String, image_url: Option<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            created_at,
            image_url,
            is_automated: false,
        }
    }

    /// Mark the post as produced by a background job.
    pub fn automated(mut self) -> Self {
        self.is_automated = true;
        self
    }

    /// Age of the post at `now`. Negative ages (clock skew) clamp to zero.
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        (now - self.created_at).max(Duration::zero())
    }

    /// Whether the post has outlived `ttl` at `now`.
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.age_at(now) > ttl
    }

    /// Lifetime left at `now`, floored at zero.
    pub fn remaining_at(&self, ttl: Duration, now: DateTime<Utc>) -> Duration {
        (ttl - self.age_at(now)).max(Duration::zero())
    }
}

/// A live post together with its remaining lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePost {
    pub post: Post,
    pub remaining: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary() {
        let created = Utc::now();
        let post = Post::new("hello".into(), None, created);
        let ttl = Duration::seconds(60);

        assert!(!post.is_expired(ttl, created + ttl));
        assert!(post.is_expired(ttl, created + ttl + Duration::milliseconds(1)));
    }

    #[test]
    fn test_remaining_is_floored() {
        let created = Utc::now();
        let post = Post::new("hello".into(), None, created);
        let ttl = Duration::seconds(60);

        assert_eq!(
            post.remaining_at(ttl, created + Duration::seconds(20)),
            Duration::seconds(40)
        );
        assert_eq!(
            post.remaining_at(ttl, created + Duration::seconds(90)),
            Duration::zero()
        );
    }
}
