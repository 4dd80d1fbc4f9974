use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Report entity - an advisory flag raised against a post.
///
/// The referenced post may already be gone; reports are never reconciled
/// against deletions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub post_id: Uuid,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Report {
    pub fn new(post_id: Uuid, reason: Option<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            reason,
            created_at,
        }
    }
}
