//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to put a message on the wall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPostRequest {
    pub text: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A live post as shown on the wall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub text: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_automated: bool,
    /// Seconds until the post disappears, never negative.
    pub remaining_seconds: i64,
}

/// Request to report a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportPostRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

/// A stored report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    pub id: String,
    pub post_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created_at: String,
}
