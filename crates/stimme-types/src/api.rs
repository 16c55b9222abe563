use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::Status;
use crate::page::PageInfo;

// -- Public listing --

/// A published voice as the public listing returns it. Status is implied
/// (always APPROVED) and therefore omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceItem {
    pub id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_tags: Option<String>,
    pub created_at: String,
}

/// A voice as the admin dashboard sees it, status included.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminVoiceItem {
    pub id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_tags: Option<String>,
    pub status: Status,
    pub created_at: String,
}

/// Shared listing envelope. `degraded` appears only when the backend
/// failed and the items/pagination are fallback values.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceListResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
    pub items: Vec<T>,
    #[serde(flatten)]
    pub page: PageInfo,
}

// -- Submission intake --

/// Acknowledgment for an accepted submission. Deliberately does not echo
/// the stored text back: the voice is pending review, not published.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAck {
    pub ok: bool,
    pub pending: bool,
    pub message: String,
}

// -- Auth --

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: Option<String>,
}

// -- Generic envelopes --

#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    pub ok: bool,
    pub success: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        OkResponse {
            ok: true,
            success: true,
        }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: ApiError,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
}
