use serde::{Deserialize, Serialize};

use crate::domain::{BroadcastId, LeadId, Segment, Stage};

/// Soft display limit for broadcast text; Telegram's message cap.
pub const MESSAGE_SOFT_LIMIT: usize = 4096;

/// Body of the lead-create call. `telegram_id` is always present on the wire,
/// as an integer or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateLeadRequest {
    pub name: String,
    pub username: Option<String>,
    pub telegram_id: Option<i64>,
    pub stage: Stage,
    pub value: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBroadcastRequest {
    pub name: String,
    pub message: String,
    pub target_segment: Segment,
}

/// Fields read back from a successful lead-create response. Everything but
/// the id is optional and the rest of the body is ignored. Timestamps stay raw
/// because the service does not commit to a format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedLead {
    pub id: LeadId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatedBroadcast {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BroadcastId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipients_count: Option<u64>,
}
