use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessagePayload {
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    #[validate(length(min = 1, max = 4000))]
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkReadPayload {
    pub peer_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnreadCountResponse {
    pub unread: i64,
}
