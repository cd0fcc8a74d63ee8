use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PointEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    pub points: i32,
    pub created_at: Option<DateTime<Utc>>,
}

/// Result of running a point mutation through the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointGrant {
    pub points_awarded: i32,
    pub total_points: i32,
    pub level: i32,
    pub leveled_up: bool,
}
