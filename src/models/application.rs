use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const APPLICATION_PENDING: &str = "pending";
pub const APPLICATION_ACCEPTED: &str = "accepted";
pub const APPLICATION_REJECTED: &str = "rejected";
pub const APPLICATION_HIRED: &str = "hired";

pub const APPLICATION_STATUSES: &[&str] = &[
    APPLICATION_PENDING,
    APPLICATION_ACCEPTED,
    APPLICATION_REJECTED,
    APPLICATION_HIRED,
];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    pub status: String,
    pub applied_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
