use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserStatusPayload {
    #[validate(length(min = 1))]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssistantPayload {
    #[validate(length(min = 1, max = 1000))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub users_by_status: HashMap<String, i64>,
    pub jobs_by_status: HashMap<String, i64>,
    pub total_applications: i64,
    pub applications_per_day: Vec<DailyCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyCount {
    pub date: String,
    pub count: i64,
}
