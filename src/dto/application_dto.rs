use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateApplicationPayload {
    pub candidate_id: Uuid,
    pub job_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateApplicationStatusPayload {
    pub company_id: Uuid,
    #[validate(length(min = 1))]
    pub status: String,
}
