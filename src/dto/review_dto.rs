use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::review::Review;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReviewPayload {
    pub author_id: Uuid,
    pub company_id: Uuid,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyReviewsResponse {
    pub items: Vec<Review>,
    pub average_rating: Option<f64>,
}
