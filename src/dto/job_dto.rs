use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::job::Job;
use crate::services::job_service::JobList;
use crate::services::match_service::ScoredJob;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPayload {
    pub company_id: Uuid,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[validate(length(min = 1))]
    pub location: String,
    pub salary_from: Option<Decimal>,
    pub salary_to: Option<Decimal>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateJobPayload {
    pub company_id: Uuid,
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
    pub salary_from: Option<Decimal>,
    pub salary_to: Option<Decimal>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteJobPayload {
    pub company_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub requirements: Vec<String>,
    pub location: String,
    pub salary_from: Option<Decimal>,
    pub salary_to: Option<Decimal>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Job> for JobResponse {
    fn from(j: Job) -> Self {
        Self {
            id: j.id,
            company_id: j.company_id,
            title: j.title,
            description: j.description,
            requirements: j.requirements,
            location: j.location,
            salary_from: j.salary_from,
            salary_to: j.salary_to,
            status: j.status,
            created_at: j.created_at,
            updated_at: j.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobListResponse {
    pub items: Vec<JobResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl From<JobList> for JobListResponse {
    fn from(list: JobList) -> Self {
        Self {
            items: list.items.into_iter().map(Into::into).collect(),
            total: list.total,
            page: list.page,
            per_page: list.per_page,
            total_pages: list.total_pages,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationQuery {
    pub candidate_id: Uuid,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendedJob {
    pub job: JobResponse,
    pub score: f64,
}

impl From<ScoredJob> for RecommendedJob {
    fn from(s: ScoredJob) -> Self {
        Self {
            job: s.job.into(),
            score: s.score,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub items: Vec<RecommendedJob>,
}
