use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_dto::{
        CreateJobPayload, DeleteJobPayload, JobListQuery, JobListResponse, JobResponse,
        RecommendationQuery, RecommendationResponse, RecommendedJob, UpdateJobPayload,
    },
    error::Result,
    models::job::JOB_OPEN,
    services::match_service::{self, MIN_RECOMMENDATION_SCORE},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created"),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Not a company account")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.create(payload).await?;

    state
        .gamification_service
        .award_action(job.company_id, "JOB_POSTED")
        .await?;
    state
        .gamification_service
        .check_achievements(job.company_id)
        .await?;

    // On-demand alert path: published postings notify matching candidates
    // in the background, the request does not wait for email fan-out.
    if job.status == JOB_OPEN {
        let alert_service = state.alert_service.clone();
        let published = job.clone();
        tokio::spawn(async move {
            if let Err(e) = alert_service.notify_for_job(&published).await {
                tracing::error!(job_id = %published.id, error = ?e, "job alert fan-out failed");
            }
        });
    }

    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    get,
    path = "/api/jobs",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("search" = Option<String>, Query, description = "Search query")
    ),
    responses((status = 200, description = "List of jobs"))
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.job_service.list(query).await?;
    Ok(Json(JobListResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/jobs/recommendations",
    params(
        ("candidate_id" = Uuid, Query, description = "Candidate to recommend for"),
        ("limit" = Option<usize>, Query, description = "Max results")
    ),
    responses((status = 200, description = "Ranked job recommendations"))
)]
#[axum::debug_handler]
pub async fn recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendationQuery>,
) -> Result<impl IntoResponse> {
    let limit = query.limit.unwrap_or(10).clamp(1, 50);

    // A missing candidate yields an empty list, not an error.
    let Some(user) = state.user_service.get_optional(query.candidate_id).await? else {
        return Ok(Json(RecommendationResponse { items: vec![] }));
    };

    let jobs = state.job_service.list_open().await?;
    let scored = match_service::score_all(&user, jobs, crate::utils::time::now());
    let ranked = match_service::rank(scored, limit, MIN_RECOMMENDATION_SCORE);

    Ok(Json(RecommendationResponse {
        items: ranked.into_iter().map(RecommendedJob::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job found"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get(id).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    patch,
    path = "/api/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Job updated"),
        (status = 403, description = "Not the owning company"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.update(id, payload).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 403, description = "Not the owning company")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DeleteJobPayload>,
) -> Result<impl IntoResponse> {
    state.job_service.delete(id, payload.company_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
