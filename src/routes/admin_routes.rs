use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::admin_dto::{AssistantPayload, DailyCount, DashboardStats, UpdateUserStatusPayload},
    dto::user_dto::UserResponse,
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses((status = 200, description = "Platform-wide statistics"))
)]
#[axum::debug_handler]
pub async fn dashboard(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users_by_status = state.user_service.status_counts().await?;
    let jobs_by_status = state.job_service.count_by_status().await?;
    let total_applications = state.application_service.count().await?;
    let applications_per_day = state
        .application_service
        .daily_counts()
        .await?
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect();

    Ok(Json(DashboardStats {
        users_by_status,
        jobs_by_status,
        total_applications,
        applications_per_day,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub role: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(("role" = Option<String>, Query, description = "Filter by role")),
    responses((status = 200, description = "All users"))
)]
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse> {
    let users = state.user_service.list(query.role).await?;
    let users: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
    Ok(Json(users))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/status",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserStatusPayload,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Unknown status")
    )
)]
#[axum::debug_handler]
pub async fn update_user_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserStatusPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.update_status(id, &payload.status).await?;
    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    post,
    path = "/api/admin/alerts/run",
    responses((status = 200, description = "Alert scan report"))
)]
#[axum::debug_handler]
pub async fn run_alert_scan(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let report = state.alert_service.run_scan().await?;
    Ok(Json(report))
}

#[utoipa::path(
    post,
    path = "/api/admin/assistant",
    request_body = AssistantPayload,
    responses((status = 200, description = "Assistant reply"))
)]
#[axum::debug_handler]
pub async fn assistant(
    State(state): State<AppState>,
    Json(payload): Json<AssistantPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let reply = state.assistant_service.reply(&payload.message).await?;
    Ok(Json(reply))
}
