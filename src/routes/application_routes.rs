use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::application_dto::{CreateApplicationPayload, UpdateApplicationStatusPayload},
    error::Result,
    models::application::{APPLICATION_ACCEPTED, APPLICATION_HIRED},
    models::notification::CreateNotification,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = CreateApplicationPayload,
    responses(
        (status = 201, description = "Application created"),
        (status = 409, description = "Already applied to this job")
    )
)]
#[axum::debug_handler]
pub async fn apply(
    State(state): State<AppState>,
    Json(payload): Json<CreateApplicationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state
        .application_service
        .apply(payload.candidate_id, payload.job_id)
        .await?;

    state
        .gamification_service
        .award_action(payload.candidate_id, "APPLY_JOB")
        .await?;
    state
        .gamification_service
        .check_achievements(payload.candidate_id)
        .await?;

    // The posting company hears about the new applicant in-app.
    let job = state.job_service.get(payload.job_id).await?;
    state
        .notification_service
        .create(CreateNotification {
            user_id: job.company_id,
            kind: "application".into(),
            title: format!("New application for {}", job.title),
            body: "A candidate just applied to your posting".into(),
            metadata: Some(serde_json::json!({ "application_id": application.id })),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}/applications",
    params(("id" = Uuid, Path, description = "Candidate ID")),
    responses((status = 200, description = "Applications by the candidate"))
)]
#[axum::debug_handler]
pub async fn list_for_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let applications = state.application_service.list_for_candidate(id).await?;
    Ok(Json(applications))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}/applications",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses((status = 200, description = "Applications for the job"))
)]
#[axum::debug_handler]
pub async fn list_for_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let applications = state.application_service.list_for_job(id).await?;
    Ok(Json(applications))
}

#[utoipa::path(
    post,
    path = "/api/applications/{id}/status",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = UpdateApplicationStatusPayload,
    responses(
        (status = 200, description = "Status updated"),
        (status = 403, description = "Not the owning company")
    )
)]
#[axum::debug_handler]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApplicationStatusPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state
        .application_service
        .update_status(id, payload.company_id, &payload.status)
        .await?;

    let action = match application.status.as_str() {
        APPLICATION_ACCEPTED => Some("APPLICATION_ACCEPTED"),
        APPLICATION_HIRED => Some("HIRED"),
        _ => None,
    };
    if let Some(action) = action {
        state
            .gamification_service
            .award_action(application.candidate_id, action)
            .await?;
        state
            .gamification_service
            .check_achievements(application.candidate_id)
            .await?;
    }

    let job = state.job_service.get(application.job_id).await?;
    state
        .notification_service
        .create(CreateNotification {
            user_id: application.candidate_id,
            kind: "application".into(),
            title: format!("Your application to {} is now {}", job.title, application.status),
            body: format!("The company moved your application to '{}'", application.status),
            metadata: Some(serde_json::json!({ "application_id": application.id })),
        })
        .await?;

    Ok(Json(application))
}
