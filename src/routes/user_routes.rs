use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::user_dto::{
        AchievementView, GamificationSummary, RegisterUserPayload, UpdateProfilePayload,
        UserResponse,
    },
    error::Result,
    services::achievements,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/users/register",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "User registered"),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.register(payload).await?;
    let _ = state
        .gamification_service
        .award_action(user.id, "REGISTER")
        .await?;
    let user = state.user_service.get(user.id).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.get(id).await?;
    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}/profile",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Profile updated"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let before = state.user_service.get(id).await?;
    let user = state.user_service.update_profile(id, payload).await?;

    // Completing the profile is a one-time grant, keyed on the transition.
    if !before.profile_complete() && user.profile_complete() {
        state
            .gamification_service
            .award_action(id, "PROFILE_COMPLETED")
            .await?;
        state.gamification_service.check_achievements(id).await?;
    }

    let user = state.user_service.get(id).await?;
    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/verify-email",
    params(("id" = Uuid, Path, description = "User ID")),
    responses((status = 200, description = "Email marked verified"))
)]
#[axum::debug_handler]
pub async fn verify_email(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let (user, transitioned) = state.user_service.mark_email_verified(id).await?;
    let grant = if transitioned {
        state
            .gamification_service
            .award_action(id, "EMAIL_VERIFIED")
            .await?
    } else {
        crate::models::gamification::PointGrant {
            points_awarded: 0,
            total_points: user.points,
            level: user.level,
            leveled_up: false,
        }
    };
    Ok(Json(grant))
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/view",
    params(("id" = Uuid, Path, description = "User ID")),
    responses((status = 200, description = "Profile view recorded"))
)]
#[axum::debug_handler]
pub async fn record_profile_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let views = state.user_service.record_profile_view(id).await?;
    state.gamification_service.check_achievements(id).await?;
    Ok(Json(serde_json::json!({ "profile_views": views })))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/gamification",
    params(("id" = Uuid, Path, description = "User ID")),
    responses((status = 200, description = "Gamification summary"))
)]
#[axum::debug_handler]
pub async fn get_gamification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.get(id).await?;
    let history = state.gamification_service.history(id, 50).await?;
    let achievements: Vec<AchievementView> = user
        .achievements
        .iter()
        .filter_map(|id| achievements::find_achievement(id))
        .map(AchievementView::from)
        .collect();

    Ok(Json(GamificationSummary {
        points: user.points,
        level: user.level,
        achievements,
        history,
    }))
}

#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    pub limit: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/notifications",
    params(("id" = Uuid, Path, description = "User ID")),
    responses((status = 200, description = "Notifications for the user"))
)]
#[axum::debug_handler]
pub async fn list_notifications(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<NotificationQuery>,
) -> Result<impl IntoResponse> {
    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let notifications = state.notification_service.list_for_user(id, limit).await?;
    Ok(Json(notifications))
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/notifications/read",
    params(("id" = Uuid, Path, description = "User ID")),
    responses((status = 200, description = "Notifications marked read"))
)]
#[axum::debug_handler]
pub async fn mark_notifications_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let updated = state.notification_service.mark_all_read(id).await?;
    Ok(Json(serde_json::json!({ "updated": updated })))
}
