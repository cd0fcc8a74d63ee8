use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::chat_dto::{MarkReadPayload, SendMessagePayload, UnreadCountResponse},
    error::Result,
    models::notification::CreateNotification,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = SendMessagePayload,
    responses(
        (status = 201, description = "Message sent"),
        (status = 404, description = "Recipient not found")
    )
)]
#[axum::debug_handler]
pub async fn send_message(
    State(state): State<AppState>,
    Json(payload): Json<SendMessagePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let message = state
        .message_service
        .send(payload.sender_id, payload.recipient_id, &payload.body)
        .await?;

    state
        .gamification_service
        .award_action(payload.sender_id, "MESSAGE_SENT")
        .await?;
    state
        .gamification_service
        .check_achievements(payload.sender_id)
        .await?;

    state
        .notification_service
        .create(CreateNotification {
            user_id: payload.recipient_id,
            kind: "message".into(),
            title: "New message".into(),
            body: "You received a new chat message".into(),
            metadata: Some(serde_json::json!({ "message_id": message.id })),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

#[utoipa::path(
    get,
    path = "/api/messages/{user_id}/{peer_id}",
    params(
        ("user_id" = Uuid, Path, description = "User ID"),
        ("peer_id" = Uuid, Path, description = "Conversation peer ID")
    ),
    responses((status = 200, description = "Conversation history"))
)]
#[axum::debug_handler]
pub async fn conversation(
    State(state): State<AppState>,
    Path((user_id, peer_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    let messages = state.message_service.conversation(user_id, peer_id).await?;
    Ok(Json(messages))
}

#[utoipa::path(
    post,
    path = "/api/messages/{user_id}/read",
    params(("user_id" = Uuid, Path, description = "User ID")),
    request_body = MarkReadPayload,
    responses((status = 200, description = "Messages marked read"))
)]
#[axum::debug_handler]
pub async fn mark_read(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<MarkReadPayload>,
) -> Result<impl IntoResponse> {
    let updated = state
        .message_service
        .mark_read(user_id, payload.peer_id)
        .await?;
    Ok(Json(serde_json::json!({ "updated": updated })))
}

#[utoipa::path(
    get,
    path = "/api/messages/{user_id}/unread",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses((status = 200, description = "Unread message count"))
)]
#[axum::debug_handler]
pub async fn unread_count(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let unread = state.message_service.unread_count(user_id).await?;
    Ok(Json(UnreadCountResponse { unread }))
}
