use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::review_dto::{CompanyReviewsResponse, CreateReviewPayload},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = CreateReviewPayload,
    responses(
        (status = 201, description = "Review created"),
        (status = 409, description = "Company already reviewed by this author")
    )
)]
#[axum::debug_handler]
pub async fn create_review(
    State(state): State<AppState>,
    Json(payload): Json<CreateReviewPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let review = state
        .review_service
        .create(
            payload.author_id,
            payload.company_id,
            payload.rating,
            payload.comment,
        )
        .await?;

    state
        .gamification_service
        .award_action(payload.author_id, "REVIEW_WRITTEN")
        .await?;
    state
        .gamification_service
        .check_achievements(payload.author_id)
        .await?;

    Ok((StatusCode::CREATED, Json(review)))
}

#[utoipa::path(
    get,
    path = "/api/companies/{id}/reviews",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses((status = 200, description = "Reviews for the company"))
)]
#[axum::debug_handler]
pub async fn company_reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let reviews = state.review_service.for_company(id).await?;
    Ok(Json(CompanyReviewsResponse {
        items: reviews.items,
        average_rating: reviews.average_rating,
    }))
}
