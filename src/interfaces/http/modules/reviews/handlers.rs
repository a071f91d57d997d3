//! Authored review mutations. Reads live under `/movies/{id}/reviews`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateReviewRequest, HelpfulVoteDto, HelpfulVoteRequest, UpdateReviewRequest};
use crate::application::{Credentials, ReviewService};
use crate::domain::ReviewUpdate;
use crate::interfaces::http::common::{
    api_error, ok, ApiError, ApiResponse, ApiResult, ValidatedJson,
};
use crate::interfaces::http::modules::movies::ReviewDto;

#[derive(Clone)]
pub struct ReviewsHandlerState {
    pub reviews: Arc<ReviewService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ApiResponse<ReviewDto>),
        (status = 404, description = "Movie not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_review(
    State(state): State<ReviewsHandlerState>,
    Extension(user): Extension<Credentials>,
    ValidatedJson(body): ValidatedJson<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewDto>>), ApiError<ReviewDto>> {
    let (movie_id, draft) = body.into_draft().map_err(api_error)?;
    let review = state
        .reviews
        .create_review(&user.user_id, &movie_id, draft)
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(review.into()))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Review ID")),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ApiResponse<ReviewDto>),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn update_review(
    State(state): State<ReviewsHandlerState>,
    Extension(user): Extension<Credentials>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateReviewRequest>,
) -> ApiResult<ReviewDto> {
    let update = ReviewUpdate::try_from(body).map_err(api_error)?;
    let review = state
        .reviews
        .update_review(&user.user_id, &id, update)
        .await
        .map_err(api_error)?;
    ok(review.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review deleted"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn delete_review(
    State(state): State<ReviewsHandlerState>,
    Extension(user): Extension<Credentials>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state
        .reviews
        .delete_review(&user.user_id, &id)
        .await
        .map_err(api_error)?;
    ok(())
}

#[utoipa::path(
    post,
    path = "/api/v1/reviews/{id}/helpful",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Review ID")),
    request_body = HelpfulVoteRequest,
    responses(
        (status = 200, description = "Vote recorded (replaces an earlier vote)", body = ApiResponse<HelpfulVoteDto>),
        (status = 404, description = "Review not found")
    )
)]
pub async fn vote_helpful(
    State(state): State<ReviewsHandlerState>,
    Extension(user): Extension<Credentials>,
    Path(id): Path<String>,
    Json(body): Json<HelpfulVoteRequest>,
) -> ApiResult<HelpfulVoteDto> {
    let vote = state
        .reviews
        .vote_helpful(&user.user_id, &id, body.is_helpful)
        .await
        .map_err(api_error)?;
    ok(vote.into())
}
