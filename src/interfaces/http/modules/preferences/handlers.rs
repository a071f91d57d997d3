//! Stored viewing preferences and the recommendations they drive

use std::sync::Arc;

use axum::{extract::State, Extension};

use super::dto::{PreferenceDto, PreferenceRequest, RecommendationDto};
use crate::application::{Credentials, LibraryService};
use crate::interfaces::http::common::{api_error, ok, ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct PreferencesHandlerState {
    pub library: Arc<LibraryService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/preferences",
    tag = "Preferences",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Stored preferences; data is null when none were saved", body = ApiResponse<PreferenceDto>)
    )
)]
pub async fn get_preferences(
    State(state): State<PreferencesHandlerState>,
    Extension(user): Extension<Credentials>,
) -> ApiResult<Option<PreferenceDto>> {
    let prefs = state
        .library
        .get_user_preferences(&user.user_id)
        .await
        .map_err(api_error)?;
    ok(prefs.map(PreferenceDto::from))
}

#[utoipa::path(
    put,
    path = "/api/v1/preferences",
    tag = "Preferences",
    security(("bearer_auth" = [])),
    request_body = PreferenceRequest,
    responses(
        (status = 200, description = "Preferences saved", body = ApiResponse<PreferenceDto>),
        (status = 422, description = "Validation error")
    )
)]
pub async fn put_preferences(
    State(state): State<PreferencesHandlerState>,
    Extension(user): Extension<Credentials>,
    ValidatedJson(body): ValidatedJson<PreferenceRequest>,
) -> ApiResult<PreferenceDto> {
    let prefs = state
        .library
        .upsert_user_preferences(&user.user_id, body.into())
        .await
        .map_err(api_error)?;
    ok(prefs.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/recommendations",
    tag = "Preferences",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Up to 20 movies ranked by match score", body = ApiResponse<Vec<RecommendationDto>>)
    )
)]
pub async fn get_recommendations(
    State(state): State<PreferencesHandlerState>,
    Extension(user): Extension<Credentials>,
) -> ApiResult<Vec<RecommendationDto>> {
    let picks = state
        .library
        .get_user_recommendations(&user.user_id)
        .await
        .map_err(api_error)?;
    ok(picks.into_iter().map(RecommendationDto::from).collect())
}
