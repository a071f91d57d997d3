//! Signed-in user's profile

use std::sync::Arc;

use axum::{extract::State, Extension};

use super::dto::{ProfileDto, UpdateProfileRequest};
use crate::application::{Credentials, UserService};
use crate::interfaces::http::common::{api_error, ok, ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct MeHandlerState {
    pub users: Arc<UserService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/me",
    tag = "Profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current profile", body = ApiResponse<ProfileDto>),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn get_me(
    State(state): State<MeHandlerState>,
    Extension(user): Extension<Credentials>,
) -> ApiResult<ProfileDto> {
    let profile = state.users.get_profile(&user.user_id).await.map_err(api_error)?;
    ok(profile.into())
}

#[utoipa::path(
    patch,
    path = "/api/v1/me",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<ProfileDto>),
        (status = 401, description = "Not signed in"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_me(
    State(state): State<MeHandlerState>,
    Extension(user): Extension<Credentials>,
    ValidatedJson(body): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<ProfileDto> {
    let profile = state
        .users
        .update_profile(&user.user_id, body.into())
        .await
        .map_err(api_error)?;
    ok(profile.into())
}
