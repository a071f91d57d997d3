//! The caller's watchlist

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{AddToWatchlistRequest, UpdateWatchlistRequest, WatchlistEntryDto, WatchlistItemDto};
use crate::application::{Credentials, LibraryService};
use crate::domain::WatchlistUpdate;
use crate::interfaces::http::common::{
    api_error, ok, ApiError, ApiResponse, ApiResult, ValidatedJson,
};

#[derive(Clone)]
pub struct WatchlistHandlerState {
    pub library: Arc<LibraryService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/watchlist",
    tag = "Watchlist",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Watchlist, highest priority then newest first", body = ApiResponse<Vec<WatchlistEntryDto>>)
    )
)]
pub async fn get_watchlist(
    State(state): State<WatchlistHandlerState>,
    Extension(user): Extension<Credentials>,
) -> ApiResult<Vec<WatchlistEntryDto>> {
    let entries = state
        .library
        .get_user_watchlist(&user.user_id)
        .await
        .map_err(api_error)?;
    ok(entries.into_iter().map(WatchlistEntryDto::from).collect())
}

#[utoipa::path(
    post,
    path = "/api/v1/watchlist",
    tag = "Watchlist",
    security(("bearer_auth" = [])),
    request_body = AddToWatchlistRequest,
    responses(
        (status = 201, description = "Added", body = ApiResponse<WatchlistItemDto>),
        (status = 404, description = "Movie not found"),
        (status = 409, description = "Movie already on the watchlist")
    )
)]
pub async fn add_to_watchlist(
    State(state): State<WatchlistHandlerState>,
    Extension(user): Extension<Credentials>,
    ValidatedJson(body): ValidatedJson<AddToWatchlistRequest>,
) -> Result<(StatusCode, Json<ApiResponse<WatchlistItemDto>>), ApiError<WatchlistItemDto>> {
    let item = body.into_item(&user.user_id).map_err(api_error)?;
    let added = state
        .library
        .add_to_watchlist(item)
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(added.into()))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/watchlist/{id}",
    tag = "Watchlist",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Watchlist item ID")),
    request_body = UpdateWatchlistRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<WatchlistItemDto>),
        (status = 403, description = "Item belongs to another user"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn update_watchlist_item(
    State(state): State<WatchlistHandlerState>,
    Extension(user): Extension<Credentials>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateWatchlistRequest>,
) -> ApiResult<WatchlistItemDto> {
    let update = WatchlistUpdate::try_from(body).map_err(api_error)?;
    let item = state
        .library
        .update_watchlist_item(&user.user_id, &id, update)
        .await
        .map_err(api_error)?;
    ok(item.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/watchlist/{movie_id}",
    tag = "Watchlist",
    security(("bearer_auth" = [])),
    params(("movie_id" = String, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Removed"),
        (status = 404, description = "Movie is not on the watchlist")
    )
)]
pub async fn remove_from_watchlist(
    State(state): State<WatchlistHandlerState>,
    Extension(user): Extension<Credentials>,
    Path(movie_id): Path<String>,
) -> ApiResult<()> {
    state
        .library
        .remove_from_watchlist(&user.user_id, &movie_id)
        .await
        .map_err(api_error)?;
    ok(())
}
