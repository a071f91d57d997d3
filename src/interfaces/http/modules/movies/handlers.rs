//! Public catalog endpoints

use std::sync::Arc;

use axum::extract::{Path, Query, State};

use super::dto::{
    MovieDetailDto, MovieDto, MovieQueryParams, MovieSummaryDto, OttAvailabilityDto, PageParams,
    ReviewDto,
};
use crate::application::catalog::DEFAULT_REVIEW_LIMIT;
use crate::application::{AvailabilityService, CatalogService};
use crate::interfaces::http::common::{api_error, ok, ApiResponse, ApiResult, PaginatedResponse};
use crate::shared::PageRequest;

#[derive(Clone)]
pub struct MoviesHandlerState {
    pub catalog: Arc<CatalogService>,
    pub availability: Arc<AvailabilityService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/movies",
    tag = "Movies",
    params(MovieQueryParams),
    responses(
        (status = 200, description = "Page of released movies", body = ApiResponse<PaginatedResponse<MovieDto>>),
        (status = 400, description = "Invalid filter or paging parameters")
    )
)]
pub async fn list_movies(
    State(state): State<MoviesHandlerState>,
    Query(params): Query<MovieQueryParams>,
) -> ApiResult<PaginatedResponse<MovieDto>> {
    let page = params.page_request().map_err(api_error)?;
    let sort = params.sort().map_err(api_error)?;
    let result = state
        .catalog
        .list_movies(&params.filters(), page, sort)
        .await
        .map_err(api_error)?;
    ok(PaginatedResponse::from_page(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/movies/search",
    tag = "Movies",
    params(MovieQueryParams),
    responses(
        (status = 200, description = "Page of matching movies", body = ApiResponse<PaginatedResponse<MovieDto>>),
        (status = 400, description = "Empty query or invalid parameters")
    )
)]
pub async fn search_movies(
    State(state): State<MoviesHandlerState>,
    Query(params): Query<MovieQueryParams>,
) -> ApiResult<PaginatedResponse<MovieDto>> {
    let page = params.page_request().map_err(api_error)?;
    let sort = params.sort().map_err(api_error)?;
    let query = params.q.as_deref().unwrap_or_default();
    let result = state
        .catalog
        .search_movies(query, &params.filters(), page, sort)
        .await
        .map_err(api_error)?;
    ok(PaginatedResponse::from_page(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/movies/{id}",
    tag = "Movies",
    params(("id" = String, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie with its reviews", body = ApiResponse<MovieDetailDto>),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn get_movie(
    State(state): State<MoviesHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<MovieDetailDto> {
    let detail = state.catalog.get_movie_by_id(&id).await.map_err(api_error)?;
    ok(detail.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/movies/{id}/reviews",
    tag = "Movies",
    params(("id" = String, Path, description = "Movie ID"), PageParams),
    responses(
        (status = 200, description = "Page of reviews, newest first", body = ApiResponse<PaginatedResponse<ReviewDto>>),
        (status = 400, description = "Invalid paging parameters")
    )
)]
pub async fn get_movie_reviews(
    State(state): State<MoviesHandlerState>,
    Path(id): Path<String>,
    Query(params): Query<PageParams>,
) -> ApiResult<PaginatedResponse<ReviewDto>> {
    let page = PageRequest::from_params(params.page, params.limit, DEFAULT_REVIEW_LIMIT)
        .map_err(api_error)?;
    let result = state
        .catalog
        .get_movie_reviews(&id, page)
        .await
        .map_err(api_error)?;
    ok(PaginatedResponse::from_page(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/genres/{genre}/movies",
    tag = "Movies",
    params(("genre" = String, Path, description = "Genre name, e.g. Drama")),
    responses(
        (status = 200, description = "Released movies in the genre, best rated first", body = ApiResponse<Vec<MovieSummaryDto>>)
    )
)]
pub async fn movies_by_genre(
    State(state): State<MoviesHandlerState>,
    Path(genre): Path<String>,
) -> ApiResult<Vec<MovieSummaryDto>> {
    let movies = state
        .catalog
        .movies_by_genre(&genre)
        .await
        .map_err(api_error)?;
    ok(movies.into_iter().map(MovieSummaryDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/movies/{id}/ott-availability",
    tag = "Movies",
    params(("id" = String, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Where to stream, rent or buy the movie", body = ApiResponse<OttAvailabilityDto>),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn ott_availability(
    State(state): State<MoviesHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<OttAvailabilityDto> {
    let availability = state
        .availability
        .get_availability(&id)
        .await
        .map_err(api_error)?;
    ok(availability.into())
}
