//! `GET /api/v1/dashboard`

use std::sync::Arc;

use axum::{extract::State, Extension};

use super::dto::DashboardDto;
use crate::application::{Credentials, DashboardService};
use crate::interfaces::http::common::{api_error, ok, ApiResponse, ApiResult};

#[derive(Clone)]
pub struct DashboardHandlerState {
    pub dashboard: Arc<DashboardService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Hero slides, trending row and top picks", body = ApiResponse<DashboardDto>),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn get_dashboard(
    State(state): State<DashboardHandlerState>,
    Extension(user): Extension<Credentials>,
) -> ApiResult<DashboardDto> {
    let dashboard = state.dashboard.load(&user.user_id).await.map_err(api_error)?;
    ok(dashboard.into())
}
