//! Response envelope shared by every REST endpoint.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::shared::{DomainError, PageResult};

/// Standard API response wrapper.
///
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Page envelope: `has_more == total > page * limit`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    pub fn from_page<S>(page: PageResult<S>) -> Self
    where
        T: From<S>,
    {
        let page = page.map(T::from);
        Self {
            items: page.items,
            total: page.total,
            page: page.page,
            limit: page.limit,
            has_more: page.has_more,
        }
    }
}

/// Error half of every handler result.
pub type ApiError<T> = (StatusCode, Json<ApiResponse<T>>);

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError<T>>;

pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Upstream(_) => StatusCode::BAD_GATEWAY,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
    }
}

/// Maps a domain error onto its status code and an error envelope.
pub fn api_error<T>(error: DomainError) -> ApiError<T> {
    let status = status_for(&error);
    if status == StatusCode::BAD_GATEWAY {
        error!(error = %error, "Store request failed");
    }
    (status, Json(ApiResponse::error(error.to_string())))
}

pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::PageRequest;

    #[test]
    fn domain_errors_map_to_status_codes() {
        assert_eq!(
            status_for(&DomainError::not_found("Movie", "id", "x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&DomainError::Validation("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::Upstream(sea_orm::DbErr::Custom("down".into()))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&DomainError::Conflict("dup".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&DomainError::Forbidden("no".into())),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn error_envelope_omits_data() {
        let (status, Json(body)) = api_error::<()>(DomainError::Unauthorized("nope".into()));
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
        assert!(json["error"].as_str().unwrap().contains("nope"));
    }

    #[test]
    fn paginated_response_keeps_envelope_fields() {
        let req = PageRequest::new(1, 2).unwrap();
        let page = PageResult::new(vec![1u32, 2], 5, req);
        let dto: PaginatedResponse<u64> = PaginatedResponse::from_page(page);
        assert_eq!(dto.items, vec![1, 2]);
        assert_eq!(dto.total, 5);
        assert!(dto.has_more);
    }
}
