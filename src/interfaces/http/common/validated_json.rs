//! `Json<T>` that also runs `validator::Validate`.
//!
//! Malformed bodies are rejected with 400, bodies that parse but fail
//! validation with 422 and a `field: message` list in the error envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiResponse;

pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    Json(JsonRejection),
    Invalid(ValidationErrors),
}

fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{field}: {msg}"),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect();
    // field_errors() is a HashMap
    parts.sort();
    if parts.is_empty() {
        "Validation failed".to_string()
    } else {
        parts.join("; ")
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Json(rejection) => (StatusCode::BAD_REQUEST, format!("Invalid JSON: {rejection}")),
            Self::Invalid(errors) => (StatusCode::UNPROCESSABLE_ENTITY, describe(&errors)),
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Json)?;
        value.validate().map_err(ValidatedJsonRejection::Invalid)?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct Draft {
        #[validate(range(min = 1, max = 10))]
        rating: i32,
        #[validate(length(min = 1, max = 20))]
        text: String,
    }

    async fn handler(ValidatedJson(draft): ValidatedJson<Draft>) -> String {
        format!("{}:{}", draft.rating, draft.text)
    }

    async fn post_body(body: &'static str) -> StatusCode {
        let app = Router::new().route("/drafts", post(handler));
        let req = Request::builder()
            .method("POST")
            .uri("/drafts")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        app.oneshot(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn accepts_valid_body() {
        assert_eq!(post_body(r#"{"rating": 8, "text": "Great"}"#).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        assert_eq!(post_body("{rating").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn out_of_range_is_422() {
        assert_eq!(
            post_body(r#"{"rating": 11, "text": ""}"#).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
