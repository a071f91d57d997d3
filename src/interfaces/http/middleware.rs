//! Route guard middleware.
//!
//! Resolves credentials from `Authorization: Bearer <jwt>` (or the `token`
//! query parameter used by WebSocket upgrades), asks
//! [`authorize`](crate::application::authorize) whether the path may proceed
//! and stores the [`Credentials`] in request extensions for the handlers.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::application::{authenticate, authorize, Access, Credentials};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::ApiResponse;

#[derive(Clone)]
pub struct GuardState {
    pub jwt_config: JwtConfig,
}

fn bearer_token(request: &Request<Body>) -> Option<String> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
}

fn query_token(request: &Request<Body>) -> Option<String> {
    request.uri().query().and_then(|query| {
        query.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == "token" && !value.is_empty()).then(|| value.to_string())
        })
    })
}

fn deny(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error(message)),
    )
        .into_response()
}

/// Applied once at the router root; every route passes through it.
pub async fn route_guard(
    State(state): State<GuardState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let token = bearer_token(&request).or_else(|| query_token(&request));

    let mut invalid_token = false;
    let credentials: Option<Credentials> = match token {
        Some(token) => match authenticate(&token, &state.jwt_config) {
            Ok(credentials) => Some(credentials),
            Err(e) => {
                debug!(path = %path, error = %e, "Rejected token");
                invalid_token = true;
                None
            }
        },
        None => None,
    };

    match authorize(&path, credentials.as_ref()) {
        Access::Allow => {
            if let Some(credentials) = credentials {
                request.extensions_mut().insert(credentials);
            }
            next.run(request).await
        }
        Access::Deny if invalid_token => deny("Invalid or expired token"),
        Access::Deny => deny("Authentication required"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Extension, Router};
    use tower::ServiceExt;

    use crate::infrastructure::crypto::jwt::create_token;

    async fn whoami(credentials: Option<Extension<Credentials>>) -> String {
        credentials
            .map(|Extension(c)| c.user_id)
            .unwrap_or_else(|| "anonymous".into())
    }

    fn app() -> Router {
        let state = GuardState {
            jwt_config: JwtConfig::default(),
        };
        Router::new()
            .route("/api/v1/me", get(whoami))
            .route("/api/v1/movies", get(whoami))
            .layer(middleware::from_fn_with_state(state, route_guard))
    }

    async fn call(uri: &str, auth: Option<String>) -> (StatusCode, String) {
        let mut req = Request::builder().uri(uri);
        if let Some(auth) = auth {
            req = req.header(header::AUTHORIZATION, auth);
        }
        let resp = app().oneshot(req.body(Body::empty()).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn token() -> String {
        create_token("u-42", "fan@example.com", "Fan", &JwtConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn public_route_passes_without_credentials() {
        let (status, body) = call("/api/v1/movies", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "anonymous");
    }

    #[tokio::test]
    async fn protected_route_denied_without_credentials() {
        let (status, _) = call("/api/v1/me", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn bearer_token_reaches_handler() {
        let (status, body) = call("/api/v1/me", Some(format!("Bearer {}", token()))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "u-42");
    }

    #[tokio::test]
    async fn query_token_is_accepted() {
        let (status, body) = call(&format!("/api/v1/me?token={}", token()), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "u-42");
    }

    #[tokio::test]
    async fn garbage_token_is_denied_on_protected_route() {
        let (status, body) = call("/api/v1/me", Some("Bearer nope".into())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Invalid or expired token"));
    }
}
