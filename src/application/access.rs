//! Route guard: decides, independently of the HTTP stack, whether a
//! request for a path may proceed with the credentials it carries.

use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig};
use crate::shared::{DomainError, DomainResult};

/// Path prefixes that require a signed-in user.
pub const PROTECTED_PREFIXES: &[&str] = &[
    "/api/v1/dashboard",
    "/api/v1/me",
    "/api/v1/reviews",
    "/api/v1/watchlist",
    "/api/v1/preferences",
    "/api/v1/recommendations",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

/// Segment-aware: `/api/v1/me` covers `/api/v1/me/x` but not `/api/v1/meta`.
pub fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

pub fn authorize(path: &str, credentials: Option<&Credentials>) -> Access {
    match (is_protected(path), credentials) {
        (false, _) | (true, Some(_)) => Access::Allow,
        (true, None) => Access::Deny,
    }
}

/// Turns a bearer token into credentials.
pub fn authenticate(token: &str, config: &JwtConfig) -> DomainResult<Credentials> {
    let claims = verify_token(token, config)
        .map_err(|e| DomainError::Unauthorized(format!("Invalid token: {e}")))?;
    Ok(Credentials {
        user_id: claims.sub,
        email: claims.email,
        name: claims.name,
    })
}
