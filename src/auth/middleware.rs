use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

/// Require a well-formed `Bearer <token>` header, verify it, and inject the
/// claims into request extensions for downstream handlers.
pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Authorization header is required".to_string()))?;

    let token = parse_bearer(header_value).ok_or_else(|| {
        ApiError::Unauthorized("Invalid authorization header format".to_string())
    })?;

    let claims = state
        .auth
        .verify_token(token)
        .map_err(|_| ApiError::Unauthorized("Invalid token".to_string()))?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Extract the token from a `Bearer <token>` header value. The scheme must
/// be exactly `Bearer` and the value exactly two space-separated parts.
fn parse_bearer(value: &str) -> Option<&str> {
    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] if !token.is_empty() => Some(token),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer_valid() {
        assert_eq!(parse_bearer("Bearer abc123"), Some("abc123"));
    }

    #[test]
    fn test_parse_bearer_wrong_scheme() {
        assert_eq!(parse_bearer("Basic abc123"), None);
        assert_eq!(parse_bearer("bearer abc123"), None);
    }

    #[test]
    fn test_parse_bearer_malformed() {
        assert_eq!(parse_bearer("Bearer"), None);
        assert_eq!(parse_bearer("Bearer "), None);
        assert_eq!(parse_bearer("Bearer a b"), None);
        assert_eq!(parse_bearer(""), None);
    }
}
