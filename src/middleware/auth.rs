use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from a verified bearer token.
///
/// This is the only source of the acting user id for ownership checks;
/// handlers never read an identity from bodies or query strings.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub user_id: i32,
}

/// Bearer-token middleware guarding every protected route.
///
/// Verifies the token against the configured secret and injects
/// [`AuthUser`] into the request extensions for downstream handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)?;

    let claims = auth::verify_token(&state.config.security.jwt_secret, token).map_err(|e| {
        tracing::debug!("token verification failed: {}", e);
        ApiError::unauthorized("Invalid or expired token")
    })?;

    request
        .extensions_mut()
        .insert(AuthUser { user_id: claims.id });

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header"))?;

    let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::unauthorized("Authorization header must use Bearer token format")
    })?;

    if token.trim().is_empty() {
        return Err(ApiError::unauthorized("Empty bearer token"));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static(value),
        );
        headers
    }

    #[test]
    fn missing_header_is_rejected() {
        let headers = HeaderMap::new();
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let headers = headers_with("Basic dXNlcjpwdw==");
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn empty_token_is_rejected() {
        let headers = headers_with("Bearer  ");
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn well_formed_header_yields_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }
}
