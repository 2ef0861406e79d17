use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::{self, Claims};
use crate::database::models::user;
use crate::error::ApiError;
use crate::handlers::utils::require_field;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
}

/// POST /auth/login - Verify credentials and issue a bearer token
///
/// An unknown email is a 404, a wrong password a 401. The issued token
/// carries `{ id, iat, exp }` and expires after the configured lifetime.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let email = require_field(payload.email.as_deref(), "email")?;
    let password = require_field(payload.password.as_deref(), "password")?;

    let account = user::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let password_matches = bcrypt::verify(password, &account.password).map_err(|e| {
        tracing::error!("password verification failed: {}", e);
        ApiError::internal_server_error("Failed to process credentials")
    })?;

    if !password_matches {
        return Err(ApiError::unauthorized("Incorrect password"));
    }

    let expiry = state.config.security.token_expiry_secs;
    let claims = Claims::new(account.user_id, expiry);
    let token = auth::issue_token(&state.config.security.jwt_secret, &claims).map_err(|e| {
        tracing::error!("token issuance failed: {}", e);
        ApiError::internal_server_error("Failed to issue token")
    })?;

    tracing::info!(user_id = account.user_id, "user logged in");

    Ok(ApiResponse::success(LoginResponse {
        token,
        expires_in: expiry,
    }))
}
