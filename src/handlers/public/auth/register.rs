use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::database::models::user::{self, User};
use crate::error::{self, ApiError};
use crate::handlers::utils::{require_field, validate_email_format};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /auth/register - Create a new account
///
/// Expects `{ "name": ..., "email": ..., "password": ... }` and replies
/// 201 with the created user. The password is stored as a bcrypt hash
/// and never echoed back; a duplicate email is a 409.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<User> {
    let name = require_field(payload.name.as_deref(), "name")?;
    let email = require_field(payload.email.as_deref(), "email")?;
    let password = require_field(payload.password.as_deref(), "password")?;
    validate_email_format(email)?;

    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::internal_server_error("Failed to process credentials")
    })?;

    let created = user::insert(&state.pool, name, email, &password_hash)
        .await
        .map_err(|e| {
            if error::is_unique_violation(&e) {
                ApiError::conflict("Email is already registered")
            } else {
                ApiError::from(e)
            }
        })?;

    tracing::info!(user_id = created.user_id, "registered new user");

    Ok(ApiResponse::created(created))
}
