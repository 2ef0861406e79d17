use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;

use crate::database::models::alert::{self, Alert, AlertLevel};
use crate::error::ApiError;
use crate::handlers::utils::require_field;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::ownership;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRequest {
    pub message: Option<String>,
    pub level: Option<String>,
}

fn parse_level(raw: &str) -> Result<AlertLevel, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation_error("level must be one of INFO, WARNING, CRITICAL"))
}

/// POST /sensors/:sensor_id/alert - Raise an alert against a sensor
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(sensor_id): Path<i32>,
    Json(payload): Json<AlertRequest>,
) -> ApiResult<Alert> {
    let message = require_field(payload.message.as_deref(), "message")?;
    let level = parse_level(require_field(payload.level.as_deref(), "level")?)?;

    let owner = ownership::owned_sensor(&state.pool, auth, sensor_id).await?;

    let created = alert::insert(&state.pool, owner.sensor_id, message, level).await?;

    Ok(ApiResponse::created(created))
}

/// GET /sensors/:sensor_id/alerts - All alerts raised against a sensor
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(sensor_id): Path<i32>,
) -> ApiResult<Vec<Alert>> {
    let owner = ownership::owned_sensor(&state.pool, auth, sensor_id).await?;

    let alerts = alert::list_for_sensor(&state.pool, owner.sensor_id).await?;

    Ok(ApiResponse::success(alerts))
}

/// GET /alert/:alert_id
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(alert_id): Path<i32>,
) -> ApiResult<Alert> {
    let found = ownership::owned_alert(&state.pool, auth, alert_id).await?;

    Ok(ApiResponse::success(found))
}

/// PUT /alert/:alert_id - Rewrite an alert's message and level
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(alert_id): Path<i32>,
    Json(payload): Json<AlertRequest>,
) -> ApiResult<Alert> {
    let message = require_field(payload.message.as_deref(), "message")?;
    let level = parse_level(require_field(payload.level.as_deref(), "level")?)?;

    ownership::owned_alert(&state.pool, auth, alert_id).await?;

    let updated = alert::update(&state.pool, alert_id, message, level)
        .await?
        .ok_or_else(|| ApiError::not_found("Alert not found"))?;

    Ok(ApiResponse::success(updated))
}

/// DELETE /alert/:alert_id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(alert_id): Path<i32>,
) -> ApiResult<Alert> {
    ownership::owned_alert(&state.pool, auth, alert_id).await?;

    let deleted = alert::delete(&state.pool, alert_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Alert not found"))?;

    Ok(ApiResponse::success(deleted))
}
