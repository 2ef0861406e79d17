use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;

use crate::database::models::sensor::{self, Sensor};
use crate::error::ApiError;
use crate::handlers::utils::require_field;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::ownership;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorRequest {
    pub sensor_name: Option<String>,
    pub location: Option<String>,
}

/// POST /sensors - Register a sensor owned by the authenticated user
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<SensorRequest>,
) -> ApiResult<Sensor> {
    let sensor_name = require_field(payload.sensor_name.as_deref(), "sensorName")?;
    let location = require_field(payload.location.as_deref(), "location")?;

    let created = sensor::insert(&state.pool, auth.user_id, sensor_name, location).await?;

    Ok(ApiResponse::created(created))
}

/// GET /sensors - All sensors owned by the authenticated user
///
/// An account with no sensors gets an empty list, not an error.
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Vec<Sensor>> {
    let sensors = sensor::list_for_user(&state.pool, auth.user_id).await?;

    Ok(ApiResponse::success(sensors))
}

/// GET /sensors/:sensor_id
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(sensor_id): Path<i32>,
) -> ApiResult<Sensor> {
    let found = ownership::owned_sensor(&state.pool, auth, sensor_id).await?;

    Ok(ApiResponse::success(found))
}

/// PUT /sensors/:sensor_id - Rename or relocate a sensor
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(sensor_id): Path<i32>,
    Json(payload): Json<SensorRequest>,
) -> ApiResult<Sensor> {
    let sensor_name = require_field(payload.sensor_name.as_deref(), "sensorName")?;
    let location = require_field(payload.location.as_deref(), "location")?;

    ownership::owned_sensor(&state.pool, auth, sensor_id).await?;

    let updated = sensor::update(&state.pool, sensor_id, sensor_name, location)
        .await?
        .ok_or_else(|| ApiError::not_found("Sensor not found"))?;

    Ok(ApiResponse::success(updated))
}

/// DELETE /sensors/:sensor_id - Remove a sensor; the store cascades the
/// deletion to its readings and alerts
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(sensor_id): Path<i32>,
) -> ApiResult<Sensor> {
    ownership::owned_sensor(&state.pool, auth, sensor_id).await?;

    let deleted = sensor::delete(&state.pool, sensor_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Sensor not found"))?;

    tracing::info!(sensor_id = deleted.sensor_id, "deleted sensor");

    Ok(ApiResponse::success(deleted))
}
