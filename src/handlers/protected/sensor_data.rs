use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::database::models::sensor_data::{self, SensorData, SensorDataFields};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::ownership;

/// POST /sensors/:sensor_id/data - Record a measurement
///
/// All measurement fields are optional; a sparse payload is a valid
/// reading.
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(sensor_id): Path<i32>,
    Json(fields): Json<SensorDataFields>,
) -> ApiResult<SensorData> {
    let owner = ownership::owned_sensor(&state.pool, auth, sensor_id).await?;

    let created = sensor_data::insert(&state.pool, owner.sensor_id, &fields).await?;

    Ok(ApiResponse::created(created))
}

/// GET /sensors/:sensor_id/data - All readings of a sensor
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(sensor_id): Path<i32>,
) -> ApiResult<Vec<SensorData>> {
    let owner = ownership::owned_sensor(&state.pool, auth, sensor_id).await?;

    let readings = sensor_data::list_for_sensor(&state.pool, owner.sensor_id).await?;

    Ok(ApiResponse::success(readings))
}

/// GET /sensors/:sensor_id/data/:data_id
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((sensor_id, data_id)): Path<(i32, i32)>,
) -> ApiResult<SensorData> {
    let owner = ownership::owned_sensor(&state.pool, auth, sensor_id).await?;

    let reading = sensor_data::find_scoped(&state.pool, owner.sensor_id, data_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Reading not found"))?;

    Ok(ApiResponse::success(reading))
}

/// PUT /sensors/:sensor_id/data/:data_id - Replace a reading's fields
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((sensor_id, data_id)): Path<(i32, i32)>,
    Json(fields): Json<SensorDataFields>,
) -> ApiResult<SensorData> {
    let owner = ownership::owned_sensor(&state.pool, auth, sensor_id).await?;

    let updated = sensor_data::update_scoped(&state.pool, owner.sensor_id, data_id, &fields)
        .await?
        .ok_or_else(|| ApiError::not_found("Reading not found"))?;

    Ok(ApiResponse::success(updated))
}

/// DELETE /sensors/:sensor_id/data/:data_id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((sensor_id, data_id)): Path<(i32, i32)>,
) -> ApiResult<SensorData> {
    let owner = ownership::owned_sensor(&state.pool, auth, sensor_id).await?;

    let deleted = sensor_data::delete_scoped(&state.pool, owner.sensor_id, data_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Reading not found"))?;

    Ok(ApiResponse::success(deleted))
}
