//! Ownership resolution shared by every protected resource handler.
//!
//! Child-resource operations all follow the same two stages: resolve the
//! parent sensor restricted to the acting user, then run the actual
//! operation scoped to that sensor (and child id where applicable). A
//! sensor that does not exist and a sensor owned by someone else both
//! surface as `NotFound`, so ids cannot be probed across accounts.

use sqlx::PgPool;

use crate::database::models::{alert, sensor};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// Resolve a sensor the authenticated user owns, or `NotFound`.
pub async fn owned_sensor(
    pool: &PgPool,
    auth: AuthUser,
    sensor_id: i32,
) -> Result<sensor::Sensor, ApiError> {
    sensor::find_owned(pool, sensor_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Sensor not found"))
}

/// Resolve an alert whose parent sensor the authenticated user owns, or
/// `NotFound`. Used by the item routes that carry no sensor id.
pub async fn owned_alert(
    pool: &PgPool,
    auth: AuthUser,
    alert_id: i32,
) -> Result<alert::Alert, ApiError> {
    alert::find_owned(pool, alert_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Alert not found"))
}
