use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// A sensor installed by a user. `user_id` is the owning account; all
/// reads and mutations are filtered on it.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    pub sensor_id: i32,
    pub user_id: i32,
    pub sensor_name: String,
    pub location: String,
    pub installation_date: DateTime<Utc>,
}

pub async fn insert(
    conn: &PgPool,
    user_id: i32,
    sensor_name: &str,
    location: &str,
) -> Result<Sensor, sqlx::Error> {
    sqlx::query_as::<_, Sensor>(
        "INSERT INTO sensor (user_id, sensor_name, location) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(user_id)
    .bind(sensor_name)
    .bind(location)
    .fetch_one(conn)
    .await
}

pub async fn list_for_user(conn: &PgPool, user_id: i32) -> Result<Vec<Sensor>, sqlx::Error> {
    sqlx::query_as::<_, Sensor>("SELECT * FROM sensor WHERE user_id = $1 ORDER BY sensor_id")
        .bind(user_id)
        .fetch_all(conn)
        .await
}

/// Fetch a sensor only if it belongs to the given user. A missing sensor
/// and a foreign sensor are indistinguishable to the caller.
pub async fn find_owned(
    conn: &PgPool,
    sensor_id: i32,
    user_id: i32,
) -> Result<Option<Sensor>, sqlx::Error> {
    sqlx::query_as::<_, Sensor>("SELECT * FROM sensor WHERE sensor_id = $1 AND user_id = $2")
        .bind(sensor_id)
        .bind(user_id)
        .fetch_optional(conn)
        .await
}

// Callers must resolve ownership first; these operate on the primary key.

pub async fn update(
    conn: &PgPool,
    sensor_id: i32,
    sensor_name: &str,
    location: &str,
) -> Result<Option<Sensor>, sqlx::Error> {
    sqlx::query_as::<_, Sensor>(
        "UPDATE sensor SET sensor_name = $2, location = $3 WHERE sensor_id = $1 RETURNING *",
    )
    .bind(sensor_id)
    .bind(sensor_name)
    .bind(location)
    .fetch_optional(conn)
    .await
}

pub async fn delete(conn: &PgPool, sensor_id: i32) -> Result<Option<Sensor>, sqlx::Error> {
    sqlx::query_as::<_, Sensor>("DELETE FROM sensor WHERE sensor_id = $1 RETURNING *")
        .bind(sensor_id)
        .fetch_optional(conn)
        .await
}
