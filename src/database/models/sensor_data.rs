use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// One measurement row produced by a sensor.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SensorData {
    pub sensor_data_id: i32,
    pub sensor_id: i32,
    pub ph: Option<f64>,
    pub shading_index: Option<f64>,
    pub air_humidity: Option<f64>,
    pub soil_humidity: Option<f64>,
    pub soil_nutrients: Option<String>,
    pub temperature: Option<f64>,
    pub date_time: DateTime<Utc>,
}

/// Measurement fields accepted from clients; any subset may be present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorDataFields {
    pub ph: Option<f64>,
    pub shading_index: Option<f64>,
    pub air_humidity: Option<f64>,
    pub soil_humidity: Option<f64>,
    pub soil_nutrients: Option<String>,
    pub temperature: Option<f64>,
}

pub async fn insert(
    conn: &PgPool,
    sensor_id: i32,
    fields: &SensorDataFields,
) -> Result<SensorData, sqlx::Error> {
    sqlx::query_as::<_, SensorData>(
        "INSERT INTO sensor_data \
         (sensor_id, ph, shading_index, air_humidity, soil_humidity, soil_nutrients, temperature) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(sensor_id)
    .bind(fields.ph)
    .bind(fields.shading_index)
    .bind(fields.air_humidity)
    .bind(fields.soil_humidity)
    .bind(fields.soil_nutrients.as_deref())
    .bind(fields.temperature)
    .fetch_one(conn)
    .await
}

pub async fn list_for_sensor(
    conn: &PgPool,
    sensor_id: i32,
) -> Result<Vec<SensorData>, sqlx::Error> {
    sqlx::query_as::<_, SensorData>(
        "SELECT * FROM sensor_data WHERE sensor_id = $1 ORDER BY sensor_data_id",
    )
    .bind(sensor_id)
    .fetch_all(conn)
    .await
}

// Every single-row accessor below is scoped to both ids so a reading can
// never be reached through a sensor it does not belong to.

pub async fn find_scoped(
    conn: &PgPool,
    sensor_id: i32,
    sensor_data_id: i32,
) -> Result<Option<SensorData>, sqlx::Error> {
    sqlx::query_as::<_, SensorData>(
        "SELECT * FROM sensor_data WHERE sensor_id = $1 AND sensor_data_id = $2",
    )
    .bind(sensor_id)
    .bind(sensor_data_id)
    .fetch_optional(conn)
    .await
}

pub async fn update_scoped(
    conn: &PgPool,
    sensor_id: i32,
    sensor_data_id: i32,
    fields: &SensorDataFields,
) -> Result<Option<SensorData>, sqlx::Error> {
    sqlx::query_as::<_, SensorData>(
        "UPDATE sensor_data \
         SET ph = $3, shading_index = $4, air_humidity = $5, soil_humidity = $6, \
             soil_nutrients = $7, temperature = $8 \
         WHERE sensor_id = $1 AND sensor_data_id = $2 RETURNING *",
    )
    .bind(sensor_id)
    .bind(sensor_data_id)
    .bind(fields.ph)
    .bind(fields.shading_index)
    .bind(fields.air_humidity)
    .bind(fields.soil_humidity)
    .bind(fields.soil_nutrients.as_deref())
    .bind(fields.temperature)
    .fetch_optional(conn)
    .await
}

pub async fn delete_scoped(
    conn: &PgPool,
    sensor_id: i32,
    sensor_data_id: i32,
) -> Result<Option<SensorData>, sqlx::Error> {
    sqlx::query_as::<_, SensorData>(
        "DELETE FROM sensor_data WHERE sensor_id = $1 AND sensor_data_id = $2 RETURNING *",
    )
    .bind(sensor_id)
    .bind(sensor_data_id)
    .fetch_optional(conn)
    .await
}
