use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// Alert severity. Stored and serialized as its uppercase string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Info => "INFO",
            AlertLevel::Warning => "WARNING",
            AlertLevel::Critical => "CRITICAL",
        }
    }
}

impl std::str::FromStr for AlertLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INFO" => Ok(AlertLevel::Info),
            "WARNING" => Ok(AlertLevel::Warning),
            "CRITICAL" => Ok(AlertLevel::Critical),
            other => Err(format!("invalid alert level: {}", other)),
        }
    }
}

/// An out-of-range condition raised against a sensor.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub alert_id: i32,
    pub sensor_id: i32,
    pub message: String,
    pub level: String,
    pub timestamp: DateTime<Utc>,
}

pub async fn insert(
    conn: &PgPool,
    sensor_id: i32,
    message: &str,
    level: AlertLevel,
) -> Result<Alert, sqlx::Error> {
    sqlx::query_as::<_, Alert>(
        "INSERT INTO alert (sensor_id, message, level) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(sensor_id)
    .bind(message)
    .bind(level.as_str())
    .fetch_one(conn)
    .await
}

pub async fn list_for_sensor(conn: &PgPool, sensor_id: i32) -> Result<Vec<Alert>, sqlx::Error> {
    sqlx::query_as::<_, Alert>("SELECT * FROM alert WHERE sensor_id = $1 ORDER BY alert_id")
        .bind(sensor_id)
        .fetch_all(conn)
        .await
}

/// Fetch an alert only if its parent sensor belongs to the given user.
/// The item routes carry no sensor id, so ownership resolves through the
/// join; missing and foreign alerts are indistinguishable.
pub async fn find_owned(
    conn: &PgPool,
    alert_id: i32,
    user_id: i32,
) -> Result<Option<Alert>, sqlx::Error> {
    sqlx::query_as::<_, Alert>(
        "SELECT a.* FROM alert a \
         JOIN sensor s ON s.sensor_id = a.sensor_id \
         WHERE a.alert_id = $1 AND s.user_id = $2",
    )
    .bind(alert_id)
    .bind(user_id)
    .fetch_optional(conn)
    .await
}

// Callers must resolve ownership first; these operate on the primary key.

pub async fn update(
    conn: &PgPool,
    alert_id: i32,
    message: &str,
    level: AlertLevel,
) -> Result<Option<Alert>, sqlx::Error> {
    sqlx::query_as::<_, Alert>(
        "UPDATE alert SET message = $2, level = $3 WHERE alert_id = $1 RETURNING *",
    )
    .bind(alert_id)
    .bind(message)
    .bind(level.as_str())
    .fetch_optional(conn)
    .await
}

pub async fn delete(conn: &PgPool, alert_id: i32) -> Result<Option<Alert>, sqlx::Error> {
    sqlx::query_as::<_, Alert>("DELETE FROM alert WHERE alert_id = $1 RETURNING *")
        .bind(alert_id)
        .fetch_optional(conn)
        .await
}
