use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// A registered account. The stored bcrypt hash never serializes into
/// API responses.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub creation_date: DateTime<Utc>,
}

pub async fn insert(
    conn: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"INSERT INTO "user" (name, email, password) VALUES ($1, $2, $3) RETURNING *"#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(conn)
    .await
}

pub async fn find_by_email(conn: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(r#"SELECT * FROM "user" WHERE email = $1"#)
        .bind(email)
        .fetch_optional(conn)
        .await
}

pub async fn find_by_id(conn: &PgPool, user_id: i32) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(r#"SELECT * FROM "user" WHERE user_id = $1"#)
        .bind(user_id)
        .fetch_optional(conn)
        .await
}
