use serde::{Deserialize, Serialize};
use std::env;

/// Process configuration, resolved once in `main` and carried in
/// [`crate::state::AppState`] from then on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    /// Bearer token lifetime in seconds.
    pub token_expiry_secs: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("AGROSENSE_PORT").or_else(|_| env::var("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT_SECS") {
            self.database.connect_timeout_secs =
                v.parse().unwrap_or(self.database.connect_timeout_secs);
        }

        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("TOKEN_EXPIRY_SECS") {
            self.security.token_expiry_secs =
                v.parse().unwrap_or(self.security.token_expiry_secs);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: "postgres://localhost:5432/agrosense".to_string(),
                max_connections: 10,
                connect_timeout_secs: 30,
            },
            security: SecurityConfig {
                jwt_secret: "dev-secret-change-me".to_string(),
                token_expiry_secs: 3600,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: "postgres://localhost:5432/agrosense".to_string(),
                max_connections: 20,
                connect_timeout_secs: 10,
            },
            security: SecurityConfig {
                // Must come from JWT_SECRET in any deployed environment
                jwt_secret: String::new(),
                token_expiry_secs: 3600,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: "postgres://localhost:5432/agrosense".to_string(),
                max_connections: 50,
                connect_timeout_secs: 5,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                token_expiry_secs: 3600,
            },
        }
    }
}
