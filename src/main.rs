use axum::extract::State;
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use agrosense_api::config::AppConfig;
use agrosense_api::database;
use agrosense_api::middleware::auth::require_auth;
use agrosense_api::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    tracing::info!("Starting AgroSense API in {:?} mode", config.environment);

    let pool = database::connect(&config.database)
        .unwrap_or_else(|e| panic!("invalid database configuration: {}", e));

    if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
        tracing::warn!("database migrations not applied: {}", e);
    }

    let port = config.server.port;
    let state = AppState::new(config, pool);
    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("AgroSense API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        // Protected (bearer token required)
        .merge(protected_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use agrosense_api::handlers::public::auth;

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/login", post(auth::login))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use agrosense_api::handlers::protected::{alert, sensor, sensor_data, user};

    Router::new()
        // Account
        .route("/users/me", get(user::me))
        .route("/me", get(user::me))
        // Sensors
        .route("/sensors", post(sensor::create).get(sensor::list))
        .route(
            "/sensors/:sensor_id",
            get(sensor::get).put(sensor::update).delete(sensor::delete),
        )
        // Readings, scoped to their parent sensor
        .route(
            "/sensors/:sensor_id/data",
            post(sensor_data::create).get(sensor_data::list),
        )
        .route(
            "/sensors/:sensor_id/data/:data_id",
            get(sensor_data::get)
                .put(sensor_data::update)
                .delete(sensor_data::delete),
        )
        // Alerts: collection routes nested under the sensor, item routes flat
        .route(
            "/sensors/:sensor_id/alert",
            post(alert::create).get(alert::list),
        )
        .route(
            "/sensors/:sensor_id/alerts",
            post(alert::create).get(alert::list),
        )
        .route(
            "/alert/:alert_id",
            get(alert::get).put(alert::update).delete(alert::delete),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "AgroSense API",
            "version": version,
            "description": "REST backend for agricultural sensor monitoring",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "auth": "/auth/register, /auth/login (public - token acquisition)",
                "account": "/users/me (protected)",
                "sensors": "/sensors[/:sensorId] (protected)",
                "readings": "/sensors/:sensorId/data[/:dataId] (protected)",
                "alerts": "/sensors/:sensorId/alerts, /alert/:alertId (protected)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
