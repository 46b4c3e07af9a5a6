//! Health check handler

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct HealthState {
    /// `None` when running on in-memory storage
    pub db: Option<DatabaseConnection>,
    pub started_at: Arc<Instant>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: ComponentHealth,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    /// `ok`, `error` or `in-memory`
    pub status: String,
    pub latency_ms: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match &state.db {
        Some(db) => {
            let started = Instant::now();
            let ping = db
                .execute(Statement::from_string(
                    db.get_database_backend(),
                    "SELECT 1".to_string(),
                ))
                .await;
            match ping {
                Ok(_) => ComponentHealth {
                    status: "ok".to_string(),
                    latency_ms: Some(started.elapsed().as_millis() as u64),
                },
                Err(_) => ComponentHealth {
                    status: "error".to_string(),
                    latency_ms: None,
                },
            }
        }
        None => ComponentHealth {
            status: "in-memory".to_string(),
            latency_ms: None,
        },
    };

    let (http_status, status) = if database.status == "error" {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    } else {
        (StatusCode::OK, "ok")
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            database,
        }),
    )
}
