//! Health check endpoint
//!
//! GET /health reports overall status, uptime, and database connectivity.
//! Returns 200 when MongoDB answers a ping, 503 otherwise.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

use crate::routes::json_response;
use crate::server::AppState;

/// Health response body
#[derive(Serialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: &'static str,
    /// Current timestamp
    pub timestamp: String,
    /// Uptime in seconds
    pub uptime: u64,
    /// Database connectivity details
    pub database: DatabaseHealth,
    /// Deployment environment label
    pub environment: String,
    /// Service version
    pub version: &'static str,
}

/// Database connectivity details
#[derive(Serialize)]
pub struct DatabaseHealth {
    /// "connected" or "disconnected"
    pub status: &'static str,
    /// Database name
    pub name: String,
}

/// Handle GET /health and /healthz
pub async fn health_check(state: Arc<AppState>) -> Response<Full<Bytes>> {
    let connected = state.store.ping().await.is_ok();

    let response = HealthResponse {
        status: if connected { "healthy" } else { "unhealthy" },
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime: state.started.elapsed().as_secs(),
        database: DatabaseHealth {
            status: if connected { "connected" } else { "disconnected" },
            name: state.store.db_name().to_string(),
        },
        environment: state.args.environment.clone(),
        version: env!("CARGO_PKG_VERSION"),
    };

    let status = if connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    json_response(status, &response)
}
