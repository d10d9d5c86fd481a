use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database_connected: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_connected = state.service.database().ping();

    Json(HealthResponse {
        status: if database_connected { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database_connected,
    })
}
