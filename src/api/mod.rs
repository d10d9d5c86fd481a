//! HTTP transport.
//!
//! Procedures are served under `/api/trpc/<path>` using the tRPC wire
//! envelope: queries are `GET` requests carrying their input as a JSON
//! encoded `input` query parameter, mutations are `POST` requests with a
//! JSON body.

mod crud;
mod health;
pub mod rpc;

use axum::Router;
use enrollment_core::Database;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::service::EnrollmentService;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub service: EnrollmentService,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            service: EnrollmentService::new(db),
        }
    }
}

pub fn create_router(db: Database) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(health::routes())
        .merge(crud::routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(AppState::new(db))
}
