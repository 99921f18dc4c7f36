//! HTTP API server

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

/// Build the API router using the provided application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/inmuebles",
            get(handlers::list_properties).post(handlers::create_property),
        )
        .route(
            "/propietarios",
            get(handlers::list_owners).post(handlers::create_owner),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
