pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use tower_http::catch_panic::CatchPanicLayer;

use crate::errors::panic_response;
use crate::scoring::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api-docs", get(health::api_docs_handler))
        // FitScore API
        .route("/api/v1/fitscore", post(handlers::handle_fitscore))
        .route("/api/v1/fitscore/form", post(handlers::handle_fitscore_form))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
}
