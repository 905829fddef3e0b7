//! Route table.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/data/{source}", get(handlers::get_data))
        .route("/chat", post(handlers::chat))
        .route("/tools", get(handlers::list_tools))
        .route("/tools/execute", post(handlers::execute_tool))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
