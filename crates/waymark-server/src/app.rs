//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the application router.
///
/// The navigation API is matched first; everything else falls through to
/// page resolution against the tree.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/navigation", get(handlers::navigation::get_navigation))
        .route("/", get(handlers::pages::get_frontpage))
        .route("/{*path}", get(handlers::pages::get_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
