//! # bt-api
//!
//! The web routing and orchestration layer for the bug tracker.

pub mod error;
pub mod handlers;
pub mod middleware;

use axum::routing::get;
use axum::Router;
use bt_core::traits::{AuthProvider, BugRepo};
use std::sync::Arc;

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn BugRepo>,
    pub auth: Arc<dyn AuthProvider>,
}

/// Builds the REST surface under `/api/bugs`.
///
/// Reads are open; mutations pull a [`middleware::Caller`] out of the
/// request and therefore require a valid bearer token. The main binary
/// mounts the static client around this router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/bugs",
            get(handlers::list_bugs).post(handlers::create_bug),
        )
        .route(
            "/api/bugs/{id}",
            get(handlers::get_bug)
                .put(handlers::update_bug)
                .delete(handlers::delete_bug),
        )
        .with_state(state)
}
