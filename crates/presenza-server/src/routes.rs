//! Router assembly and shared request state.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::upload::UploadConfig;

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Upload-boundary configuration, fixed at startup.
    pub config: Arc<UploadConfig>,
}

impl AppState {
    pub fn new(config: UploadConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/upload", post(handlers::upload_file))
        .with_state(state)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
