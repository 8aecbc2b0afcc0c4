// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{edit_handler, health_handler, metrics_handler};
use super::middleware::{cors_layer, request_id_layers};
use crate::config::AppConfig;
use crate::editor::ImageEditor;
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub editor: Arc<ImageEditor>,
}

pub fn create_router(config: AppConfig, editor: ImageEditor) -> Router {
    let max_upload_bytes = config.server.max_upload_bytes;
    let state = AppState {
        config,
        editor: Arc::new(editor),
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/v1/edits", post(edit_handler))
        // Multipart defaults to 2MB; oversize uploads surface as multipart read errors
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
