use crate::infra::{AppState, MemoryBoard};
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use jobboard::board_router;
use jobboard::error::BoardError;
use jobboard::store::MemoryObjectStorage;
use serde_json::json;
use std::sync::Arc;

/// Board API plus the operational endpoints and the upload mirror for in-memory storage.
pub(crate) fn with_board_routes(
    board: Arc<MemoryBoard>,
    storage: Arc<MemoryObjectStorage>,
) -> axum::Router {
    board_router(board)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/uploads/:folder/:public_id",
            axum::routing::get(upload_endpoint),
        )
        .layer(Extension(storage))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn upload_endpoint(
    Extension(storage): Extension<Arc<MemoryObjectStorage>>,
    Path((folder, public_id)): Path<(String, String)>,
) -> Response {
    match storage.object(&folder, &public_id) {
        Some(blob) => ([(header::CONTENT_TYPE, blob.content_type)], blob.bytes).into_response(),
        None => BoardError::not_found("File not found").into_response(),
    }
}
