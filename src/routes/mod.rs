//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The operator's browser loads `/` and posts plain HTML forms back to the
//! action routes. Every action route answers with the full re-rendered page,
//! so the panel works without any client-side script.

pub mod panel;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(panel::page))
        .route("/run", post(panel::run))
        .route("/status", post(panel::status))
        .route("/finalize", post(panel::finalize))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
