//! Service routes: liveness, store readiness, build version.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct StatusBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    store: Option<&'static str>,
}

async fn health() -> Json<StatusBody> {
    Json(StatusBody { status: "ok", store: None })
}

/// 200 when the store answers a round trip, 503 otherwise. Names the backend either way.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<StatusBody>) {
    let store = Some(state.store.backend());
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(StatusBody { status: "ok", store })),
        Err(e) => {
            tracing::warn!(backend = state.store.backend(), error = %e, "store ping failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(StatusBody { status: "degraded", store }))
        }
    }
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
