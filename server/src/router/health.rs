use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health/ping", get(ping))
}
