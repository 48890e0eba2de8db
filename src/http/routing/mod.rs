pub mod todos;

use axum::{Json, Router, routing::get};
use serde_json::json;

pub fn app(router: Router) -> Router {
    Router::new()
        .route("/", get(|| async { Json(json!({ "name": "todo-api", "status": "ok" })) }))
        .route("/health", get(|| async { "ok" }))
        .merge(router)
}
