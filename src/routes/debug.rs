use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Check if services are working
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut status = json!({
        "status": "ok",
        "checks": {}
    });

    match &state.cache {
        Some(cache) => {
            let stats = cache.get_stats().await;
            status["checks"]["cache"] = json!({
                "backend": cache.backend_name(),
                "hits": stats.hits,
                "misses": stats.misses,
            });
        }
        None => {
            status["checks"]["cache"] = json!("disabled");
        }
    }

    Json(status)
}
