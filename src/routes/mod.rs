pub mod debug;
pub mod loop_course;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/courses/loop", post(loop_course::create_loop_course))
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}
