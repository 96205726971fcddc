pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/skills", get(handlers::handle_list_skills))
        .route("/api/v1/screen", post(handlers::handle_screen))
        .route("/api/v1/screen/report.csv", post(handlers::handle_screen_csv))
        .route("/api/v1/screen/upload", post(handlers::handle_screen_upload))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
