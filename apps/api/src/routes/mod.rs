pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::classifier::handlers as roles;
use crate::documents::handlers as resumes;
use crate::skills::handlers as skills;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Skills API
        .route("/api/v1/skills/extract", post(skills::handle_extract))
        .route("/api/v1/skills/fit-score", post(skills::handle_fit_score))
        .route("/api/v1/skills/compare", post(skills::handle_compare))
        // Resumes API (uploads)
        .route(
            "/api/v1/resumes/extract",
            post(resumes::handle_resume_extract),
        )
        .route(
            "/api/v1/resumes/compare",
            post(resumes::handle_resume_compare),
        )
        // Roles API
        .route("/api/v1/roles/predict", post(roles::handle_predict_role))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
