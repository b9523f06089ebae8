pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::evaluations::handlers as evaluations;
use crate::jobs::handlers as jobs;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Job postings
        .route(
            "/api/v1/job-postings",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route(
            "/api/v1/job-postings/:id",
            get(jobs::handle_get_job)
                .put(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        // Resumes
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes)
                .post(resumes::handle_upload_resume)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume).delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/extracted-data",
            put(resumes::handle_update_extracted_data),
        )
        // Evaluations
        .route(
            "/api/v1/evaluations",
            get(evaluations::handle_list_evaluations),
        )
        .route(
            "/api/v1/evaluations/analyze",
            post(evaluations::handle_analyze),
        )
        .route(
            "/api/v1/evaluations/:id",
            get(evaluations::handle_get_evaluation).delete(evaluations::handle_delete_evaluation),
        )
        .with_state(state)
}
