use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job_posting::{JobPostingPayload, JobPostingRow};
use crate::state::AppState;

/// GET /api/v1/job-postings
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobPostingRow>>, AppError> {
    let jobs: Vec<JobPostingRow> =
        sqlx::query_as("SELECT * FROM job_postings ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?;
    Ok(Json(jobs))
}

/// POST /api/v1/job-postings
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(req): Json<JobPostingPayload>,
) -> Result<(StatusCode, Json<JobPostingRow>), AppError> {
    req.validate()?;

    let job: JobPostingRow = sqlx::query_as(
        r#"
        INSERT INTO job_postings
            (id, title, department, location, description, required_skills,
             experience_required, salary_min, salary_max)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.title.trim())
    .bind(&req.department)
    .bind(&req.location)
    .bind(&req.description)
    .bind(&req.required_skills)
    .bind(req.experience_required as i32)
    .bind(req.salary_min)
    .bind(req.salary_max)
    .fetch_one(&state.db)
    .await?;

    info!("Created job posting {} ({})", job.id, job.title);
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/job-postings/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobPostingRow>, AppError> {
    let job = fetch_job(&state, id).await?;
    Ok(Json(job))
}

/// PUT /api/v1/job-postings/:id
///
/// Existing evaluations keep the scores computed against the previous version.
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<JobPostingPayload>,
) -> Result<Json<JobPostingRow>, AppError> {
    req.validate()?;

    let job: Option<JobPostingRow> = sqlx::query_as(
        r#"
        UPDATE job_postings
        SET title = $2, department = $3, location = $4, description = $5,
            required_skills = $6, experience_required = $7,
            salary_min = $8, salary_max = $9
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(req.title.trim())
    .bind(&req.department)
    .bind(&req.location)
    .bind(&req.description)
    .bind(&req.required_skills)
    .bind(req.experience_required as i32)
    .bind(req.salary_min)
    .bind(req.salary_max)
    .fetch_optional(&state.db)
    .await?;

    let job = job.ok_or_else(|| AppError::NotFound(format!("Job posting {id} not found")))?;
    Ok(Json(job))
}

/// DELETE /api/v1/job-postings/:id
///
/// Evaluations against the posting are removed by the foreign-key cascade.
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM job_postings WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Job posting {id} not found")));
    }
    info!("Deleted job posting {id}");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn fetch_job(state: &AppState, id: Uuid) -> Result<JobPostingRow, AppError> {
    let job: Option<JobPostingRow> = sqlx::query_as("SELECT * FROM job_postings WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    job.ok_or_else(|| AppError::NotFound(format!("Job posting {id} not found")))
}
