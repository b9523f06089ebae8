use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ExtractedDataUpdate, ResumeRow};
use crate::resumes::upload::{discard, read_file_field, store_and_extract, validate_pdf};
use crate::state::AppState;
use crate::storage::resume_key;

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    let resumes: Vec<ResumeRow> =
        sqlx::query_as("SELECT * FROM resumes ORDER BY uploaded_at DESC")
            .fetch_all(&state.db)
            .await?;
    Ok(Json(resumes))
}

/// POST /api/v1/resumes
///
/// Multipart upload with a single PDF in the `file` field. The row is only written once
/// extraction succeeds.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ResumeRow>), AppError> {
    let file = read_file_field(&mut multipart).await?;
    validate_pdf(&file)?;

    let id = Uuid::new_v4();
    let key = resume_key(id);
    let size = file.data.len();
    let extracted = store_and_extract(state.storage.as_ref(), &key, file.data).await?;

    let inserted: Result<ResumeRow, sqlx::Error> = sqlx::query_as(
        r#"
        INSERT INTO resumes
            (id, file_key, original_filename, name, email, phone,
             education, experience, skills, raw_text)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&key)
    .bind(&file.filename)
    .bind(&extracted.name)
    .bind(&extracted.email)
    .bind(&extracted.phone)
    .bind(&extracted.education)
    .bind(&extracted.experience)
    .bind(&extracted.skills)
    .bind(&extracted.raw_text)
    .fetch_one(&state.db)
    .await;

    let resume = match inserted {
        Ok(resume) => resume,
        Err(e) => {
            discard(state.storage.as_ref(), &key).await;
            return Err(e.into());
        }
    };

    info!(
        "Uploaded resume {} ({}, {size} bytes, {} skills extracted)",
        resume.id,
        resume.original_filename,
        resume.skills_list().len()
    );
    Ok((StatusCode::CREATED, Json(resume)))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let resume = fetch_resume(&state, id).await?;
    Ok(Json(resume))
}

/// PUT /api/v1/resumes/:id/extracted-data
///
/// Overwrites only the fields present in the body. Existing evaluations are not rescored.
pub async fn handle_update_extracted_data(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ExtractedDataUpdate>,
) -> Result<Json<ResumeRow>, AppError> {
    if req.is_empty() {
        return Err(AppError::Validation(
            "No extracted fields to update".to_string(),
        ));
    }

    let resume: Option<ResumeRow> = sqlx::query_as(
        r#"
        UPDATE resumes
        SET name = COALESCE($2, name),
            email = COALESCE($3, email),
            phone = COALESCE($4, phone),
            education = COALESCE($5, education),
            experience = COALESCE($6, experience),
            skills = COALESCE($7, skills)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(req.name)
    .bind(req.email)
    .bind(req.phone)
    .bind(req.education)
    .bind(req.experience)
    .bind(req.skills)
    .fetch_optional(&state.db)
    .await?;

    let resume = resume.ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    info!("Updated extracted data for resume {id}");
    Ok(Json(resume))
}

/// DELETE /api/v1/resumes/:id
///
/// Removes the row (evaluations cascade) and then the stored file.
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let file_key: Option<String> =
        sqlx::query_scalar("DELETE FROM resumes WHERE id = $1 RETURNING file_key")
            .bind(id)
            .fetch_optional(&state.db)
            .await?;

    let file_key = file_key.ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    discard(state.storage.as_ref(), &file_key).await;

    info!("Deleted resume {id}");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn fetch_resume(state: &AppState, id: Uuid) -> Result<ResumeRow, AppError> {
    let resume: Option<ResumeRow> = sqlx::query_as("SELECT * FROM resumes WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    resume.ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}
