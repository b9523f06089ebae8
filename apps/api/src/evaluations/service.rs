use serde::Deserialize;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::handlers::fetch_job;
use crate::models::evaluation::EvaluationRow;
use crate::resumes::handlers::fetch_resume;
use crate::scoring::ScoreBreakdown;
use crate::state::AppState;

/// Evaluation columns plus the display names of what was compared.
const EVALUATION_SELECT: &str = r#"
    SELECT e.*,
           CASE WHEN r.name = '' THEN 'Unknown' ELSE r.name END AS resume_name,
           j.title AS job_title
    FROM evaluations e
    JOIN resumes r ON r.id = e.resume_id
    JOIN job_postings j ON j.id = e.job_posting_id
"#;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_id: Option<Uuid>,
    pub job_posting_id: Option<Uuid>,
}

impl AnalyzeRequest {
    /// Both ids, or a validation error naming what is missing.
    pub fn ids(&self) -> Result<(Uuid, Uuid), AppError> {
        match (self.resume_id, self.job_posting_id) {
            (Some(resume_id), Some(job_posting_id)) => Ok((resume_id, job_posting_id)),
            (None, None) => Err(AppError::Validation(
                "resume_id and job_posting_id are required".to_string(),
            )),
            (None, _) => Err(AppError::Validation("resume_id is required".to_string())),
            (_, None) => Err(AppError::Validation(
                "job_posting_id is required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvaluationFilter {
    pub job_posting_id: Option<Uuid>,
    pub resume_id: Option<Uuid>,
}

impl EvaluationFilter {
    /// Filtering by job ranks its candidates; otherwise newest first.
    fn order_by(&self) -> &'static str {
        if self.job_posting_id.is_some() {
            "e.final_score DESC, resume_name ASC"
        } else {
            "e.created_at DESC"
        }
    }
}

pub struct AnalyzeOutcome {
    pub evaluation: EvaluationRow,
    /// False when an evaluation for the pair already existed.
    pub created: bool,
}

/// Scores a resume against a job posting and stores the result.
///
/// A pair is evaluated once: if a result already exists it is returned unchanged.
pub async fn analyze(
    state: &AppState,
    request: &AnalyzeRequest,
) -> Result<AnalyzeOutcome, AppError> {
    let (resume_id, job_posting_id) = request.ids()?;

    let resume = fetch_resume(state, resume_id).await?;
    let job = fetch_job(state, job_posting_id).await?;

    if let Some(existing) = find_by_pair(&state.db, resume_id, job_posting_id).await? {
        return Ok(AnalyzeOutcome {
            evaluation: existing,
            created: false,
        });
    }

    let scorer = state.scorer.clone();
    let resume_profile = resume.to_profile();
    let job_profile = job.to_profile();
    // TF-IDF over full resume text is CPU-bound
    let breakdown =
        tokio::task::spawn_blocking(move || scorer.evaluate(&resume_profile, &job_profile))
            .await
            .map_err(|e| AppError::Internal(e.into()))?;

    let inserted = insert(&state.db, resume_id, job_posting_id, &breakdown).await?;

    let evaluation = find_by_pair(&state.db, resume_id, job_posting_id)
        .await?
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "evaluation for resume {resume_id} / job {job_posting_id} vanished after insert"
            ))
        })?;

    if inserted {
        info!(
            "Evaluated resume {} against job {} with {}: {:.2} ({})",
            resume_id,
            job_posting_id,
            state.scorer.backend(),
            evaluation.final_score,
            evaluation.category
        );
    }

    Ok(AnalyzeOutcome {
        evaluation,
        created: inserted,
    })
}

/// Inserts a fresh evaluation. Returns false if a concurrent request stored one first.
async fn insert(
    pool: &PgPool,
    resume_id: Uuid,
    job_posting_id: Uuid,
    breakdown: &ScoreBreakdown,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO evaluations
            (id, resume_id, job_posting_id, skill_match_score, experience_score,
             education_score, cosine_similarity_score, final_score, category,
             matched_skills, missing_skills, keyword_highlights)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        ON CONFLICT (resume_id, job_posting_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(resume_id)
    .bind(job_posting_id)
    .bind(breakdown.skill_match_score)
    .bind(breakdown.experience_score)
    .bind(breakdown.education_score)
    .bind(breakdown.cosine_similarity_score)
    .bind(breakdown.final_score)
    .bind(breakdown.category.as_str())
    .bind(Json(&breakdown.matched_skills))
    .bind(Json(&breakdown.missing_skills))
    .bind(Json(&breakdown.keyword_highlights))
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn find_by_pair(
    pool: &PgPool,
    resume_id: Uuid,
    job_posting_id: Uuid,
) -> Result<Option<EvaluationRow>, AppError> {
    let sql = format!("{EVALUATION_SELECT} WHERE e.resume_id = $1 AND e.job_posting_id = $2");
    let row = sqlx::query_as(&sql)
        .bind(resume_id)
        .bind(job_posting_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<EvaluationRow, AppError> {
    let sql = format!("{EVALUATION_SELECT} WHERE e.id = $1");
    let row: Option<EvaluationRow> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;
    row.ok_or_else(|| AppError::NotFound(format!("Evaluation {id} not found")))
}

pub async fn list(
    pool: &PgPool,
    filter: &EvaluationFilter,
) -> Result<Vec<EvaluationRow>, AppError> {
    let sql = format!(
        "{EVALUATION_SELECT}
         WHERE ($1::uuid IS NULL OR e.job_posting_id = $1)
           AND ($2::uuid IS NULL OR e.resume_id = $2)
         ORDER BY {}",
        filter.order_by()
    );
    let rows = sqlx::query_as(&sql)
        .bind(filter.job_posting_id)
        .bind(filter.resume_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
