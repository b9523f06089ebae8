use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluations::service::{self, AnalyzeRequest, EvaluationFilter};
use crate::models::evaluation::EvaluationResponse;
use crate::state::AppState;

/// POST /api/v1/evaluations/analyze
///
/// 201 with a new evaluation, or 200 with the stored one if the pair was already scored.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<(StatusCode, Json<EvaluationResponse>), AppError> {
    let outcome = service::analyze(&state, &req).await?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.evaluation.into())))
}

/// GET /api/v1/evaluations
pub async fn handle_list_evaluations(
    State(state): State<AppState>,
    Query(filter): Query<EvaluationFilter>,
) -> Result<Json<Vec<EvaluationResponse>>, AppError> {
    let rows = service::list(&state.db, &filter).await?;
    Ok(Json(rows.into_iter().map(EvaluationResponse::from).collect()))
}

/// GET /api/v1/evaluations/:id
pub async fn handle_get_evaluation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EvaluationResponse>, AppError> {
    let row = service::find_by_id(&state.db, id).await?;
    Ok(Json(row.into()))
}

/// DELETE /api/v1/evaluations/:id
pub async fn handle_delete_evaluation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM evaluations WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Evaluation {id} not found")));
    }
    info!("Deleted evaluation {id}");
    Ok(StatusCode::NO_CONTENT)
}
