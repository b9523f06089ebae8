use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::scoring::Category;

/// An evaluation joined with the resume name and job title it refers to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EvaluationRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub job_posting_id: Uuid,
    pub skill_match_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub cosine_similarity_score: f64,
    pub final_score: f64,
    pub category: String,
    pub matched_skills: Json<Vec<String>>,
    pub missing_skills: Json<Vec<String>>,
    pub keyword_highlights: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub resume_name: String,
    pub job_title: String,
}

/// API shape: the row plus a display label for its category.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResponse {
    #[serde(flatten)]
    pub evaluation: EvaluationRow,
    pub category_label: String,
}

impl From<EvaluationRow> for EvaluationResponse {
    fn from(evaluation: EvaluationRow) -> Self {
        let category_label = evaluation
            .category
            .parse::<Category>()
            // Stored scores are authoritative if the text ever drifts
            .unwrap_or_else(|_| Category::from_score(evaluation.final_score))
            .label()
            .to_string();
        Self {
            evaluation,
            category_label,
        }
    }
}
