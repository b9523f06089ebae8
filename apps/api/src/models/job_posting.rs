use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::scoring::skills::parse_skill_list;
use crate::scoring::JobProfile;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostingRow {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub location: String,
    pub description: String,
    /// Comma-separated.
    pub required_skills: String,
    pub experience_required: i32,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl JobPostingRow {
    pub fn skills_list(&self) -> Vec<String> {
        parse_skill_list(&self.required_skills)
    }

    pub fn to_profile(&self) -> JobProfile {
        JobProfile {
            skills: self.skills_list(),
            // The column has a CHECK >= 0
            experience_required: u32::try_from(self.experience_required).unwrap_or(0),
            description: self.description.clone(),
        }
    }
}

/// Create / replace body for a job posting.
#[derive(Debug, Clone, Deserialize)]
pub struct JobPostingPayload {
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub required_skills: String,
    pub experience_required: u32,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
}

impl JobPostingPayload {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title cannot be empty".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(AppError::Validation("description cannot be empty".to_string()));
        }
        if i32::try_from(self.experience_required).is_err() {
            return Err(AppError::Validation(
                "experience_required is out of range".to_string(),
            ));
        }
        for salary in [self.salary_min, self.salary_max].into_iter().flatten() {
            if !salary.is_finite() || salary < 0.0 {
                return Err(AppError::Validation(
                    "salary values must be non-negative numbers".to_string(),
                ));
            }
        }
        if let (Some(min), Some(max)) = (self.salary_min, self.salary_max) {
            if min > max {
                return Err(AppError::Validation(
                    "salary_min cannot exceed salary_max".to_string(),
                ));
            }
        }
        Ok(())
    }
}
