use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::scoring::skills::parse_skill_list;
use crate::scoring::ResumeProfile;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub file_key: String,
    pub original_filename: String,
    pub uploaded_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub education: String,
    pub experience: String,
    /// Comma-separated.
    pub skills: String,
    pub raw_text: String,
}

impl ResumeRow {
    pub fn skills_list(&self) -> Vec<String> {
        parse_skill_list(&self.skills)
    }

    pub fn to_profile(&self) -> ResumeProfile {
        ResumeProfile {
            skills: self.skills_list(),
            raw_text: self.raw_text.clone(),
            education: self.education.clone(),
        }
    }
}

/// Partial correction of extracted fields. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractedDataUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<String>,
}

impl ExtractedDataUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.education.is_none()
            && self.experience.is_none()
            && self.skills.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row(name: &str, skills: &str) -> ResumeRow {
        ResumeRow {
            id: Uuid::new_v4(),
            file_key: "resumes/x.pdf".to_string(),
            original_filename: "x.pdf".to_string(),
            uploaded_at: Utc::now(),
            name: name.to_string(),
            email: String::new(),
            phone: String::new(),
            education: "BSc Computer Science".to_string(),
            experience: String::new(),
            skills: skills.to_string(),
            raw_text: "raw".to_string(),
        }
    }

    #[test]
    fn test_empty_skills_is_empty_list() {
        assert!(make_row("Ann Lee", "").skills_list().is_empty());
    }

    #[test]
    fn test_profile_carries_engine_fields() {
        let profile = make_row("Ann Lee", "rust, go").to_profile();
        assert_eq!(profile.skills, vec!["rust", "go"]);
        assert_eq!(profile.raw_text, "raw");
        assert_eq!(profile.education, "BSc Computer Science");
    }

    #[test]
    fn test_update_ignores_unknown_fields_and_detects_empty() {
        let update: ExtractedDataUpdate =
            serde_json::from_str(r#"{"raw_text": "nope"}"#).unwrap();
        assert!(update.is_empty());

        let update: ExtractedDataUpdate = serde_json::from_str(r#"{"skills": "rust"}"#).unwrap();
        assert!(!update.is_empty());
        assert_eq!(update.skills.as_deref(), Some("rust"));
    }
}
