//! Scoring engine: combines the component scorers into one weighted suitability score.
//!
//! Default: `ScoringEngine` with fixed weights 0.4 / 0.3 / 0.2 / 0.1.
//!
//! `AppState` holds an `Arc<dyn ResumeScorer>` so callers never depend on the concrete
//! engine. The engine is stateless and safe to share across threads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::education::score_education;
use crate::scoring::experience::score_experience;
use crate::scoring::keywords::keyword_highlights;
use crate::scoring::similarity::score_similarity;
use crate::scoring::skills::match_skills;

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// The parts of a resume the engine reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub skills: Vec<String>,
    pub raw_text: String,
    pub education: String,
}

/// The parts of a job posting the engine reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobProfile {
    pub skills: Vec<String>,
    pub experience_required: u32,
    pub description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Category
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Excellent,
    Good,
    Average,
    BelowAverage,
}

impl Category {
    /// Classifies a score. Lower bounds are inclusive: 80, 60, 40.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Category::Excellent
        } else if score >= 60.0 {
            Category::Good
        } else if score >= 40.0 {
            Category::Average
        } else {
            Category::BelowAverage
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Excellent => "excellent",
            Category::Good => "good",
            Category::Average => "average",
            Category::BelowAverage => "below_average",
        }
    }

    /// Human-readable band, shown next to the score.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Excellent => "Excellent (80-100)",
            Category::Good => "Good (60-79)",
            Category::Average => "Average (40-59)",
            Category::BelowAverage => "Below Average (0-39)",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "excellent" => Ok(Category::Excellent),
            "good" => Ok(Category::Good),
            "average" => Ok(Category::Average),
            "below_average" => Ok(Category::BelowAverage),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Weights
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skill: f64,
    pub experience: f64,
    pub education: f64,
    pub cosine: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum InvalidWeights {
    #[error("weights must be non-negative")]
    Negative,

    #[error("weights must sum to 1.0, got {0}")]
    BadSum(f64),
}

impl ScoringWeights {
    /// Checks the invariants: every weight non-negative, sum 1.0.
    pub fn validate(&self) -> Result<(), InvalidWeights> {
        if [self.skill, self.experience, self.education, self.cosine]
            .iter()
            .any(|w| *w < 0.0)
        {
            return Err(InvalidWeights::Negative);
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > 1e-9 {
            return Err(InvalidWeights::BadSum(sum));
        }
        Ok(())
    }

    pub fn sum(&self) -> f64 {
        self.skill + self.experience + self.education + self.cosine
    }

    /// skill*w + experience*w + education*w + cosine*w
    pub fn combine(&self, skill: f64, experience: f64, education: f64, cosine: f64) -> f64 {
        self.skill * skill
            + self.experience * experience
            + self.education * education
            + self.cosine * cosine
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: 0.4,
            experience: 0.3,
            education: 0.2,
            cosine: 0.1,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

/// Full result for one (resume, job) pair. All scores are in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skill_match_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub cosine_similarity_score: f64,
    pub final_score: f64,
    pub category: Category,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub keyword_highlights: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching handlers.
pub trait ResumeScorer: Send + Sync {
    fn evaluate(&self, resume: &ResumeProfile, job: &JobProfile) -> ScoreBreakdown;

    /// Backend name, reported for transparency.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// ScoringEngine
// ────────────────────────────────────────────────────────────────────────────

/// Rule-based scorer: skills, experience, education, and TF-IDF similarity.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    weights: ScoringWeights,
}

impl ScoringEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }
}

impl ResumeScorer for ScoringEngine {
    fn evaluate(&self, resume: &ResumeProfile, job: &JobProfile) -> ScoreBreakdown {
        let skills = match_skills(&resume.skills, &job.skills);
        let experience_score = score_experience(&resume.raw_text, job.experience_required);
        let education_score = score_education(&resume.education, &job.description);
        let cosine_similarity_score = score_similarity(&resume.raw_text, &job.description);

        let final_score = self
            .weights
            .combine(
                skills.percentage,
                experience_score,
                education_score,
                cosine_similarity_score,
            )
            .clamp(0.0, 100.0);

        ScoreBreakdown {
            skill_match_score: skills.percentage,
            experience_score,
            education_score,
            cosine_similarity_score,
            final_score,
            category: Category::from_score(final_score),
            matched_skills: skills.matched,
            missing_skills: skills.missing,
            keyword_highlights: keyword_highlights(&resume.raw_text, &job.description),
        }
    }

    fn backend(&self) -> &'static str {
        "rule_based"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn make_resume() -> ResumeProfile {
        ResumeProfile {
            skills: strings(&["Rust", "PostgreSQL", "Docker"]),
            raw_text: "Backend engineer with 6 years of experience. Built Rust services on \
                       PostgreSQL, shipped with Docker and Kubernetes."
                .to_string(),
            education: "Bachelor of Science in Computer Science".to_string(),
        }
    }

    fn make_job() -> JobProfile {
        JobProfile {
            skills: strings(&["Rust", "PostgreSQL", "Kafka"]),
            experience_required: 5,
            description: "We are hiring a Rust engineer to build PostgreSQL-backed services. \
                          Kafka a plus. Bachelor degree preferred."
                .to_string(),
        }
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_final_score_is_weighted_sum() {
        let r = ScoringEngine::default().evaluate(&make_resume(), &make_job());
        let expected = 0.4 * r.skill_match_score
            + 0.3 * r.experience_score
            + 0.2 * r.education_score
            + 0.1 * r.cosine_similarity_score;
        assert_close(r.final_score, expected);
    }

    #[test]
    fn test_realistic_pair_breakdown() {
        let r = ScoringEngine::default().evaluate(&make_resume(), &make_job());
        assert_eq!(r.matched_skills, strings(&["rust", "postgresql"]));
        assert_eq!(r.missing_skills, strings(&["kafka"]));
        assert_eq!(r.experience_score, 100.0);
        assert_eq!(r.education_score, 100.0);
        assert!(r.cosine_similarity_score > 0.0);
        assert!(r.keyword_highlights.len() <= 5);
        assert_eq!(r.category, Category::from_score(r.final_score));
    }

    #[test]
    fn test_is_deterministic() {
        let engine = ScoringEngine::default();
        let first = engine.evaluate(&make_resume(), &make_job());
        for _ in 0..5 {
            assert_eq!(engine.evaluate(&make_resume(), &make_job()), first);
        }
    }

    #[test]
    fn test_empty_inputs_stay_in_range() {
        let r =
            ScoringEngine::default().evaluate(&ResumeProfile::default(), &JobProfile::default());
        for score in [
            r.skill_match_score,
            r.experience_score,
            r.education_score,
            r.cosine_similarity_score,
            r.final_score,
        ] {
            assert!((0.0..=100.0).contains(&score), "Out of range: {score}");
        }
        assert_eq!(r.final_score, 0.0);
        assert_eq!(r.category, Category::BelowAverage);
        assert!(r.matched_skills.is_empty());
        assert!(r.missing_skills.is_empty());
        assert!(r.keyword_highlights.is_empty());
    }

    #[test]
    fn test_identical_resume_and_job_text_gives_full_cosine() {
        let text = "Distributed storage engineer, Rust, Raft consensus, RocksDB";
        let resume = ResumeProfile {
            raw_text: text.to_string(),
            ..Default::default()
        };
        let job = JobProfile {
            description: text.to_string(),
            ..Default::default()
        };
        let r = ScoringEngine::default().evaluate(&resume, &job);
        assert!((r.cosine_similarity_score - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_category_boundaries_are_inclusive() {
        assert_eq!(Category::from_score(100.0), Category::Excellent);
        assert_eq!(Category::from_score(80.0), Category::Excellent);
        assert_eq!(Category::from_score(79.999), Category::Good);
        assert_eq!(Category::from_score(60.0), Category::Good);
        assert_eq!(Category::from_score(59.999), Category::Average);
        assert_eq!(Category::from_score(40.0), Category::Average);
        assert_eq!(Category::from_score(39.999), Category::BelowAverage);
        assert_eq!(Category::from_score(0.0), Category::BelowAverage);
    }

    #[test]
    fn test_category_round_trips_through_str() {
        for c in [
            Category::Excellent,
            Category::Good,
            Category::Average,
            Category::BelowAverage,
        ] {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        }
        assert!("great".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&Category::BelowAverage).unwrap();
        assert_eq!(json, r#""below_average""#);
        assert_eq!(Category::BelowAverage.label(), "Below Average (0-39)");
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        assert_close(ScoringWeights::default().sum(), 1.0);
        assert!(ScoringWeights::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let heavy = ScoringWeights {
            skill: 0.5,
            experience: 0.5,
            education: 0.5,
            cosine: 0.0,
        };
        assert!(matches!(heavy.validate(), Err(InvalidWeights::BadSum(_))));

        let negative = ScoringWeights {
            skill: 1.2,
            experience: -0.2,
            education: 0.0,
            cosine: 0.0,
        };
        assert_eq!(negative.validate(), Err(InvalidWeights::Negative));
    }

    #[test]
    fn test_custom_weights_are_applied() {
        let weights = ScoringWeights {
            skill: 1.0,
            experience: 0.0,
            education: 0.0,
            cosine: 0.0,
        };
        let r = ScoringEngine::new(weights).evaluate(&make_resume(), &make_job());
        assert_close(r.final_score, r.skill_match_score);
    }

    #[test]
    fn test_weighted_sum_within_range_for_extremes() {
        let w = ScoringWeights::default();
        assert_close(w.combine(100.0, 100.0, 100.0, 100.0), 100.0);
        assert_close(w.combine(0.0, 0.0, 0.0, 0.0), 0.0);
        // 0.4*80 + 0.3*60 + 0.2*40 + 0.1*20 = 32 + 18 + 8 + 2 = 60
        assert_close(w.combine(80.0, 60.0, 40.0, 20.0), 60.0);
    }

    #[test]
    fn test_backend_label() {
        assert_eq!(ScoringEngine::default().backend(), "rule_based");
    }
}
