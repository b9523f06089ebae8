use tracing::debug;

use crate::scoring::normalize::normalize_text;
use crate::scoring::tfidf::{cosine_similarity, fit_transform, TfidfOptions, VectorizeError};

const SIMILARITY_OPTIONS: TfidfOptions = TfidfOptions {
    max_ngram: 1,
    max_features: 1000,
};

/// TF-IDF cosine similarity between the resume text and the job description, in [0, 100].
///
/// Degenerate input (empty text, nothing left after stop words) scores 0.
pub fn score_similarity(resume_text: &str, job_description: &str) -> f64 {
    match similarity(resume_text, job_description) {
        Ok(sim) => (sim * 100.0).clamp(0.0, 100.0),
        Err(e) => {
            debug!("Similarity degraded to 0: {e}");
            0.0
        }
    }
}

fn similarity(resume_text: &str, job_description: &str) -> Result<f64, VectorizeError> {
    let resume = normalize_text(resume_text);
    let job = normalize_text(job_description);

    let matrix = fit_transform(&[resume.as_str(), job.as_str()], &SIMILARITY_OPTIONS)?;
    match (matrix.row(0), matrix.row(1)) {
        (Some(a), Some(b)) => Ok(cosine_similarity(a, b)),
        _ => Err(VectorizeError::NoDocuments),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_text_is_near_100() {
        let text = "Senior Rust engineer: Tokio, Axum, PostgreSQL, distributed storage.";
        let score = score_similarity(text, text);
        assert!((score - 100.0).abs() < 1e-6, "Score was {score}");
    }

    #[test]
    fn test_identical_after_normalization() {
        let score = score_similarity("RUST, Tokio & Axum!", "rust tokio axum");
        assert!((score - 100.0).abs() < 1e-6, "Score was {score}");
    }

    #[test]
    fn test_no_shared_terms_is_zero() {
        assert_eq!(score_similarity("python django celery", "rust tokio axum"), 0.0);
    }

    #[test]
    fn test_partial_overlap_is_between_bounds() {
        let score = score_similarity(
            "Built payment APIs in Rust and PostgreSQL",
            "We need a Rust developer for payment infrastructure",
        );
        assert!(score > 0.0 && score < 100.0, "Score was {score}");
    }

    #[test]
    fn test_empty_inputs_are_zero() {
        assert_eq!(score_similarity("", ""), 0.0);
        assert_eq!(score_similarity("", "rust developer"), 0.0);
        assert_eq!(score_similarity("the and of", "a an the"), 0.0);
    }

    #[test]
    fn test_is_symmetric() {
        let a = "rust tokio kafka streaming";
        let b = "kafka streaming with java";
        assert!((score_similarity(a, b) - score_similarity(b, a)).abs() < 1e-9);
    }
}
