use tracing::debug;

use crate::scoring::normalize::normalize_text;
use crate::scoring::tfidf::{fit_transform, TfidfOptions, VectorizeError};

const KEYWORD_OPTIONS: TfidfOptions = TfidfOptions {
    max_ngram: 2,
    max_features: 50,
};

/// How many of the job's strongest terms are considered.
const TOP_JOB_TERMS: usize = 10;
/// Upper bound on highlights returned.
pub const MAX_HIGHLIGHTS: usize = 5;

/// The job description's top-weighted terms and bigrams that also appear in the resume.
///
/// Order follows descending weight in the job description. Failure yields an empty list.
pub fn keyword_highlights(resume_text: &str, job_description: &str) -> Vec<String> {
    match highlights(resume_text, job_description) {
        Ok(found) => found,
        Err(e) => {
            debug!("Keyword highlights degraded to empty: {e}");
            vec![]
        }
    }
}

fn highlights(resume_text: &str, job_description: &str) -> Result<Vec<String>, VectorizeError> {
    let job = normalize_text(job_description);
    let matrix = fit_transform(&[job.as_str()], &KEYWORD_OPTIONS)?;

    let resume = normalize_text(resume_text);
    Ok(matrix
        .ranked_features(0)
        .into_iter()
        .take(TOP_JOB_TERMS)
        .filter(|(term, _)| resume.contains(term))
        .take(MAX_HIGHLIGHTS)
        .map(|(term, _)| term.to_string())
        .collect())
}
