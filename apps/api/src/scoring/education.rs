const EDUCATION_KEYWORDS: &[&str] = &[
    "degree",
    "bachelor",
    "master",
    "phd",
    "diploma",
    "certification",
];

const RELEVANT_FIELDS: &[&str] = &["computer", "software"];

const CREDENTIAL_POINTS: f64 = 50.0;
const FIELD_POINTS: f64 = 30.0;
const REQUIREMENT_POINTS: f64 = 20.0;

/// Keyword-presence heuristic over the resume's education text.
///
/// +50 for any credential keyword, +30 for a computing field, +20 more when the job
/// description also asks for a credential. Capped at 100.
pub fn score_education(resume_education: &str, job_description: &str) -> f64 {
    let education_lower = resume_education.to_lowercase();
    let job_lower = job_description.to_lowercase();

    let has_credential = contains_any(&education_lower, EDUCATION_KEYWORDS);
    let mut score = 0.0;

    if has_credential {
        score += CREDENTIAL_POINTS;
    }
    if contains_any(&education_lower, RELEVANT_FIELDS) {
        score += FIELD_POINTS;
    }
    if has_credential && contains_any(&job_lower, EDUCATION_KEYWORDS) {
        score += REQUIREMENT_POINTS;
    }

    f64::min(score, 100.0)
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
