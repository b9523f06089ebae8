use once_cell::sync::Lazy;
use regex::Regex;

static YEARS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)\s*(?:years?|yrs?)").unwrap());

const EXPERIENCE_KEYWORDS: &[&str] = &[
    "experience",
    "worked",
    "developed",
    "managed",
    "led",
    "created",
];

/// Keyword fallback never reaches a perfect score.
const KEYWORD_SCORE_CAP: f64 = 70.0;
const KEYWORD_SCORE_STEP: f64 = 15.0;

/// Scores resume text against the years of experience a job asks for.
///
/// Explicit mentions ("5 years", "3yrs") win: the largest one is compared to
/// `required_years`. With no mention, falls back to counting experience keywords.
pub fn score_experience(resume_text: &str, required_years: u32) -> f64 {
    let text_lower = resume_text.to_lowercase();

    if let Some(max_years) = max_years_mentioned(&text_lower) {
        let required = u64::from(required_years);
        if required == 0 || max_years >= required {
            return 100.0;
        }
        return max_years as f64 / required as f64 * 100.0;
    }

    let keyword_count: usize = EXPERIENCE_KEYWORDS
        .iter()
        .map(|kw| text_lower.matches(kw).count())
        .sum();

    (keyword_count as f64 * KEYWORD_SCORE_STEP).min(KEYWORD_SCORE_CAP)
}

/// Largest number directly followed by a year unit. Overlong numbers saturate.
fn max_years_mentioned(text_lower: &str) -> Option<u64> {
    YEARS_RE
        .captures_iter(text_lower)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fewer_years_scales_linearly() {
        let score = score_experience("I have 3 years of experience in backend work", 5);
        assert!((score - 60.0).abs() < 1e-9, "Score was {score}");
    }

    #[test]
    fn test_enough_years_is_full_score() {
        assert_eq!(score_experience("7 years building APIs", 5), 100.0);
        assert_eq!(score_experience("5 Years", 5), 100.0);
    }

    #[test]
    fn test_takes_largest_mention() {
        let text = "2 years at Acme, then 4 yrs at Globex, 1 year freelance";
        let score = score_experience(text, 8);
        assert!((score - 50.0).abs() < 1e-9, "Score was {score}");
    }

    #[test]
    fn test_unit_variants_and_spacing() {
        assert_eq!(max_years_mentioned("10yrs"), Some(10));
        assert_eq!(max_years_mentioned("1 yr"), Some(1));
        assert_eq!(max_years_mentioned("6year"), Some(6));
        assert_eq!(max_years_mentioned("no numbers here"), None);
    }

    #[test]
    fn test_zero_required_years_with_mention_is_full_score() {
        assert_eq!(score_experience("0 years", 0), 100.0);
        assert_eq!(score_experience("2 years", 0), 100.0);
    }

    #[test]
    fn test_keyword_fallback_counts_hits() {
        let text = "Developed the billing service, managed releases and led the on-call rotation";
        let score = score_experience(text, 5);
        assert!((score - 45.0).abs() < 1e-9, "Score was {score}");
    }

    #[test]
    fn test_keyword_fallback_is_capped() {
        let text = "experience experience worked developed managed led created created";
        assert_eq!(score_experience(text, 3), 70.0);
    }

    #[test]
    fn test_repeated_keywords_each_count() {
        assert_eq!(score_experience("created, created", 2), 30.0);
    }

    #[test]
    fn test_zero_required_years_without_mention_uses_keywords() {
        assert_eq!(score_experience("worked on compilers", 0), 15.0);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        assert_eq!(score_experience("", 4), 0.0);
    }

    #[test]
    fn test_huge_number_saturates() {
        assert_eq!(
            score_experience("99999999999999999999999 years", 10),
            100.0
        );
    }
}
