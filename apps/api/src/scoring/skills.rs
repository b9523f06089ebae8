//! Skill matching: overlap between a candidate's declared skills and a job's
//! required skills.

use serde::{Deserialize, Serialize};

use crate::scoring::normalize::normalize_text;

/// Result of comparing resume skills to job skills.
///
/// `matched` and `missing` hold normalized job-skill strings, in job-skill order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub percentage: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl SkillMatch {
    fn empty() -> Self {
        Self {
            percentage: 0.0,
            matched: vec![],
            missing: vec![],
        }
    }
}

/// Splits a comma-separated skill string into trimmed entries.
///
/// Order and duplicates are kept. Entries that are blank after trimming are dropped.
pub fn parse_skill_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Matches job skills against resume skills by substring containment in either
/// direction. The first resume skill that hits wins; no best-match search is done.
pub fn match_skills<R, J>(resume_skills: &[R], job_skills: &[J]) -> SkillMatch
where
    R: AsRef<str>,
    J: AsRef<str>,
{
    if job_skills.is_empty() {
        return SkillMatch::empty();
    }

    let resume_normalized: Vec<String> = resume_skills
        .iter()
        .map(|s| normalize_text(s.as_ref()))
        .collect();

    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for job_skill in job_skills {
        let job_skill = normalize_text(job_skill.as_ref());
        let hit = resume_normalized.iter().any(|resume_skill| {
            resume_skill.contains(&job_skill) || job_skill.contains(resume_skill.as_str())
        });

        if hit {
            matched.push(job_skill);
        } else {
            missing.push(job_skill);
        }
    }

    let percentage = matched.len() as f64 / job_skills.len() as f64 * 100.0;

    SkillMatch {
        percentage,
        matched,
        missing,
    }
}
