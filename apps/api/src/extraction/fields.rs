use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::ExtractedResume;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});
static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[•·\-\*]").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const NAME_SCAN_LINES: usize = 5;
const NAME_MAX_CHARS: usize = 50;

const EDUCATION_HEADINGS: &[&str] = &[
    "education",
    "degree",
    "university",
    "college",
    "bachelor",
    "master",
    "phd",
    "diploma",
];
const EXPERIENCE_HEADINGS: &[&str] = &[
    "experience",
    "work",
    "employment",
    "career",
    "position",
    "job",
];
const SKILLS_HEADINGS: &[&str] = &[
    "skills",
    "technical skills",
    "technologies",
    "programming",
    "tools",
];
/// Lines under a skills heading that mention these belong to another section.
const SKILLS_STOP_MARKERS: &[&str] = &["experience", "education", "project"];

/// A block of lines following the first line that mentions a heading keyword.
struct SectionWindow {
    headings: &'static [&'static str],
    window: usize,
    keep: usize,
}

const EDUCATION_SECTION: SectionWindow = SectionWindow {
    headings: EDUCATION_HEADINGS,
    window: 10,
    keep: 5,
};

const EXPERIENCE_SECTION: SectionWindow = SectionWindow {
    headings: EXPERIENCE_HEADINGS,
    window: 15,
    keep: 10,
};

/// Runs every field heuristic over the raw resume text.
pub fn extract_fields(raw_text: String) -> ExtractedResume {
    ExtractedResume {
        name: extract_name(&raw_text).unwrap_or_default(),
        email: extract_email(&raw_text).unwrap_or_default(),
        phone: extract_phone(&raw_text).unwrap_or_default(),
        education: extract_section(&raw_text, &EDUCATION_SECTION),
        experience: extract_section(&raw_text, &EXPERIENCE_SECTION),
        skills: extract_skills(&raw_text),
        raw_text,
    }
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

/// The first of the opening lines that looks like a name: two or more words, short,
/// and no contact details.
pub fn extract_name(text: &str) -> Option<String> {
    text.lines()
        .take(NAME_SCAN_LINES)
        .map(str::trim)
        .find(|line| {
            !line.is_empty()
                && !EMAIL_RE.is_match(line)
                && !PHONE_RE.is_match(line)
                && line.split_whitespace().count() >= 2
                && line.chars().count() < NAME_MAX_CHARS
        })
        .map(String::from)
}

/// Lowercased, non-empty lines from the first heading hit onwards, newline-joined.
fn extract_section(text: &str, section: &SectionWindow) -> String {
    let lines: Vec<String> = text.to_lowercase().lines().map(String::from).collect();

    let Some(start) = lines
        .iter()
        .position(|line| section.headings.iter().any(|kw| line.contains(kw)))
    else {
        return String::new();
    };

    lines
        .iter()
        .skip(start)
        .take(section.window)
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .take(section.keep)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Comma-separated skills from the lines under the first skills heading.
///
/// Bullet characters become commas so the result splits cleanly into a skill list.
pub fn extract_skills(text: &str) -> String {
    let lines: Vec<String> = text.to_lowercase().lines().map(String::from).collect();

    let Some(heading) = lines
        .iter()
        .position(|line| SKILLS_HEADINGS.iter().any(|kw| line.contains(kw)))
    else {
        return String::new();
    };

    let collected: Vec<&str> = lines
        .iter()
        .skip(heading + 1)
        .take(7)
        .filter(|line| {
            !line.trim().is_empty() && !SKILLS_STOP_MARKERS.iter().any(|kw| line.contains(kw))
        })
        .map(|line| line.trim())
        .collect();

    let joined = collected.join(" ");
    let with_commas = BULLET_RE.replace_all(&joined, ",");
    WHITESPACE_RE.replace_all(&with_commas, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::skills::parse_skill_list;

    const SAMPLE: &str = "\
Jane Q Developer
jane.dev@example.com | +1 (555) 123-4567

Summary
Backend engineer with 6 years of experience building APIs.

Work Experience
Acme Corp — Senior Engineer
Led migration to Rust services

Education
Bachelor of Science in Computer Science
State University, 2015

Technical Skills
• Rust • Python • PostgreSQL
- Docker, Kubernetes
";

    #[test]
    fn test_email_and_phone() {
        assert_eq!(extract_email(SAMPLE).as_deref(), Some("jane.dev@example.com"));
        assert_eq!(extract_phone(SAMPLE).as_deref(), Some("+1 (555) 123-4567"));
    }

    #[test]
    fn test_missing_contact_fields_are_none() {
        assert_eq!(extract_email("no contact info"), None);
        assert_eq!(extract_phone("call me maybe"), None);
    }

    #[test]
    fn test_name_is_first_plausible_line() {
        assert_eq!(extract_name(SAMPLE).as_deref(), Some("Jane Q Developer"));
    }

    #[test]
    fn test_name_skips_single_words_and_contact_lines() {
        let text = "RESUME\nbob@example.com\nBob Stone\n";
        assert_eq!(extract_name(text).as_deref(), Some("Bob Stone"));
    }

    #[test]
    fn test_name_only_scans_opening_lines() {
        let text = "A\nB\nC\nD\nE\nLate Name Here\n";
        assert_eq!(extract_name(text), None);
    }

    #[test]
    fn test_skills_section_becomes_comma_list() {
        let skills = extract_skills(SAMPLE);
        let parsed = parse_skill_list(&skills);
        assert_eq!(
            parsed,
            vec!["rust", "python", "postgresql", "docker", "kubernetes"]
        );
    }

    #[test]
    fn test_skills_stop_at_other_sections() {
        let text = "Skills\nGo, SQL\nWork Experience\nAcme\n";
        assert_eq!(extract_skills(text), "go, sql acme");
    }

    #[test]
    fn test_no_skills_heading_is_empty() {
        assert_eq!(extract_skills("Nothing relevant here"), "");
    }

    #[test]
    fn test_experience_section_starts_at_first_keyword() {
        let experience = extract_section(SAMPLE, &EXPERIENCE_SECTION);
        assert!(experience.starts_with("backend engineer with 6 years of experience"));
        assert!(experience.lines().count() <= 10);
    }

    #[test]
    fn test_education_section_keeps_five_lines() {
        let text = "Education\nBSc\nMSc\nPhD\nPostdoc\nFellowship\nMore\n";
        let education = extract_section(text, &EDUCATION_SECTION);
        assert_eq!(education, "education\nbsc\nmsc\nphd\npostdoc");
    }

    #[test]
    fn test_extract_fields_fills_record() {
        let record = extract_fields(SAMPLE.to_string());
        assert_eq!(record.raw_text, SAMPLE);
        assert_eq!(record.name, "Jane Q Developer");
        assert!(record.education.contains("bachelor of science in computer science"));
        assert!(!record.skills.is_empty());
    }

    #[test]
    fn test_extract_fields_on_blank_text() {
        let record = extract_fields(String::new());
        assert_eq!(record, ExtractedResume::default());
    }
}
