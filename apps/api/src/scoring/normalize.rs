/// Lowercases text, turns every character that is not a letter, digit, or whitespace
/// into a space, then collapses whitespace runs and trims.
pub fn normalize_text(text: &str) -> String {
    let spaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(normalize_text("Node.js, React!"), "node js react");
    }

    #[test]
    fn test_collapses_whitespace_and_trims() {
        assert_eq!(normalize_text("  Rust \t\n  Go  "), "rust go");
    }

    #[test]
    fn test_empty_input_is_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" ,;- "), "");
    }

    #[test]
    fn test_keeps_digits_and_non_ascii_letters() {
        assert_eq!(normalize_text("C++ 11 / Café"), "c 11 café");
    }

    #[test]
    fn test_underscore_is_treated_as_punctuation() {
        assert_eq!(normalize_text("snake_case"), "snake case");
    }

    #[test]
    fn test_is_idempotent() {
        let once = normalize_text("Senior  Engineer (Backend) — 5+ yrs");
        assert_eq!(normalize_text(&once), once);
    }
}
