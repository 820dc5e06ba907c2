//! Free-text matching used by the search boxes.

/// Case-insensitive substring test. An empty `needle` matches any haystack.
///
/// Both sides are lowercased with Unicode rules, so `"ÄRA"` matches `"ära"`.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_needle_matches() {
        assert!(contains_ignore_case("", ""));
        assert!(contains_ignore_case("Battery Pack", ""));
    }

    #[test]
    fn ignores_case_on_both_sides() {
        assert!(contains_ignore_case("Propellers", "PROP"));
        assert!(contains_ignore_case("PROP-002", "prop"));
        assert!(!contains_ignore_case("Battery Pack", "prop"));
    }

    #[test]
    fn unicode_lowercasing() {
        assert!(contains_ignore_case("ÄRA Lager", "ära"));
    }
}
