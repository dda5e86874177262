//! Text cleanup helpers for API payloads.

use std::sync::OnceLock;

use regex::Regex;

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex is valid"))
}

/// Collapse every whitespace run to a single space and trim the ends.
///
/// ORCID titles frequently carry newlines and doubled spaces pasted in from
/// publisher pages; the rendered page should show a single clean line.
pub fn collapse_whitespace(text: &str) -> String {
    whitespace_run().replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_runs_and_trims() {
        assert_eq!(
            collapse_whitespace("  A   title\n\twith  gaps  "),
            "A title with gaps"
        );
    }

    #[test]
    fn test_leaves_clean_text_alone() {
        assert_eq!(collapse_whitespace("Already clean"), "Already clean");
    }

    #[test]
    fn test_whitespace_only_becomes_empty() {
        assert_eq!(collapse_whitespace(" \n\t "), "");
    }
}
