//! Identifier and regex matching helpers.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// Matches any character that cannot appear in a hex identifier.
static NOT_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^0-9a-fA-F]").expect("invalid non-hex pattern"));

/// Returns true if `value` could be a (partial) hex identifier.
///
/// The empty string counts as a hex prefix, so it matches every ID.
pub fn is_hex_prefix(value: &str) -> bool {
    !NOT_HEX.is_match(value)
}

/// A list of unanchored regular expressions, compiled once.
///
/// Patterns that fail to compile are dropped; they can never match.
#[derive(Debug, Clone, Default)]
pub struct PatternList {
    patterns: Vec<Regex>,
}

impl PatternList {
    /// Compiles every pattern in `patterns`, skipping invalid ones.
    pub fn new(patterns: &[String]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|pattern| match Regex::new(pattern) {
                Ok(re) => Some(re),
                Err(err) => {
                    trace!(pattern = %pattern, error = %err, "skipping invalid filter regex");
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    /// Returns true if any pattern matches anywhere in `candidate`.
    pub fn matches_any(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(candidate))
    }

    /// Number of patterns that compiled.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if no pattern compiled.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Returns true if any of `patterns` matches `candidate`.
///
/// Compiles the patterns on every call; use [`PatternList`] when matching
/// many candidates against the same patterns.
pub fn string_match_regex_slice(candidate: &str, patterns: &[String]) -> bool {
    PatternList::new(patterns).matches_any(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_is_hex_prefix() {
        assert!(is_hex_prefix("abc"));
        assert!(is_hex_prefix("ABCDEF0123"));
        assert!(is_hex_prefix(""));
        assert!(!is_hex_prefix("abc.*"));
        assert!(!is_hex_prefix("web"));
        assert!(!is_hex_prefix("0x12"));
    }

    #[test]
    fn test_string_match_regex_slice_unanchored() {
        assert!(string_match_regex_slice("frontend-web", &strings(&["web"])));
        assert!(string_match_regex_slice("frontend-web", &strings(&["^front"])));
        assert!(!string_match_regex_slice("frontend-web", &strings(&["^web"])));
    }

    #[test]
    fn test_string_match_regex_slice_any_pattern() {
        let patterns = strings(&["db", "cache"]);
        assert!(string_match_regex_slice("redis-cache", &patterns));
        assert!(!string_match_regex_slice("web", &patterns));
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let patterns = strings(&["(unclosed", "web"]);
        let list = PatternList::new(&patterns);
        assert_eq!(list.len(), 1);
        assert!(list.matches_any("web-1"));
        assert!(!string_match_regex_slice("(unclosed", &strings(&["(unclosed"])));
    }

    #[test]
    fn test_empty_pattern_list_matches_nothing() {
        let list = PatternList::new(&[]);
        assert!(list.is_empty());
        assert!(!list.matches_any("anything"));
    }
}
