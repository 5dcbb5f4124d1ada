//! Label filter expressions.
//!
//! A label filter is either `key` (the label must exist) or `key=value` (the
//! label must exist with that value). The key may be a glob pattern using
//! `*`, `?` and `[...]`, where `*` and `?` never match `/`. A list of label
//! filters matches only if every filter matches.

use std::collections::BTreeMap;

use regex::Regex;

/// A single parsed `key[=value]` filter.
#[derive(Debug, Clone)]
struct LabelFilter {
    key: String,
    key_pattern: Option<Regex>,
    value: Option<String>,
}

impl LabelFilter {
    fn parse(raw: &str) -> Self {
        let (key, value) = match raw.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (raw, None),
        };
        Self {
            key: key.to_string(),
            key_pattern: glob_to_regex(key),
            // `key=` behaves like a bare `key`
            value: value.filter(|v| !v.is_empty()).map(str::to_string),
        }
    }

    fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        labels.iter().any(|(key, value)| {
            let value_ok = self.value.as_deref().is_none_or(|want| want == value);
            value_ok && self.matches_key(key)
        })
    }

    fn matches_key(&self, key: &str) -> bool {
        key == self.key
            || self
                .key_pattern
                .as_ref()
                .is_some_and(|pattern| pattern.is_match(key))
    }
}

/// A set of label filters that must all match.
#[derive(Debug, Clone, Default)]
pub struct LabelFilters {
    filters: Vec<LabelFilter>,
}

impl LabelFilters {
    /// Parses each raw `key[=value]` expression.
    pub fn parse(values: &[String]) -> Self {
        Self {
            filters: values.iter().map(|raw| LabelFilter::parse(raw)).collect(),
        }
    }

    /// Returns true if every filter matches some label.
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.filters.iter().all(|filter| filter.matches(labels))
    }
}

/// Returns true if `labels` satisfies every filter in `values`.
pub fn match_label_filters(values: &[String], labels: &BTreeMap<String, String>) -> bool {
    LabelFilters::parse(values).matches(labels)
}

/// Translates a glob into an anchored regex. Returns `None` for keys without
/// glob syntax and for malformed globs, which then only match literally.
fn glob_to_regex(glob: &str) -> Option<Regex> {
    if !glob.contains(['*', '?', '[']) {
        return None;
    }

    let mut pattern = String::from("^");
    let mut chars = glob.chars();
    while let Some(c) = chars.next() {
        match c {
            '*' => pattern.push_str("[^/]*"),
            '?' => pattern.push_str("[^/]"),
            '[' => {
                let mut class = String::from("[");
                let mut closed = false;
                for (i, c) in chars.by_ref().enumerate() {
                    match c {
                        ']' if i > 0 => {
                            closed = true;
                            break;
                        }
                        '^' if i == 0 => class.push('^'),
                        '\\' | '[' | '&' | '~' => {
                            class.push('\\');
                            class.push(c);
                        }
                        _ => class.push(c),
                    }
                }
                if !closed {
                    return None;
                }
                class.push(']');
                pattern.push_str(&class);
            }
            _ => pattern.push_str(&regex::escape(&c.to_string())),
        }
    }
    pattern.push('$');

    Regex::new(&pattern).ok()
}
