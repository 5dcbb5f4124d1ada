//! Common helper functions for output formatting.

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use pod_filter_rs::snapshot::PodStatus;

/// Width of a displayed ID, matching `podman pod ps`.
const ID_WIDTH: usize = 12;

/// Truncates an ID for display.
pub fn truncate_id(id: &str) -> String {
    id.chars().take(ID_WIDTH).collect()
}

/// Truncates a string to a maximum length, counting characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats a creation time for display.
pub fn format_created(created: DateTime<Utc>) -> String {
    created.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Formats a pod status, padded to `width` before coloring.
pub fn format_status(status: PodStatus, width: usize, use_colors: bool) -> String {
    let label = format!("{:<width$}", status.as_str());
    if !use_colors {
        return label;
    }
    match status {
        PodStatus::Running => label.green().to_string(),
        PodStatus::Degraded | PodStatus::Paused => label.yellow().to_string(),
        PodStatus::Error => label.red().to_string(),
        PodStatus::Created | PodStatus::Exited | PodStatus::Stopped => label.dimmed().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_id() {
        assert_eq!(truncate_id("abcdef0123456789"), "abcdef012345");
        assert_eq!(truncate_id("abc"), "abc");
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a-very-long-pod-name", 10), "a-very-...");
        assert_eq!(truncate_str("ünïcödé-name", 8), "ünïcö...");
    }

    #[test]
    fn test_format_created() {
        let created: DateTime<Utc> = "2024-05-01T10:00:00Z".parse().unwrap();
        assert_eq!(format_created(created), "2024-05-01 10:00:00");
    }

    #[test]
    fn test_format_status_plain_is_padded() {
        assert_eq!(format_status(PodStatus::Running, 10, false), "Running   ");
    }

    #[test]
    fn test_format_status_colored_keeps_text() {
        let colored = format_status(PodStatus::Error, 5, true);
        assert!(colored.contains("Error"));
        assert_ne!(colored, "Error");
    }
}
