//! Display utilities for terminal output.
//!
//! This module provides utility functions for:
//! - Relative time formatting
//! - The compact markers shown in the repository columns

use std::time::{SystemTime, UNIX_EPOCH};

/// Environment variable pinning "now" for reproducible output in tests
pub const TEST_EPOCH_ENV: &str = "LZ_TEST_EPOCH";

/// Current unix time in seconds.
///
/// `LZ_TEST_EPOCH` overrides the clock so snapshot tests see stable ages.
pub fn get_now() -> i64 {
    if let Ok(value) = std::env::var(TEST_EPOCH_ENV)
        && let Ok(epoch) = value.parse::<i64>()
    {
        return epoch;
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Format a commit timestamp as abbreviated relative time (e.g., "2h").
///
/// Unknown timestamps render empty. Timestamps at or after `now` (clock skew)
/// render as "now".
pub fn format_relative_time(timestamp: Option<i64>, now: i64) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = MINUTE * 60;
    const DAY: i64 = HOUR * 24;
    const WEEK: i64 = DAY * 7;
    const MONTH: i64 = DAY * 30;
    const YEAR: i64 = DAY * 365;

    let Some(timestamp) = timestamp else {
        return String::new();
    };
    let seconds_ago = now - timestamp;

    if seconds_ago < MINUTE {
        return "now".to_string();
    }

    const UNITS: &[(i64, &str)] = &[
        (YEAR, "y"),
        (MONTH, "mo"),
        (WEEK, "w"),
        (DAY, "d"),
        (HOUR, "h"),
        (MINUTE, "m"),
    ];

    for &(unit_seconds, abbrev) in UNITS {
        let value = seconds_ago / unit_seconds;
        if value > 0 {
            return format!("{}{}", value, abbrev);
        }
    }

    "now".to_string()
}

/// `↑N` commits ahead of upstream, `∅` without an upstream, empty when level.
pub fn ahead_marker(ahead: usize, has_upstream: bool) -> String {
    if !has_upstream {
        "∅".to_string()
    } else if ahead > 0 {
        format!("↑{ahead}")
    } else {
        String::new()
    }
}

/// `↓N` commits behind upstream, empty when level.
pub fn behind_marker(behind: usize) -> String {
    if behind > 0 {
        format!("↓{behind}")
    } else {
        String::new()
    }
}

/// `≡N` stash entries, empty when none.
pub fn stash_marker(stash_count: usize) -> String {
    if stash_count > 0 {
        format!("≡{stash_count}")
    } else {
        String::new()
    }
}

/// `@tag` for the latest reachable tag, empty when none.
pub fn tag_marker(tag: &str) -> String {
    if tag.is_empty() {
        String::new()
    } else {
        format!("@{tag}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_format_relative_time() {
        let now: i64 = 1700000000; // Fixed timestamp for testing
        let ago = |secs: i64| format_relative_time(Some(now - secs), now);

        // Just now (< 1 minute)
        assert_eq!(ago(30), "now");
        assert_eq!(ago(59), "now");

        // Minutes
        assert_eq!(ago(60), "1m");
        assert_eq!(ago(120), "2m");
        assert_eq!(ago(3599), "59m");

        // Hours
        assert_eq!(ago(3600), "1h");
        assert_eq!(ago(7200), "2h");

        // Days
        assert_eq!(ago(86400), "1d");
        assert_eq!(ago(172800), "2d");

        // Weeks
        assert_eq!(ago(604800), "1w");

        // Months
        assert_eq!(ago(2592000), "1mo");

        // Years
        assert_eq!(ago(31536000), "1y");

        // Clock skew
        assert_eq!(ago(-1000), "now");
    }

    #[test]
    fn test_format_relative_time_unknown() {
        assert_eq!(format_relative_time(None, 1700000000), "");
    }

    #[test]
    fn test_get_now() {
        // Should be after 2020 (1577836800) unless pinned
        if std::env::var(TEST_EPOCH_ENV).is_err() {
            assert!(get_now() > 1577836800, "get_now() should return current time");
        }
    }

    #[rstest]
    #[case(0, true, "")]
    #[case(3, true, "↑3")]
    #[case(0, false, "∅")]
    #[case(5, false, "∅")]
    fn test_ahead_marker(#[case] ahead: usize, #[case] upstream: bool, #[case] expected: &str) {
        assert_eq!(ahead_marker(ahead, upstream), expected);
    }

    #[test]
    fn test_other_markers() {
        assert_eq!(behind_marker(0), "");
        assert_eq!(behind_marker(2), "↓2");
        assert_eq!(stash_marker(0), "");
        assert_eq!(stash_marker(1), "≡1");
        assert_eq!(tag_marker(""), "");
        assert_eq!(tag_marker("v1.2.0"), "@v1.2.0");
    }
}
