// src/utils/time.rs

use chrono::NaiveDateTime;

/// Storage layout for session start/end times written by the update path.
pub const STORED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Input layouts accepted from the edit form, tried in order.
const ACCEPTED_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %I:%M:%S%p",
    "%Y-%m-%d %I:%M%p",
    "%Y-%m-%d %I:%M %p",
];

/// Parses a free-form datetime string and renders it in [`STORED_FORMAT`].
///
/// Returns `None` when no accepted layout matches. Only the session update
/// path normalizes; creation stores the caller's input verbatim.
pub fn normalize(input: &str) -> Option<String> {
    let input = input.trim();
    ACCEPTED_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(input, fmt)
            .ok()
            .map(|dt| dt.format(STORED_FORMAT).to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_normalized_passes_through() {
        assert_eq!(
            normalize("2024-01-05 09:00:00").as_deref(),
            Some("2024-01-05 09:00:00")
        );
    }

    #[test]
    fn iso_and_twelve_hour_converge() {
        // Both spellings from the edit form must store identically.
        assert_eq!(
            normalize("2024-01-05T09:00:00"),
            normalize("2024-01-05 9:00am")
        );
        assert_eq!(
            normalize("2024-01-05 9:00am").as_deref(),
            Some("2024-01-05 09:00:00")
        );
    }

    #[test]
    fn minute_precision_gets_zero_seconds() {
        assert_eq!(
            normalize("2024-06-30 23:59").as_deref(),
            Some("2024-06-30 23:59:00")
        );
    }

    #[test]
    fn afternoon_twelve_hour() {
        assert_eq!(
            normalize("2024-01-05 1:30 PM").as_deref(),
            Some("2024-01-05 13:30:00")
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(
            normalize("  2024-01-05 09:00:00  ").as_deref(),
            Some("2024-01-05 09:00:00")
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(normalize("next tuesday"), None);
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("2024-13-45 09:00:00"), None);
    }
}
