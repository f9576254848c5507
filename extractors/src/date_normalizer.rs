//! Date normalization and the final free-form-record to machine-readable
//! record step.
//!
//! The reference year for month-name dates is always passed in by the
//! caller; nothing here reads the system clock.

use crate::time_parser::parse_time_range;
use regex::Regex;
use shared_types::{NormalizedJob, ParsedJob};
use std::sync::LazyLock;

static DAY_OF_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{1,2})(?:st|nd|rd|th)?\s+of\s+(\w+)").unwrap());

static MONTH_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\w+)\s+(\d{1,2})(?:st|nd|rd|th)?").unwrap());

static SLASH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{2,4})").unwrap());

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").unwrap());

/// Parses a free-form date expression into `YYYY-MM-DD`.
///
/// Handles "24th of June", "June 24th", `MM/DD/YYYY` (2-digit years become
/// 2000s) and already-normalized ISO dates. Dates without a year use
/// `current_year`. If nothing matches the input is echoed back verbatim;
/// callers must treat an unchanged, non-ISO result as a failure.
pub fn normalize_date(date_str: &str, current_year: i32) -> String {
    if date_str.is_empty() {
        return String::new();
    }

    if let Some(caps) = DAY_OF_MONTH.captures(date_str) {
        if let (Ok(day), Some(month)) = (caps[1].parse::<u32>(), month_number(&caps[2])) {
            return format!("{}-{:02}-{:02}", current_year, month, day);
        }
    }

    if let Some(caps) = MONTH_DAY.captures(date_str) {
        if let (Some(month), Ok(day)) = (month_number(&caps[1]), caps[2].parse::<u32>()) {
            return format!("{}-{:02}-{:02}", current_year, month, day);
        }
    }

    if let Some(caps) = SLASH_DATE.captures(date_str) {
        let month: u32 = caps[1].parse().unwrap_or(0);
        let day: u32 = caps[2].parse().unwrap_or(0);
        let mut year: i32 = caps[3].parse().unwrap_or(0);
        if year < 100 {
            year += 2000;
        }
        return format!("{}-{:02}-{:02}", year, month, day);
    }

    if ISO_DATE.is_match(date_str.trim()) {
        return date_str.to_string();
    }

    date_str.to_string()
}

fn month_number(month_name: &str) -> Option<u32> {
    let month = match month_name.to_lowercase().as_str() {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" | "sept" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Converts a free-form [`ParsedJob`] into a [`NormalizedJob`] with an ISO
/// date and 24-hour times.
///
/// An unparseable date becomes the empty string. Start and end times come
/// from [`parse_time_range`]; when the time expression is invalid both stay
/// empty, so the pair is never half-populated.
pub fn normalize_job(parsed: &ParsedJob, current_year: i32) -> NormalizedJob {
    let raw_date = parsed.date.as_deref().unwrap_or("");
    let date = normalize_date(raw_date, current_year);
    let date = if ISO_DATE.is_match(date.trim()) {
        date
    } else {
        String::new()
    };

    let raw_time = parsed.time.as_deref().unwrap_or("");
    let time = parse_time_range(raw_time);
    let (start_time, end_time) = if time.is_valid {
        (
            time.start_time.unwrap_or_default(),
            time.end_time.unwrap_or_default(),
        )
    } else {
        (String::new(), String::new())
    };

    NormalizedJob {
        date,
        start_time,
        end_time,
        job_name: parsed.job_name.clone().unwrap_or_default(),
        location: parsed.location.clone().unwrap_or_default(),
        details: parsed.details.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_of_month_name() {
        assert_eq!(normalize_date("24th of June", 2025), "2025-06-24");
        assert_eq!(normalize_date("1st of sept", 2025), "2025-09-01");
    }

    #[test]
    fn test_month_name_day() {
        assert_eq!(normalize_date("June 24th", 2025), "2025-06-24");
        assert_eq!(normalize_date("june 24", 2025), "2025-06-24");
        assert_eq!(normalize_date("Dec 3", 2024), "2024-12-03");
    }

    #[test]
    fn test_slash_dates() {
        assert_eq!(normalize_date("06/24/2024", 2025), "2024-06-24");
        assert_eq!(normalize_date("6/24/24", 2025), "2024-06-24");
    }

    #[test]
    fn test_iso_idempotent() {
        assert_eq!(normalize_date("2025-06-24", 2025), "2025-06-24");
    }

    #[test]
    fn test_unparseable_is_echoed() {
        assert_eq!(normalize_date("sometime soon", 2025), "sometime soon");
    }

    #[test]
    fn test_weekday_header_uses_embedded_month_day() {
        // The weekday word is skipped over; the month/day pair inside the
        // header is what gets normalized.
        assert_eq!(
            normalize_date("Wednesday, June 24, 2025", 2025),
            "2025-06-24"
        );
    }

    #[test]
    fn test_normalize_job() {
        let parsed = ParsedJob {
            date: Some("June 24th".to_string()),
            time: Some("10:00 AM to 11:30 AM".to_string()),
            job_name: Some("Acme Corp".to_string()),
            ..Default::default()
        };

        let normalized = normalize_job(&parsed, 2025);
        assert_eq!(normalized.date, "2025-06-24");
        assert_eq!(normalized.start_time, "10:00");
        assert_eq!(normalized.end_time, "11:30");
        assert_eq!(normalized.job_name, "Acme Corp");
        assert_eq!(normalized.location, "");
        assert_eq!(normalized.details, "");
    }

    #[test]
    fn test_normalize_job_times_never_half_populated() {
        let parsed = ParsedJob {
            time: Some("whenever".to_string()),
            ..Default::default()
        };

        let normalized = normalize_job(&parsed, 2025);
        assert_eq!(normalized.start_time, "");
        assert_eq!(normalized.end_time, "");
    }

    #[test]
    fn test_normalize_job_blank_date_on_failure() {
        let parsed = ParsedJob {
            date: Some("sometime soon".to_string()),
            ..Default::default()
        };

        assert_eq!(normalize_job(&parsed, 2025).date, "");
    }
}
