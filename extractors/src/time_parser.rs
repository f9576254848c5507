//! Time-range parsing for the messy notations that show up in job emails
//! and spreadsheets: strict ranges ("10:00 AM - 11:30 AM"), compact ones
//! ("2-230pm"), and bare single times ("8am").

use regex::Regex;
use std::sync::LazyLock;

/// Result of parsing a raw time expression into 24-hour values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTime {
    /// `HH:MM` in 24-hour format.
    pub start_time: Option<String>,
    /// `HH:MM` in 24-hour format.
    pub end_time: Option<String>,
    pub is_valid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Period {
    Am,
    Pm,
}

impl Period {
    fn opposite(self) -> Period {
        match self {
            Period::Am => Period::Pm,
            Period::Pm => Period::Am,
        }
    }
}

/// A compact, possibly marker-less time token such as "2", "2:30", "230" or
/// "230pm", with the hour still on the 1-12 scale it was written in.
#[derive(Debug, Clone)]
struct LooseTime {
    hour_as_written: u32,
    period: Option<Period>,
    /// Whether the period came from the token itself rather than being
    /// inherited from the other side of a range.
    explicit_period: bool,
    hhmm24: String,
}

static STRICT_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2}:\d{2})\s*(am|pm)?\s*-\s*(\d{1,2}:\d{2})\s*(am|pm)?").unwrap()
});

static SINGLE_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{1,2}:\d{2})\s*(am|pm)?").unwrap());

static PERIOD_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(a\.?m?\.?|p\.?m?\.?)").unwrap());

static DASH_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{2013}\u{2014}]").unwrap());

static WORD_TO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s+to\s+").unwrap());

static SPACED_DASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*-\s*").unwrap());

/// Parses a raw time expression into a 24-hour start/end pair.
///
/// Tries, in order: a strict `H:MM [AM|PM]? - H:MM [AM|PM]?` range, a
/// flexible range of loose tokens ("2-230pm", "8am to 9am"), a single
/// `H:MM [AM|PM]?` time with an implicit one-hour duration, and finally a
/// single loose token ("230pm"). Anything else is invalid.
pub fn parse_time_range(input: &str) -> ParsedTime {
    let clean = input.trim();
    if clean.is_empty() {
        return ParsedTime::default();
    }

    if let Some(caps) = STRICT_RANGE.captures(clean) {
        let start_marker = caps.get(2).map(|m| m.as_str());
        let end_marker = caps.get(4).map(|m| m.as_str());

        // A side without a marker borrows the other side's.
        let start = convert_to_24_hour(&caps[1], start_marker.or(end_marker));
        let end = convert_to_24_hour(&caps[3], end_marker.or(start_marker));

        if let (Some(start), Some(end)) = (start, end) {
            return ParsedTime {
                start_time: Some(start),
                end_time: Some(end),
                is_valid: true,
            };
        }
    }

    if let Some((start, end)) = parse_flexible_range(clean) {
        return ParsedTime {
            start_time: Some(start),
            end_time: Some(end),
            is_valid: true,
        };
    }

    if let Some(caps) = SINGLE_TIME.captures(clean) {
        let marker = caps.get(2).map(|m| m.as_str());
        if let Some(start) = convert_to_24_hour(&caps[1], marker) {
            let end = add_hours(&start, 1);
            return ParsedTime {
                start_time: Some(start),
                end_time: Some(end),
                is_valid: true,
            };
        }
    }

    if let Some(token) = parse_loose_token(clean, None) {
        let end = add_hours(&token.hhmm24, 1);
        return ParsedTime {
            start_time: Some(token.hhmm24),
            end_time: Some(end),
            is_valid: true,
        };
    }

    ParsedTime::default()
}

/// Converts `H:MM` plus an optional AM/PM marker to zero-padded 24-hour
/// `HH:MM`. Without a marker the input is assumed to already be 24-hour.
fn convert_to_24_hour(time_str: &str, am_pm: Option<&str>) -> Option<String> {
    let (hours_str, minutes_str) = time_str.split_once(':')?;
    let mut hours: i32 = hours_str.trim().parse().ok()?;
    let minutes: i32 = minutes_str.trim().parse().ok()?;

    if let Some(marker) = am_pm {
        let marker = marker.to_lowercase();
        if marker == "pm" && hours != 12 {
            hours += 12;
        } else if marker == "am" && hours == 12 {
            hours = 0;
        }
    }

    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return None;
    }

    Some(format!("{:02}:{:02}", hours, minutes))
}

/// Adds whole hours to an `HH:MM` string, wrapping past midnight.
fn add_hours(time_str: &str, hours_to_add: u32) -> String {
    let (hours_str, minutes_str) = time_str.split_once(':').unwrap_or((time_str, "0"));
    let hours: u32 = hours_str.parse().unwrap_or(0);
    let minutes: u32 = minutes_str.parse().unwrap_or(0);

    format!("{:02}:{:02}", (hours + hours_to_add) % 24, minutes)
}

fn normalize_period(marker: &str) -> Option<Period> {
    let s = marker.to_lowercase().replace('.', "");
    if s.starts_with('a') {
        Some(Period::Am)
    } else if s.starts_with('p') {
        Some(Period::Pm)
    } else {
        None
    }
}

/// Parses a loose token like "2", "2:30", "230" or "230pm".
///
/// Digit-count disambiguation: 1-2 digits are an hour, exactly 3 digits are
/// one hour digit plus two minute digits, 4 or more put everything except the
/// last two digits into the hour.
fn parse_loose_token(raw: &str, inferred: Option<Period>) -> Option<LooseTime> {
    let mut token = raw.trim().to_lowercase();
    if token.is_empty() {
        return None;
    }

    let mut period = None;
    let mut explicit_period = false;
    if let Some(m) = PERIOD_MARKER.find(&token) {
        period = normalize_period(m.as_str());
        explicit_period = period.is_some();
        token.replace_range(m.range(), "");
    }
    if period.is_none() {
        period = inferred;
    }

    let digits: String = token.chars().filter(|c| c.is_ascii_digit() || *c == ':').collect();
    if digits.is_empty() {
        return None;
    }

    let (hour, minutes): (u32, u32) = if let Some((h, m)) = digits.split_once(':') {
        let h = h.parse().ok()?;
        let m = if m.is_empty() { 0 } else { m.parse().ok()? };
        (h, m)
    } else if digits.len() <= 2 {
        (digits.parse().ok()?, 0)
    } else if digits.len() == 3 {
        (digits[..1].parse().ok()?, digits[1..].parse().ok()?)
    } else {
        let split = digits.len() - 2;
        (digits[..split].parse().ok()?, digits[split..].parse().ok()?)
    };

    if minutes > 59 || hour > 23 {
        return None;
    }

    let mut hour24 = hour;
    match period {
        Some(Period::Pm) if hour24 != 12 => hour24 += 12,
        Some(Period::Am) if hour24 == 12 => hour24 = 0,
        _ => {}
    }
    if hour24 > 23 {
        return None;
    }

    Some(LooseTime {
        hour_as_written: hour,
        period,
        explicit_period,
        hhmm24: format!("{:02}:{:02}", hour24, minutes),
    })
}

/// Parses flexible ranges like "2-230pm", "8am-9am", "2 PM - 3" or
/// "2 to 3:30 pm".
///
/// The right token is parsed first; the left inherits its period when it has
/// none of its own. If the left still has no explicit marker and its written
/// hour is greater than the right's, the inherited period is flipped so that
/// "10-3pm" reads as 10:00-15:00 rather than 22:00-15:00.
fn parse_flexible_range(input: &str) -> Option<(String, String)> {
    let s = DASH_SEPARATORS.replace_all(input, "-");
    let s = WORD_TO.replace_all(&s, "-");
    let s = SPACED_DASH.replace_all(&s, "-");
    let s = s.trim();

    let (left_raw, right_raw) = s.split_once('-')?;
    if right_raw.contains('-') {
        return None;
    }

    let right = parse_loose_token(right_raw, None)?;
    let mut left = parse_loose_token(left_raw, right.period)?;

    if !left.explicit_period && right.period.is_some() && left.hour_as_written > right.hour_as_written
    {
        let flipped = right.period.map(Period::opposite);
        left = parse_loose_token(left_raw, flipped)?;
    }

    Some((left.hhmm24, right.hhmm24))
}

/// Normalizes an already-delimited numeric date to `YYYY-MM-DD`.
///
/// Accepts `MM-DD-YY`, `MM/DD/YY`, `YYYY-MM-DD` and `DD-MM-YYYY` (the last
/// as a fallback when the month-first reading is out of range). Returns
/// `None` on failure instead of echoing the input; some call sites rely on
/// that, others on the echo convention of [`crate::date_normalizer`].
pub fn normalize_date_format(date_str: &str) -> Option<String> {
    static FORMATS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
        [
            Regex::new(r"^(\d{1,2})-(\d{1,2})-(\d{2,4})$").unwrap(),
            Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2,4})$").unwrap(),
            Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").unwrap(),
            Regex::new(r"^(\d{1,2})-(\d{1,2})-(\d{4})$").unwrap(),
        ]
    });

    let clean = date_str.trim();
    if clean.is_empty() {
        return None;
    }

    for (index, format) in FORMATS.iter().enumerate() {
        let Some(caps) = format.captures(clean) else {
            continue;
        };

        let first: i32 = caps[1].parse().ok()?;
        let second: i32 = caps[2].parse().ok()?;
        let third: i32 = caps[3].parse().ok()?;

        let (year, month, day) = match index {
            2 => (first, second, third),
            3 => (third, second, first),
            _ => {
                let mut year = third;
                if year < 100 {
                    year += if year < 50 { 2000 } else { 1900 };
                }
                (year, first, second)
            }
        };

        if (1..=12).contains(&month) && (1..=31).contains(&day) && year >= 1900 {
            return Some(format!("{}-{:02}-{:02}", year, month, day));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(input: &str) -> (String, String) {
        let parsed = parse_time_range(input);
        assert!(parsed.is_valid, "expected valid parse for {:?}", input);
        (parsed.start_time.unwrap(), parsed.end_time.unwrap())
    }

    #[test]
    fn test_strict_range() {
        assert_eq!(
            range("10:00 AM - 11:30 AM"),
            ("10:00".to_string(), "11:30".to_string())
        );
        assert_eq!(
            range("19:00 - 22:30"),
            ("19:00".to_string(), "22:30".to_string())
        );
    }

    #[test]
    fn test_strict_range_marker_inheritance() {
        // Start side missing its marker borrows the end's.
        assert_eq!(
            range("10:00 - 11:30 AM"),
            ("10:00".to_string(), "11:30".to_string())
        );
        assert_eq!(
            range("2:00 PM - 3:30"),
            ("14:00".to_string(), "15:30".to_string())
        );
    }

    #[test]
    fn test_separator_variants_round_trip() {
        let expected = ("10:00".to_string(), "11:30".to_string());
        assert_eq!(range("10:00 AM - 11:30 AM"), expected);
        assert_eq!(range("10:00 AM to 11:30 AM"), expected);
        assert_eq!(range("10:00 AM \u{2013} 11:30 AM"), expected);
        assert_eq!(range("10:00 AM \u{2014} 11:30 AM"), expected);
    }

    #[test]
    fn test_flexible_range_period_flip() {
        // Left hour greater than right hour: left flips to the morning.
        assert_eq!(range("10-3pm"), ("10:00".to_string(), "15:00".to_string()));
    }

    #[test]
    fn test_flexible_range_inherited_period() {
        // Left hour not greater: inherited period stands.
        assert_eq!(range("2-230pm"), ("14:00".to_string(), "14:30".to_string()));
    }

    #[test]
    fn test_flexible_range_explicit_markers() {
        assert_eq!(range("8am-9am"), ("08:00".to_string(), "09:00".to_string()));
        assert_eq!(range("8am to 9am"), ("08:00".to_string(), "09:00".to_string()));
    }

    #[test]
    fn test_single_time_implicit_duration() {
        assert_eq!(range("2:30 PM"), ("14:30".to_string(), "15:30".to_string()));
    }

    #[test]
    fn test_single_time_wraps_past_midnight() {
        assert_eq!(range("11:30 PM"), ("23:30".to_string(), "00:30".to_string()));
    }

    #[test]
    fn test_single_loose_token() {
        assert_eq!(range("230pm"), ("14:30".to_string(), "15:30".to_string()));
        assert_eq!(range("8am"), ("08:00".to_string(), "09:00".to_string()));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(!parse_time_range("").is_valid);
        assert!(!parse_time_range("no time here").is_valid);
        assert!(!parse_time_range("25:99").is_valid);
    }

    #[test]
    fn test_out_of_range_minutes_rejected() {
        assert!(!parse_time_range("10:75 AM - 11:30 AM").is_valid);
        assert!(!parse_time_range("10:75 AM").is_valid);
    }

    #[test]
    fn test_normalize_date_format() {
        assert_eq!(
            normalize_date_format("06/24/2025").as_deref(),
            Some("2025-06-24")
        );
        assert_eq!(
            normalize_date_format("6/24/25").as_deref(),
            Some("2025-06-24")
        );
        assert_eq!(
            normalize_date_format("2025-06-24").as_deref(),
            Some("2025-06-24")
        );
        // Month-first reading is out of range, so the European order wins.
        assert_eq!(
            normalize_date_format("24-06-2025").as_deref(),
            Some("2025-06-24")
        );
    }

    #[test]
    fn test_normalize_date_format_rejects_garbage() {
        assert_eq!(normalize_date_format(""), None);
        assert_eq!(normalize_date_format("June 24th"), None);
        assert_eq!(normalize_date_format("13-32-2025"), None);
        assert_eq!(normalize_date_format("06/24/1800"), None);
    }
}
