//! Heuristic email extractor.
//!
//! Job emails arrive in two recognizable dialects plus everything else:
//! "Organization:"-labeled notices (connection time supersedes the scheduled
//! start), "Customer"-labeled job sheets (header carries the date and time),
//! and free text that only a generic scan can deal with. Matchers for each
//! field run in priority order; the first hit wins and later dialects only
//! fill gaps. Nothing here ever fails; a field without a match is simply
//! left unset.

mod details;
mod patterns;

use details::assemble_details;
use patterns::EmailPatterns;
use shared_types::ParsedJob;

use crate::time_parser::parse_time_range;

pub struct EmailParser {
    patterns: EmailPatterns,
}

struct TimeResolution {
    time: Option<String>,
    /// Raw start-time line, kept around because Organization-style notices
    /// sometimes embed the date in it.
    raw_start: Option<String>,
    /// Scheduled start preserved when the connection time superseded it.
    original_schedule: Option<String>,
}

impl EmailParser {
    pub fn new() -> Self {
        Self {
            patterns: EmailPatterns::compile(),
        }
    }

    /// Extracts a best-effort record from an email body. Pure; never fails.
    pub fn parse(&self, text: &str) -> ParsedJob {
        let mut job = ParsedJob::default();

        job.job_name = self.match_job_name(text);

        let time = self.resolve_time(text);
        job.date = self.resolve_date(text, time.raw_start.as_deref());
        job.time = time.time;

        job.location = self.resolve_location(text);
        job.details = assemble_details(&self.patterns, text, time.original_schedule.as_deref());

        if job.job_name.is_none() {
            job.job_name = self.fallback_job_name(text);
        }

        job
    }

    /// Priority-ordered name matchers; the first dialect that produces a
    /// value wins.
    fn match_job_name(&self, text: &str) -> Option<String> {
        let matchers: [(&str, &regex::Regex); 3] = [
            ("organization", &self.patterns.organization),
            ("event_line", &self.patterns.event_line),
            ("customer", &self.patterns.customer),
        ];

        for (name, rx) in matchers {
            if let Some(caps) = rx.captures(text) {
                let value = caps[1].trim().to_string();
                if !value.is_empty() {
                    tracing::debug!(matcher = name, "job name matched");
                    return Some(value);
                }
            }
        }
        None
    }

    fn resolve_time(&self, text: &str) -> TimeResolution {
        let connection = self.capture_line(&self.patterns.connection_time, text);
        let sched_start = self.capture_line(&self.patterns.scheduled_start, text);
        let sched_end = self.capture_line(&self.patterns.scheduled_end, text);

        // Organization-style: the captioner connection time supersedes the scheduled
        // start, but the superseded value is kept as a detail line instead
        // of being thrown away.
        if let (Some(start), Some(end)) = (connection.as_deref(), sched_end.as_deref()) {
            let original_schedule = sched_start
                .as_deref()
                .filter(|s| *s != start)
                .map(str::to_string);
            return TimeResolution {
                time: Some(self.render_range(start, end)),
                raw_start: Some(start.to_string()),
                original_schedule,
            };
        }

        // Customer-style: header line like "2:00 PM to 3:30 PM".
        if let Some(caps) = self.patterns.header_time.captures(text) {
            return TimeResolution {
                time: Some(format!("{} to {}", caps[1].trim(), caps[2].trim())),
                raw_start: Some(caps[1].trim().to_string()),
                original_schedule: None,
            };
        }

        if let (Some(start), Some(end)) = (sched_start.as_deref(), sched_end.as_deref()) {
            return TimeResolution {
                time: Some(self.render_range(start, end)),
                raw_start: Some(start.to_string()),
                original_schedule: None,
            };
        }

        // Generic fallback: any range-shaped substring, resolved through the
        // time parser and rendered back in human-readable form.
        if let Some(m) = self.patterns.range_candidate.find(text) {
            let parsed = parse_time_range(m.as_str());
            if parsed.is_valid {
                let start = parsed.start_time.unwrap_or_default();
                let end = parsed.end_time.unwrap_or_default();
                return TimeResolution {
                    time: Some(format!("{} to {}", to_12_hour(&start), to_12_hour(&end))),
                    raw_start: None,
                    original_schedule: None,
                };
            }
        }

        // Last resort: a lone clock time anywhere in the body.
        let single = self
            .patterns
            .hhmm_ampm
            .find(text)
            .map(|m| m.as_str().to_string());
        TimeResolution {
            time: single,
            raw_start: None,
            original_schedule: None,
        }
    }

    /// Renders a raw start/end pair as "H:MM AM/PM to H:MM AM/PM" when both
    /// sides carry a clock time, falling back to a plain hyphen join.
    fn render_range(&self, start: &str, end: &str) -> String {
        let start_clock = self.patterns.hhmm_ampm.captures(start);
        let end_clock = self.patterns.hhmm_ampm.captures(end);
        match (start_clock, end_clock) {
            (Some(s), Some(e)) => format!("{} to {}", &s[1], &e[1]),
            _ => format!("{} - {}", start, end),
        }
    }

    fn resolve_date(&self, text: &str, raw_start: Option<&str>) -> Option<String> {
        // A Customer-style header date wins over a date embedded in the
        // start time line.
        if let Some(caps) = self.patterns.header_date.captures(text) {
            return Some(caps[1].trim().to_string());
        }

        if let Some(start) = raw_start {
            if let Some(caps) = self.patterns.date_in_time.captures(start) {
                return Some(caps[1].to_string());
            }
        }

        self.patterns
            .fallback_date
            .find(text)
            .map(|m| m.as_str().to_string())
    }

    fn resolve_location(&self, text: &str) -> Option<String> {
        let mut location = if let Some(caps) = self.patterns.meeting_number.captures(text) {
            Some(format!("Virtual Meeting - ID: {}", caps[1].trim()))
        } else if text.to_lowercase().contains("remote") {
            Some("Remote/Virtual".to_string())
        } else {
            None
        };

        // An explicit Location line overrides, unless it just says "remote"
        // which the rule above already covers.
        if let Some(caps) = self.patterns.location_line.captures(text) {
            let value = caps[1].trim();
            if !value.is_empty() && value.to_lowercase() != "remote" {
                location = Some(value.to_string());
            }
        }

        location
    }

    fn fallback_job_name(&self, text: &str) -> Option<String> {
        for rx in [&self.patterns.subject_line, &self.patterns.meeting_line] {
            if let Some(caps) = rx.captures(text) {
                let name = caps[1]
                    .trim()
                    .trim_matches(|c: char| c == ':' || c == '-' || c.is_whitespace())
                    .to_string();
                if !name.is_empty() {
                    return Some(name);
                }
            }
        }

        self.longest_phrase(text)
    }

    /// Last-resort name: strip everything that looks like a date or time,
    /// then take the longest remaining 2-5-word phrase. Best-effort only.
    fn longest_phrase(&self, text: &str) -> Option<String> {
        let mut stripped = text.to_string();
        for rx in [
            &self.patterns.range_candidate,
            &self.patterns.hhmm_ampm,
            &self.patterns.fallback_date,
            &self.patterns.slash_date,
        ] {
            stripped = rx.replace_all(&stripped, " ").into_owned();
        }

        stripped
            .split(['\n', '.', '!', '?', ':', ';', ','])
            .map(str::trim)
            .filter(|chunk| {
                let words = chunk.split_whitespace().count();
                (2..=5).contains(&words)
            })
            .max_by_key(|chunk| chunk.len())
            .map(str::to_string)
    }

    fn capture_line(&self, rx: &regex::Regex, text: &str) -> Option<String> {
        rx.captures(text).map(|caps| caps[1].trim().to_string())
    }
}

impl Default for EmailParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders `HH:MM` 24-hour back to "H:MM AM/PM".
fn to_12_hour(hhmm: &str) -> String {
    let Some((h, m)) = hhmm.split_once(':') else {
        return hhmm.to_string();
    };
    let hour: u32 = h.parse().unwrap_or(0);
    let (hour12, marker) = match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        _ => (hour - 12, "PM"),
    };
    format!("{}:{} {}", hour12, m, marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ParsedJob {
        EmailParser::new().parse(text)
    }

    #[test]
    fn test_organization_dialect_end_to_end() {
        let job = parse(
            "Organization: Acme Corp\n\
             Captioner Connection Time: 10:00 AM\n\
             Scheduled Start: 9:45 AM\n\
             Scheduled End: 11:30 AM",
        );

        assert_eq!(job.job_name.as_deref(), Some("Acme Corp"));
        assert_eq!(job.time.as_deref(), Some("10:00 AM to 11:30 AM"));
        let details = job.details.expect("details should be assembled");
        assert!(details.contains("Original Schedule: 9:45 AM"));
    }

    #[test]
    fn test_connection_time_matching_start_leaves_no_original_schedule() {
        let job = parse(
            "Organization: Acme Corp\n\
             Captioner Connection Time: 10:00 AM\n\
             Scheduled Start: 10:00 AM\n\
             Scheduled End: 11:30 AM",
        );

        assert_eq!(job.time.as_deref(), Some("10:00 AM to 11:30 AM"));
        assert!(job
            .details
            .as_deref()
            .unwrap_or("")
            .find("Original Schedule")
            .is_none());
    }

    #[test]
    fn test_customer_dialect_header_time_and_date() {
        let job = parse(
            "Customer US Patent and Trademark Office\n\
             Job Title Examiner interview practice session\n\
             Wednesday, June 24, 2025\n\
             2:00 PM to 3:30 PM\n\
             Location Remote",
        );

        assert_eq!(
            job.job_name.as_deref(),
            Some("US Patent and Trademark Office")
        );
        assert_eq!(job.date.as_deref(), Some("Wednesday, June 24, 2025"));
        assert_eq!(job.time.as_deref(), Some("2:00 PM to 3:30 PM"));
        // "Location Remote" is already covered by the remote rule.
        assert_eq!(job.location.as_deref(), Some("Remote/Virtual"));
        // Job Title lands in details, not in the name.
        assert!(job.details.unwrap().contains("Event: Examiner interview"));
    }

    #[test]
    fn test_meeting_number_location() {
        let job = parse("Organization: inABLE\nMeeting Number: 2764 117 0677\nScheduled End: 3:00 PM");
        assert_eq!(
            job.location.as_deref(),
            Some("Virtual Meeting - ID: 2764 117 0677")
        );
    }

    #[test]
    fn test_explicit_location_overrides_remote() {
        let job = parse("Customer Acme\nThis is a remote job\nLocation Building 4, Room 210");
        assert_eq!(job.location.as_deref(), Some("Building 4, Room 210"));
    }

    #[test]
    fn test_url_beats_meeting_link_label() {
        let job = parse(
            "Organization: Acme\n\
             Meeting Link N/A\n\
             Join at https://acme.zoom.us/j/123456789",
        );
        let details = job.details.unwrap();
        assert!(details.contains("Meeting Link: https://acme.zoom.us/j/123456789"));
    }

    #[test]
    fn test_na_values_suppressed_in_details() {
        let job = parse(
            "Organization: Acme\n\
             Meeting Number: N/A\n\
             Password: hunter2\n\
             Dial-In Info: n/a",
        );
        let details = job.details.unwrap();
        assert!(details.contains("Password: hunter2"));
        assert!(!details.contains("Meeting Number"));
        assert!(!details.contains("Dial-in"));
    }

    #[test]
    fn test_generic_range_fallback_renders_human_readable() {
        let job = parse("Quarterly planning sync\nRuns 10-3pm in the main channel");
        assert_eq!(job.time.as_deref(), Some("10:00 AM to 3:00 PM"));
    }

    #[test]
    fn test_subject_line_name_fallback() {
        let job = parse("Subject: Board prep walkthrough\nStarts at 9:00 AM");
        assert_eq!(job.job_name.as_deref(), Some("Board prep walkthrough"));
    }

    #[test]
    fn test_longest_phrase_name_fallback() {
        let job = parse("Annual shareholder town hall\n10:00 AM - 11:30 AM\n06/24/2025");
        assert_eq!(job.job_name.as_deref(), Some("Annual shareholder town hall"));
    }

    #[test]
    fn test_no_match_leaves_fields_unset() {
        let job = parse("hi");
        assert!(job.time.is_none());
        assert!(job.date.is_none());
        assert!(job.location.is_none());
    }
}
