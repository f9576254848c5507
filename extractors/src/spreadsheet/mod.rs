//! Spreadsheet upload handling: header-row column mapping and best-effort
//! row-to-record extraction.
//!
//! The first row is always treated as headers. Column headers in the wild
//! are inconsistent enough that mapped columns are still distrusted: a
//! "start time" cell holding a date is rejected, and unmapped columns are
//! scanned for stray time values and useful free text.

mod column_map;
mod reader;

pub use column_map::build_column_map;
pub use reader::{parse_csv_bytes, parse_upload, parse_xlsx_file};

use regex::Regex;
use shared_types::{ColumnMap, ExtractionError, ParsedJob};
use std::sync::LazyLock;

static CLOCK_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}").unwrap());

static DATE_SHAPES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\d{1,2}/\d{1,2}/\d{2,4}").unwrap(),
        Regex::new(r"\d{1,2}-\d{1,2}-\d{2,4}").unwrap(),
        Regex::new(r"\d{4}-\d{1,2}-\d{1,2}").unwrap(),
        Regex::new(
            r"\b(january|february|march|april|may|june|july|august|september|october|november|december)\b",
        )
        .unwrap(),
        Regex::new(r"\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\b").unwrap(),
        Regex::new(r"\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b").unwrap(),
        Regex::new(r"\b(mon|tue|wed|thu|fri|sat|sun)\b").unwrap(),
    ]
});

static USEFUL_INFO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)meeting|zoom|teams|rate|contact|phone|email|\$\d+").unwrap());

/// Converts a whole 2-D cell grid into records. The first row is the
/// header row.
///
/// Fewer than two rows, or a header row with nothing in it, is an input
/// contract violation; there is no sensible empty-document fallback.
pub fn parse_sheet(data: &[Vec<String>]) -> Result<Vec<ParsedJob>, ExtractionError> {
    if data.len() < 2 {
        return Err(ExtractionError::InvalidInput(
            "File appears to be empty or has no data rows".to_string(),
        ));
    }

    let headers = &data[0];
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ExtractionError::InvalidInput(
            "Header row is empty".to_string(),
        ));
    }

    let map = build_column_map(headers);
    tracing::debug!(?map, "column map built");

    let mut events = Vec::new();
    for row in &data[1..] {
        if let Some(event) = extract_row(row, &map) {
            // A record with none of name, date or time is useless.
            if event.job_name.is_some() || event.date.is_some() || event.time.is_some() {
                events.push(event);
            }
        }
    }

    Ok(events)
}

/// Converts one data row into a record. Returns `None` for rows that are
/// entirely empty or whitespace.
pub fn extract_row(row: &[String], map: &ColumnMap) -> Option<ParsedJob> {
    if row.iter().all(|cell| cell.trim().is_empty()) {
        return None;
    }

    let cell = |slot: Option<usize>| -> Option<String> {
        slot.and_then(|i| row.get(i))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let mut event = ParsedJob {
        job_name: cell(map.job_name),
        date: cell(map.date),
        location: cell(map.location),
        ..Default::default()
    };

    // Mapped time cells are rejected when they independently look like
    // dates; that defends against mis-mapped columns.
    let time_range = cell(map.time_range);
    let start_time = cell(map.start_time).filter(|v| !is_date_value(v));
    let end_time = cell(map.end_time).filter(|v| !is_date_value(v));
    let generic_time = cell(map.time).filter(|v| !is_date_value(v));

    let mut additional_times = scavenge_times(
        row,
        map,
        &[&time_range, &start_time, &end_time, &generic_time],
    );

    let mut final_time = if let Some(range) = time_range {
        Some(range)
    } else if let (Some(start), Some(end)) = (start_time.as_deref(), end_time.as_deref()) {
        Some(format!("{} - {}", start, end))
    } else if let Some(start) = start_time {
        // A stray time value elsewhere in the row is the best guess for the
        // missing end time.
        if additional_times.is_empty() {
            Some(start)
        } else {
            Some(format!("{} - {}", start, additional_times.remove(0)))
        }
    } else if let Some(end) = end_time {
        Some(format!("End: {}", end))
    } else {
        generic_time
    };

    if !additional_times.is_empty() {
        final_time = Some(match final_time {
            Some(time) => format!("{} ({})", time, additional_times.join(", ")),
            None => additional_times.join(" - "),
        });
    }
    event.time = final_time;

    let mut details: Vec<String> = Vec::new();
    if let Some(value) = cell(map.details) {
        details.push(value);
    }
    for (index, raw) in row.iter().enumerate() {
        let value = raw.trim();
        if value.len() > 5 && !map.is_mapped(index) && USEFUL_INFO.is_match(value) {
            details.push(value.to_string());
        }
    }
    if !details.is_empty() {
        event.details = Some(details.join("\n\n"));
    }

    Some(event)
}

/// Collects time-shaped values from unmapped columns, skipping anything
/// already captured through the map.
fn scavenge_times(
    row: &[String],
    map: &ColumnMap,
    already_captured: &[&Option<String>],
) -> Vec<String> {
    let mut found = Vec::new();

    for (index, raw) in row.iter().enumerate() {
        if map.is_mapped(index) {
            continue;
        }
        let value = raw.trim();
        if value.is_empty() || !is_time_shaped(value) || is_date_value(value) {
            continue;
        }
        if already_captured
            .iter()
            .any(|captured| captured.as_deref() == Some(value))
        {
            continue;
        }
        found.push(value.to_string());
    }

    found
}

fn is_time_shaped(value: &str) -> bool {
    let lower = value.to_lowercase();
    lower.contains("am") || lower.contains("pm") || CLOCK_SHAPE.is_match(&lower)
}

/// True when a cell reads like a date rather than a time.
fn is_date_value(value: &str) -> bool {
    let lower = value.to_lowercase();
    let lower = lower.trim();
    if lower.is_empty() {
        return false;
    }

    if lower.contains("date")
        || lower.contains("day")
        || lower.contains("today")
        || lower.contains("tomorrow")
        || lower.contains("yesterday")
    {
        return true;
    }

    DATE_SHAPES.iter().any(|rx| rx.is_match(lower))
}
