use serde::{Deserialize, Serialize};

/// Best-effort extraction result before any normalization.
///
/// Every field is optional: `None` means the extractor found nothing, while
/// `Some("")` means a field was present in the source but blank. The two are
/// deliberately distinct so that merge logic can tell "not found" apart from
/// "found but empty".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedJob {
    /// Free-form date expression, e.g. "June 24th" or "06/24/2025".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Free-form time expression, e.g. "10am-3pm" or "10:00 AM to 11:30 AM".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Free-text details, sections joined by blank lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Opaque calendar color tag, passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_id: Option<String>,
}

impl ParsedJob {
    /// True when no field carries a non-blank value.
    pub fn is_blank(&self) -> bool {
        !self.has_any_field()
    }

    /// True when at least one field carries a non-blank value.
    pub fn has_any_field(&self) -> bool {
        [
            &self.date,
            &self.time,
            &self.job_name,
            &self.location,
            &self.details,
        ]
        .iter()
        .any(|f| f.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }
}

/// Fully machine-readable record: ISO date and 24-hour times.
///
/// `start_time` and `end_time` are either both well-formed `HH:MM` or both
/// empty, never partially populated. An unparseable date becomes the empty
/// string rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedJob {
    /// `YYYY-MM-DD`, or empty if the source date could not be parsed.
    pub date: String,
    /// `HH:MM` 24-hour, zero-padded, or empty.
    pub start_time: String,
    /// `HH:MM` 24-hour; defaults to start + 1 hour (mod 24) when the source
    /// gave no end time.
    pub end_time: String,
    pub job_name: String,
    pub location: String,
    pub details: String,
}

/// Mapping from canonical event fields to zero-based column indices within
/// one spreadsheet header row. Built once per file and discarded afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub job_name: Option<usize>,
    pub date: Option<usize>,
    pub start_time: Option<usize>,
    pub end_time: Option<usize>,
    pub time_range: Option<usize>,
    pub time: Option<usize>,
    pub location: Option<usize>,
    pub details: Option<usize>,
}

impl ColumnMap {
    /// True when the given column index is claimed by any canonical field.
    pub fn is_mapped(&self, index: usize) -> bool {
        [
            self.job_name,
            self.date,
            self.start_time,
            self.end_time,
            self.time_range,
            self.time,
            self.location,
            self.details,
        ]
        .iter()
        .any(|slot| *slot == Some(index))
    }
}
