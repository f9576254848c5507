//! Extractors Crate
//!
//! Turns unstructured job emails and loosely-structured spreadsheet rows
//! into calendar-event records. Extraction is best-effort throughout: a
//! partial record is always preferable to an error.
//!
//! # Components
//!
//! - `email_parser`: priority-ordered dialect patterns over an email body
//! - `time_parser`: ambiguous time-range parsing ("2-230pm", "10-3pm")
//! - `date_normalizer`: free-form dates to ISO, records to normalized form
//! - `spreadsheet`: header mapping and row extraction for uploads
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::{normalize_job, EmailParser};
//!
//! let parsed = EmailParser::new().parse(&email_body);
//! let normalized = normalize_job(&parsed, 2025);
//! ```

pub mod date_normalizer;
pub mod email_parser;
pub mod spreadsheet;
pub mod time_parser;

// Re-export commonly used items
pub use date_normalizer::{normalize_date, normalize_job};
pub use email_parser::EmailParser;
pub use spreadsheet::{build_column_map, extract_row, parse_sheet, parse_upload};
pub use time_parser::{normalize_date_format, parse_time_range, ParsedTime};
