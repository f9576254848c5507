use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use shared_types::{ExtractionError, ParsedJob};
use std::path::Path;

use super::parse_sheet;

/// Decodes CSV bytes into records via the column mapper.
pub fn parse_csv_bytes(content: &[u8]) -> Result<Vec<ParsedJob>, ExtractionError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut grid: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => {
                let row: Vec<String> = record.iter().map(|field| field.to_string()).collect();
                // The csv crate already skips fully empty lines; blank rows
                // of delimiters still come through and are handled later.
                grid.push(row);
            }
            Err(e) => {
                tracing::warn!("Failed to parse CSV row: {}", e);
            }
        }
    }

    parse_sheet(&grid)
}

/// Decodes the first worksheet of an Excel workbook into records.
pub fn parse_xlsx_file(path: &Path) -> Result<Vec<ParsedJob>, ExtractionError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ExtractionError::ParseError(format!("Failed to open workbook: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ExtractionError::InvalidInput("Workbook has no worksheets".to_string()))?
        .map_err(|e| ExtractionError::ParseError(format!("Failed to read worksheet: {}", e)))?;

    let grid: Vec<Vec<String>> = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect();

    parse_sheet(&grid)
}

/// Dispatches an uploaded file to the right decoder by extension.
pub fn parse_upload(path: &Path) -> Result<Vec<ParsedJob>, ExtractionError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" | "xls" => parse_xlsx_file(path),
        "csv" => {
            let content = std::fs::read(path).map_err(|e| {
                ExtractionError::ParseError(format!("Failed to read {}: {}", path.display(), e))
            })?;
            parse_csv_bytes(&content)
        }
        _ => Err(ExtractionError::InvalidInput(
            "Unsupported file format. Use .xlsx, .xls, or .csv files.".to_string(),
        )),
    }
}
