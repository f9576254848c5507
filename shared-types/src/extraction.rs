/// Extraction error types.
///
/// Only input-contract violations (empty header row, spreadsheet with no
/// data rows, unsupported upload format) surface as errors; pattern misses
/// and malformed-but-present values degrade to unset fields instead.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model error: {0}")]
    ModelError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
