pub mod extraction;
pub mod job;

pub use extraction::ExtractionError;
pub use job::{ColumnMap, NormalizedJob, ParsedJob};
