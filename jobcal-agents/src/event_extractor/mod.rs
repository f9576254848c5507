//! LLM-backed enrichment of deterministically parsed job records.

mod agent;
mod merge;
mod prompt;

pub use agent::EventExtractorAgent;
pub use merge::merge_with_baseline;
pub use prompt::build_extraction_prompt;
