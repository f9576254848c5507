pub mod event_extractor;
pub mod llm;

pub use event_extractor::{merge_with_baseline, EventExtractorAgent};
pub use llm::{GeminiClient, LlmClient, GEMINI_FLASH_ID};
