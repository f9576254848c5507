use crate::event_extractor::merge::merge_with_baseline;
use crate::event_extractor::prompt::build_extraction_prompt;
use crate::llm::LlmClient;
use serde_json::Value;
use shared_types::{ExtractionError, ParsedJob};
use std::sync::Arc;

/// Runs the enrichment oracle over raw email text and overlays the result
/// on the deterministic baseline.
pub struct EventExtractorAgent {
    llm_client: Arc<dyn LlmClient>,
}

impl EventExtractorAgent {
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }

    /// Asks the oracle for a structured record. Errors here cover the whole
    /// failure taxonomy of the oracle boundary: transport failures,
    /// non-JSON output, and JSON of the wrong shape.
    pub async fn extract(&self, text: &str) -> Result<ParsedJob, ExtractionError> {
        let prompt = build_extraction_prompt(text);
        let response = self.llm_client.complete(&prompt).await?;

        let json_text = strip_code_fences(&response);
        let value: Value = serde_json::from_str(json_text).map_err(|e| {
            ExtractionError::ModelError(format!("Oracle returned non-JSON output: {}", e))
        })?;

        parsed_job_from_value(&value)
    }

    /// Enriches a baseline record, absorbing every oracle failure.
    ///
    /// A response with nothing useful in it counts as a miss; the baseline
    /// always survives.
    pub async fn enrich(&self, text: &str, baseline: ParsedJob) -> ParsedJob {
        match self.extract(text).await {
            Ok(enrichment) if enrichment.has_any_field() => {
                tracing::debug!("enrichment applied over baseline");
                merge_with_baseline(&baseline, Some(&enrichment))
            }
            Ok(_) => {
                tracing::debug!("enrichment returned an empty record, keeping baseline");
                baseline
            }
            Err(err) => {
                tracing::warn!("enrichment failed, keeping baseline: {}", err);
                baseline
            }
        }
    }
}

/// Pulls the JSON payload out of a possibly fence-wrapped oracle response.
fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();

    for fence in ["```json", "```"] {
        if let Some(after) = trimmed.split_once(fence).map(|(_, rest)| rest) {
            if let Some((inner, _)) = after.split_once("```") {
                return inner.trim();
            }
            return after.trim();
        }
    }

    trimmed
}

/// Validates the oracle's untyped JSON into a record.
///
/// Each known field must be a string or absent; any other shape is an
/// oracle failure rather than data. Unknown fields are ignored.
fn parsed_job_from_value(value: &Value) -> Result<ParsedJob, ExtractionError> {
    let object = value.as_object().ok_or_else(|| {
        ExtractionError::ModelError("Oracle response is not a JSON object".to_string())
    })?;

    let field = |name: &str| -> Result<Option<String>, ExtractionError> {
        match object.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(ExtractionError::ModelError(format!(
                "Field '{}' has unexpected type: {}",
                name, other
            ))),
        }
    };

    Ok(ParsedJob {
        date: field("date")?,
        time: field("time")?,
        job_name: field("jobName")?,
        location: field("location")?,
        details: field("details")?,
        color_id: field("colorId")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FakeClient {
        response: Result<String, String>,
    }

    #[async_trait]
    impl LlmClient for FakeClient {
        async fn complete(&self, _prompt: &str) -> Result<String, ExtractionError> {
            self.response
                .clone()
                .map_err(ExtractionError::ModelError)
        }
    }

    fn agent_with(response: Result<&str, &str>) -> EventExtractorAgent {
        EventExtractorAgent::new(Arc::new(FakeClient {
            response: response.map(str::to_string).map_err(str::to_string),
        }))
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(
            strip_code_fences("```json\n{\"a\":1}\n```"),
            "{\"a\":1}"
        );
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(
            strip_code_fences("Here you go:\n```json\n{\"a\":1}\n```\nDone."),
            "{\"a\":1}"
        );
    }

    #[test]
    fn test_wrong_shapes_are_oracle_failures() {
        assert!(parsed_job_from_value(&serde_json::json!([1, 2])).is_err());
        assert!(parsed_job_from_value(&serde_json::json!({"date": 20250624})).is_err());
        assert!(parsed_job_from_value(&serde_json::json!({"jobName": {"x": 1}})).is_err());
    }

    #[test]
    fn test_null_and_missing_fields_are_absent() {
        let job =
            parsed_job_from_value(&serde_json::json!({"jobName": "Acme", "date": null})).unwrap();
        assert_eq!(job.job_name.as_deref(), Some("Acme"));
        assert!(job.date.is_none());
        assert!(job.time.is_none());
    }

    #[tokio::test]
    async fn test_extract_parses_fenced_response() {
        let agent = agent_with(Ok(
            "```json\n{\"jobName\": \"Acme Corp\", \"time\": \"10:00 AM to 11:30 AM\"}\n```",
        ));

        let job = agent.extract("whatever").await.unwrap();
        assert_eq!(job.job_name.as_deref(), Some("Acme Corp"));
        assert_eq!(job.time.as_deref(), Some("10:00 AM to 11:30 AM"));
    }

    #[tokio::test]
    async fn test_enrich_absorbs_oracle_failure() {
        let agent = agent_with(Err("timed out"));
        let baseline = ParsedJob {
            job_name: Some("Acme".to_string()),
            ..Default::default()
        };

        let result = agent.enrich("text", baseline.clone()).await;
        assert_eq!(result, baseline);
    }

    #[tokio::test]
    async fn test_enrich_absorbs_non_json_output() {
        let agent = agent_with(Ok("I could not find any event information."));
        let baseline = ParsedJob {
            job_name: Some("Acme".to_string()),
            ..Default::default()
        };

        let result = agent.enrich("text", baseline.clone()).await;
        assert_eq!(result, baseline);
    }

    #[tokio::test]
    async fn test_enrich_treats_empty_record_as_miss() {
        let agent = agent_with(Ok("{\"jobName\": \"\", \"date\": \"\"}"));
        let baseline = ParsedJob {
            job_name: Some("Acme".to_string()),
            ..Default::default()
        };

        let result = agent.enrich("text", baseline.clone()).await;
        assert_eq!(result, baseline);
    }

    #[tokio::test]
    async fn test_enrich_fills_gaps_field_by_field() {
        let agent =
            agent_with(Ok("{\"jobName\": \"\", \"date\": \"June 24th\"}"));
        let baseline = ParsedJob {
            job_name: Some("Acme".to_string()),
            ..Default::default()
        };

        let result = agent.enrich("text", baseline).await;
        assert_eq!(result.job_name.as_deref(), Some("Acme"));
        assert_eq!(result.date.as_deref(), Some("June 24th"));
    }
}
