use shared_types::ParsedJob;

/// Overlays an optional enrichment record on top of the deterministic
/// baseline, field by field.
///
/// An enrichment field wins only when it is present and non-empty after
/// trimming; everything else keeps the baseline value. A missing enrichment
/// yields the baseline unchanged, which is what makes the whole extraction
/// path resilient to oracle failure.
pub fn merge_with_baseline(baseline: &ParsedJob, enrichment: Option<&ParsedJob>) -> ParsedJob {
    let Some(enrichment) = enrichment else {
        return baseline.clone();
    };

    ParsedJob {
        date: pick(&enrichment.date, &baseline.date),
        time: pick(&enrichment.time, &baseline.time),
        job_name: pick(&enrichment.job_name, &baseline.job_name),
        location: pick(&enrichment.location, &baseline.location),
        details: pick(&enrichment.details, &baseline.details),
        color_id: pick(&enrichment.color_id, &baseline.color_id),
    }
}

fn pick(enriched: &Option<String>, base: &Option<String>) -> Option<String> {
    enriched
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| base.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_level_fallback_not_whole_record() {
        let baseline = ParsedJob {
            job_name: Some("Acme".to_string()),
            date: Some("".to_string()),
            ..Default::default()
        };
        let enrichment = ParsedJob {
            job_name: Some("".to_string()),
            date: Some("2025-06-24".to_string()),
            ..Default::default()
        };

        let merged = merge_with_baseline(&baseline, Some(&enrichment));
        assert_eq!(merged.job_name.as_deref(), Some("Acme"));
        assert_eq!(merged.date.as_deref(), Some("2025-06-24"));
    }

    #[test]
    fn test_missing_enrichment_keeps_baseline() {
        let baseline = ParsedJob {
            job_name: Some("Acme".to_string()),
            time: Some("10:00 AM".to_string()),
            ..Default::default()
        };

        assert_eq!(merge_with_baseline(&baseline, None), baseline);
    }

    #[test]
    fn test_whitespace_only_enrichment_value_loses() {
        let baseline = ParsedJob {
            location: Some("Remote/Virtual".to_string()),
            ..Default::default()
        };
        let enrichment = ParsedJob {
            location: Some("   ".to_string()),
            ..Default::default()
        };

        let merged = merge_with_baseline(&baseline, Some(&enrichment));
        assert_eq!(merged.location.as_deref(), Some("Remote/Virtual"));
    }

    #[test]
    fn test_enrichment_value_is_trimmed() {
        let baseline = ParsedJob::default();
        let enrichment = ParsedJob {
            job_name: Some("  Acme Corp  ".to_string()),
            ..Default::default()
        };

        let merged = merge_with_baseline(&baseline, Some(&enrichment));
        assert_eq!(merged.job_name.as_deref(), Some("Acme Corp"));
    }
}
