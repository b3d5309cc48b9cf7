//! Response normalization — the trust boundary for model output.
//!
//! The upstream model returns free text: sometimes clean JSON, sometimes a
//! markdown-fenced block, sometimes not JSON at all. This module converts any
//! of it into a well-formed [`AnalysisResult`]; a parse failure yields the
//! fixed fallback result instead of an error. Nothing here can fail the
//! request.

use once_cell::sync::Lazy;
use ppeguard_core::{AnalysisResult, PpeFinding};
use regex::Regex;
use serde_json::Value;
use tracing::warn;

/// Markdown code-fence markers, with or without the `json` language tag.
static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```(?:json)?").unwrap());

/// Normalize raw model output into an [`AnalysisResult`].
///
/// `overall_compliant` is recomputed locally as the AND over the findings;
/// the model's own claim is ignored. Bounding boxes are clamped to [0,1].
pub fn normalize(raw: &str) -> AnalysisResult {
    let text = if raw.trim().is_empty() { "{}" } else { raw };

    let cleaned = if text.contains("```") {
        FENCE.replace_all(text, "").trim().to_string()
    } else {
        text.trim().to_string()
    };

    let value: Value = match serde_json::from_str(&cleaned) {
        Ok(v) => v,
        Err(err) => {
            warn!(%err, "model output is not valid JSON, substituting fallback result");
            return AnalysisResult::fallback();
        }
    };

    let Value::Object(object) = value else {
        warn!("model output is valid JSON but not an object, substituting fallback result");
        return AnalysisResult::fallback();
    };

    // A missing or non-list findings field is coerced to an empty list
    // rather than failing the request.
    let findings: Vec<PpeFinding> = match object.get("findings") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match serde_json::from_value(item.clone()) {
                Ok(finding) => Some(finding),
                Err(err) => {
                    warn!(%err, "dropping finding that does not match the schema");
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    };

    let summary = object
        .get("summary")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    let mut result = AnalysisResult { findings, summary, overall_compliant: false };
    for finding in &mut result.findings {
        finding.bounding_box = finding.bounding_box.clamped();
    }
    result.recompute_overall();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppeguard_core::{BoundingBox, PpeItem};

    const CLEAN: &str = r#"{
        "findings": [
            {"ppeItem": "Hairnet", "compliant": true, "reason": "ok",
             "boundingBox": {"x": 0.1, "y": 0.0, "width": 0.2, "height": 0.15}},
            {"ppeItem": "Gloves", "compliant": true, "reason": "ok",
             "boundingBox": {"x": 0.4, "y": 0.6, "width": 0.2, "height": 0.2}}
        ],
        "summary": "all good",
        "overallCompliant": true
    }"#;

    #[test]
    fn parses_clean_json() {
        let result = normalize(CLEAN);
        assert_eq!(result.findings.len(), 2);
        assert_eq!(result.findings[0].ppe_item, PpeItem::Hairnet);
        assert_eq!(result.summary, "all good");
        assert!(result.overall_compliant);
    }

    #[test]
    fn strips_markdown_fences() {
        let fenced = format!("```json\n{CLEAN}\n```");
        let result = normalize(&fenced);
        assert_eq!(result.findings.len(), 2);
        assert!(result.overall_compliant);
    }

    #[test]
    fn strips_untagged_fences() {
        let result =
            normalize("```\n{\"findings\":[],\"summary\":\"ok\",\"overallCompliant\":true}\n```");
        assert!(result.findings.is_empty());
        assert_eq!(result.summary, "ok");
    }

    #[test]
    fn malformed_output_yields_the_fixed_fallback() {
        let result = normalize("not json");
        assert_eq!(result.findings.len(), 5);
        assert!(result.findings.iter().all(|f| !f.compliant));
        assert!(!result.overall_compliant);
        let items: Vec<PpeItem> = result.findings.iter().map(|f| f.ppe_item).collect();
        assert_eq!(items, PpeItem::ALL.to_vec());
    }

    #[test]
    fn empty_text_behaves_like_empty_object() {
        let result = normalize("   ");
        assert!(result.findings.is_empty());
        assert!(!result.overall_compliant);
    }

    #[test]
    fn missing_findings_field_is_coerced_to_empty_list() {
        let result = normalize(r#"{"summary": "nothing checked"}"#);
        assert!(result.findings.is_empty());
        assert_eq!(result.summary, "nothing checked");
        assert!(!result.overall_compliant);
    }

    #[test]
    fn non_list_findings_is_coerced_to_empty_list() {
        let result = normalize(r#"{"findings": "oops", "summary": "s"}"#);
        assert!(result.findings.is_empty());
    }

    #[test]
    fn non_object_json_yields_the_fallback() {
        let result = normalize(r#"["findings"]"#);
        assert_eq!(result.findings.len(), 5);
    }

    #[test]
    fn overall_claim_from_the_model_is_ignored() {
        let result = normalize(
            r#"{"findings": [{"ppeItem": "Mask", "compliant": false, "reason": "missing",
                "boundingBox": {"x": 0, "y": 0, "width": 1, "height": 1}}],
                "summary": "s", "overallCompliant": true}"#,
        );
        assert!(!result.overall_compliant);
    }

    #[test]
    fn out_of_range_boxes_are_clamped() {
        let result = normalize(
            r#"{"findings": [{"ppeItem": "Mask", "compliant": true, "reason": "ok",
                "boundingBox": {"x": -0.2, "y": 0.5, "width": 3.0, "height": 0.9}}],
                "summary": "s", "overallCompliant": true}"#,
        );
        let b = result.findings[0].bounding_box;
        assert_eq!(b, BoundingBox { x: 0.0, y: 0.5, width: 1.0, height: 0.5 });
    }

    #[test]
    fn unparseable_findings_are_dropped_not_fatal() {
        let result = normalize(
            r#"{"findings": [
                {"ppeItem": "Welding helmet", "compliant": true},
                {"ppeItem": "Gloves", "compliant": true, "reason": "ok",
                 "boundingBox": {"x": 0, "y": 0, "width": 0.1, "height": 0.1}}
            ], "summary": "s"}"#,
        );
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].ppe_item, PpeItem::Gloves);
    }
}
