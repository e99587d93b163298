//! Defensive parsing of advisory replies
//!
//! Models wrap JSON in markdown fences or surround it with prose.
//! Strip the fences, take the outermost brace pair, then parse.

use crate::error::{Error, Result};
use crate::insights::InsightBundle;

/// Parses a raw advisory reply into an `InsightBundle`.
pub fn parse_insight_bundle(response: &str) -> Result<InsightBundle> {
    let cleaned = strip_code_fences(response);

    let start = cleaned
        .find('{')
        .ok_or_else(|| Error::InvalidData("advisory reply contains no JSON object".to_string()))?;
    let end = cleaned
        .rfind('}')
        .ok_or_else(|| Error::InvalidData("advisory reply contains no JSON object".to_string()))?;
    if end < start {
        return Err(Error::InvalidData(
            "advisory reply contains no JSON object".to_string(),
        ));
    }

    serde_json::from_str(&cleaned[start..=end])
        .map_err(|e| Error::InvalidData(format!("advisory reply is not a valid bundle: {}", e)))
}

fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(without_open) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    let body = match without_open.split_once('\n') {
        Some((_, rest)) => rest,
        None => without_open,
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    #[test]
    fn test_parse_plain_json() {
        let bundle = parse_insight_bundle(
            r#"{"recommendations": [], "alerts": [], "insights": []}"#,
        )
        .unwrap();
        assert!(bundle.recommendations.is_empty());
    }

    #[test]
    fn test_parse_fenced_json() {
        let reply = "```json\n{\"recommendations\": [], \"alerts\": [{\"type\": \"warning\", \"message\": \"careful\"}], \"insights\": []}\n```";
        let bundle = parse_insight_bundle(reply).unwrap();
        assert_eq!(bundle.alerts.len(), 1);
        assert_eq!(bundle.alerts[0].severity, Severity::Warning);
    }

    #[test]
    fn test_parse_json_with_surrounding_prose() {
        let reply = "Here is your analysis:\n{\"recommendations\": [], \"alerts\": [], \"insights\": []}\nHope this helps!";
        assert!(parse_insight_bundle(reply).is_ok());
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(parse_insight_bundle("I cannot help with that.").is_err());
        assert!(parse_insight_bundle("{not json}").is_err());
        assert!(parse_insight_bundle("").is_err());
    }

    #[test]
    fn test_parse_lenient_missing_fields() {
        // Partial bundles still parse; absent arrays default empty.
        let bundle = parse_insight_bundle(r#"{"insights": [{"type": "tip", "message": "save"}]}"#)
            .unwrap();
        assert!(bundle.recommendations.is_empty());
        assert!(bundle.alerts.is_empty());
        assert_eq!(bundle.insights.len(), 1);
    }
}
