//! Turning raw service output into an [`AnalysisResult`].
//!
//! Values are taken verbatim: `certainty` is not clamped and strings are not
//! trimmed. The only local check is owner-profile enum membership, which runs
//! before typed decoding so an unknown label is reported as
//! [`VisionError::UnrecognizedValue`] rather than as a generic schema error.

use serde_json::Value;

use crate::models::{AnalysisResult, OwnerProfile};

use super::VisionError;

/// Pulls the generated text out of a `generateContent` response envelope.
pub fn candidate_text(envelope: &Value) -> Result<&str, VisionError> {
    if let Some(reason) = envelope
        .get("promptFeedback")
        .and_then(|feedback| feedback.get("blockReason"))
        .and_then(Value::as_str)
    {
        return Err(VisionError::ServiceRefused(format!("prompt blocked: {reason}")));
    }

    let candidate = envelope
        .get("candidates")
        .and_then(|c| c.get(0))
        .ok_or_else(|| VisionError::ServiceRefused("no candidates returned".into()))?;

    let text = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty());

    match text {
        Some(text) => Ok(text),
        None => {
            let finish_reason = candidate
                .get("finishReason")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            Err(VisionError::ServiceRefused(format!(
                "no response text received (finish reason: {finish_reason})"
            )))
        }
    }
}

/// Strips an optional markdown code fence around a JSON document.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    let without_opening = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_opening
        .strip_suffix("```")
        .unwrap_or(without_opening)
        .trim()
}

fn check_owner_profile(document: &Value) -> Result<(), VisionError> {
    let Some(profile) = document.get("characteristics") else {
        // Absence is a schema violation, reported by typed decoding.
        return Ok(());
    };

    for (field, legal) in OwnerProfile::FIELDS {
        if let Some(value) = profile.get(*field) {
            let label = match value.as_str() {
                Some(label) => label.to_string(),
                None => value.to_string(),
            };
            if !legal.contains(&label.as_str()) {
                return Err(VisionError::UnrecognizedValue {
                    field: format!("characteristics.{field}"),
                    value: label,
                });
            }
        }
    }
    Ok(())
}

pub fn parse_analysis(content: &str) -> Result<AnalysisResult, VisionError> {
    let json = strip_code_fence(content);
    let document: Value = serde_json::from_str(json)
        .map_err(|e| VisionError::SchemaViolation(format!("response is not JSON: {e}")))?;

    check_owner_profile(&document)?;

    serde_json::from_value(document).map_err(|e| VisionError::SchemaViolation(e.to_string()))
}
