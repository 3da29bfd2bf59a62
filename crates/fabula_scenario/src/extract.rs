//! Recovering a JSON document from free-form generator output.

use serde_json::Value;
use tracing::debug;

/// Parses `text` as JSON, falling back to the span from the first `{` to the last `}`.
///
/// Language models often wrap the document in prose or code fences; the
/// fallback strips that wrapping. Returns `None` when neither attempt yields JSON.
///
/// # Examples
///
/// ```
/// use fabula_scenario::extract_document;
///
/// let text = "Here is your quest:\n```json\n{\"scenes\": []}\n```";
/// let document = extract_document(text).unwrap();
/// assert!(document["scenes"].is_array());
/// ```
pub fn extract_document(text: &str) -> Option<Value> {
    if let Ok(document) = serde_json::from_str(text) {
        return Some(document);
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }

    match serde_json::from_str(&text[start..=end]) {
        Ok(document) => {
            debug!(start, end, "Extracted embedded JSON document");
            Some(document)
        }
        Err(e) => {
            debug!(error = %e, "Embedded span is not valid JSON");
            None
        }
    }
}
