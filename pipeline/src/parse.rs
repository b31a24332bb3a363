//! Extraction of test cases from raw model output.

use tracing::debug;

use casegen_protocol::TestCase;

use crate::error::{GenerationError, Result};

/// How much of the raw output to keep in parse-error diagnostics.
const SNIPPET_LIMIT: usize = 500;

/// Extract the JSON array of test cases from raw model output.
///
/// The model is instructed to emit only JSON but routinely wraps it in
/// commentary, so this takes the slice between the first `[` and the last
/// `]` and parses that. That single pass is the whole strategy: if there is
/// no bracket pair or the slice is not valid JSON, the result is a
/// [`GenerationError::Parse`], with no further fallback heuristics.
///
/// Individual entries tolerate missing fields (they default to empty), but
/// the array itself must parse.
pub fn extract_test_cases(raw: &str) -> Result<Vec<TestCase>> {
    let start = raw.find('[');
    let end = raw.rfind(']');

    let (Some(start), Some(end)) = (start, end) else {
        return Err(GenerationError::Parse {
            reason: "no JSON array found in model output".to_string(),
            snippet: snippet(raw),
        });
    };
    if end < start {
        return Err(GenerationError::Parse {
            reason: "no JSON array found in model output".to_string(),
            snippet: snippet(raw),
        });
    }

    let slice = &raw[start..=end];
    debug!("Extracted candidate JSON of {} chars", slice.len());

    let cases: Vec<TestCase> = serde_json::from_str(slice).map_err(|e| GenerationError::Parse {
        reason: e.to_string(),
        snippet: snippet(raw),
    })?;

    debug!("Parsed {} test cases", cases.len());
    Ok(cases)
}

fn snippet(raw: &str) -> String {
    if raw.chars().count() <= SNIPPET_LIMIT {
        raw.to_string()
    } else {
        let truncated: String = raw.chars().take(SNIPPET_LIMIT).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_array_surrounded_by_commentary() {
        let raw = "Sure! [{\"test_id\":\"TC-001\",\"title\":\"t\",\"steps\":[\"a\"],\"expected_result\":\"r\"}] Hope this helps";
        let cases = extract_test_cases(raw).unwrap();

        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].test_id, "TC-001");
        assert_eq!(cases[0].title, "t");
        assert_eq!(cases[0].steps, vec!["a".to_string()]);
        assert_eq!(cases[0].expected_result, "r");
    }

    #[test]
    fn extracts_bare_array() {
        let raw = r#"[{"test_id": "TC-001"}, {"test_id": "TC-002"}]"#;
        let cases = extract_test_cases(raw).unwrap();
        assert_eq!(cases.len(), 2);
    }

    #[test]
    fn missing_fields_default_instead_of_failing() {
        let raw = r#"[{"title": "only a title"}]"#;
        let cases = extract_test_cases(raw).unwrap();

        assert_eq!(cases[0].test_id, "");
        assert_eq!(cases[0].title, "only a title");
        assert!(cases[0].steps.is_empty());
        assert_eq!(cases[0].expected_result, "");
    }

    #[test]
    fn no_brackets_is_parse_error() {
        let err = extract_test_cases("I could not produce test cases.").unwrap_err();
        assert!(matches!(err, GenerationError::Parse { .. }));
    }

    #[test]
    fn reversed_brackets_is_parse_error() {
        let err = extract_test_cases("] nothing here [").unwrap_err();
        assert!(matches!(err, GenerationError::Parse { .. }));
    }

    #[test]
    fn invalid_json_between_brackets_is_parse_error() {
        let err = extract_test_cases("[this is not json]").unwrap_err();
        match err {
            GenerationError::Parse { snippet, .. } => {
                assert!(snippet.contains("this is not json"));
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn long_output_is_truncated_in_diagnostics() {
        let raw = "x".repeat(2000);
        let err = extract_test_cases(&raw).unwrap_err();
        match err {
            GenerationError::Parse { snippet, .. } => {
                assert!(snippet.chars().count() <= SNIPPET_LIMIT + 3);
                assert!(snippet.ends_with("..."));
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn array_of_non_objects_is_parse_error() {
        let err = extract_test_cases(r#"{"cases": ["just a string"]}"#).unwrap_err();
        assert!(matches!(err, GenerationError::Parse { .. }));
    }
}
