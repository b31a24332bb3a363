//! Prompt construction.

/// Build the instruction prompt for a ticket description.
///
/// The template is fixed: it embeds the description, mandates the exact JSON
/// array shape the parser expects, and tells the model to emit only that
/// JSON. Models are unreliable about the last part, which is why
/// [`crate::parse::extract_test_cases`] tolerates surrounding commentary.
pub fn build_prompt(description: &str) -> String {
    format!(
        r#"You are a QA analyst. Based on the following ticket description, generate manual test cases in XRAY format with steps, expected result, and test ID.

Ticket Description:
{description}

Output format:
[
  {{
    "test_id": "TC-001",
    "title": "Verify login with valid credentials",
    "steps": ["Open login page", "Enter valid credentials", "Click login"],
    "expected_result": "User is logged in"
  }}
]

Return ONLY valid JSON without any extra text.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_description() {
        let prompt = build_prompt("users cannot reset passwords");
        assert!(prompt.contains("users cannot reset passwords"));
        assert!(prompt.contains("\"test_id\""));
        assert!(prompt.contains("ONLY valid JSON"));
    }

    #[test]
    fn empty_description_is_passed_through() {
        // An empty description is accepted; whether the model responds
        // usefully is its problem, not this layer's.
        let prompt = build_prompt("");
        assert!(prompt.contains("Ticket Description:\n\n"));
    }
}
