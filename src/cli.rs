//! CLI-facing rendering helpers.
//!
//! Deterministic text output for the `formalizer` binary: the formalized
//! result, the banner naming the method used, and the example table.

use crate::policy::{FallbackReason, FormalResult, FormalizationMethod};
use crate::samples::ExamplePair;

/// Shown when the user submits nothing.
pub const EMPTY_INPUT_WARNING: &str = "Please enter some text to formalize.";

/// Banner describing how a result was produced.
///
/// Derived from the result's tags; the rule-based output is never recomputed
/// to pick the banner.
pub fn method_banner(result: &FormalResult) -> &'static str {
    match (result.method, result.fallback_reason) {
        (FormalizationMethod::Generative, _) => "Using AI-powered formalization",
        (FormalizationMethod::RuleBased, Some(FallbackReason::GeneratorUnavailable)) => {
            "Using rule-based formalizer (AI model unavailable)"
        }
        (FormalizationMethod::RuleBased, _) => {
            "Using rule-based formalizer (AI model didn't produce good results)"
        }
    }
}

/// Whether the input should be rejected before formalizing.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Render a result for terminal output.
pub fn render_result(result: &FormalResult) -> String {
    format!(
        "Formalized Email:\n{}\n\n{}\n",
        result.output,
        method_banner(result)
    )
}

/// Render the example table, with the rule-based baseline for each pair.
pub fn render_examples(examples: &[ExamplePair]) -> String {
    let mut out = String::from("Examples:\n");
    for example in examples {
        out.push_str(&format!(
            "\n'{}' → '{}'\n  Formal:     {}\n  Rule-based: {}\n",
            example.informal,
            example.formal,
            example.formal,
            example.rule_based()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Formalizer;
    use crate::samples::EXAMPLES;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_render_unavailable_result() {
        let result = Formalizer::rule_based().formalize("thx for the help!").await;

        assert_eq!(
            render_result(&result),
            "Formalized Email:\nThank you for the help.\n\n\
             Using rule-based formalizer (AI model unavailable)\n"
        );
    }

    #[test]
    fn test_banner_for_rejected_candidates() {
        let result: FormalResult = serde_json::from_value(serde_json::json!({
            "output": "Thank you.",
            "method": "rule-based",
            "fallback_reason": "no_accepted_candidate"
        }))
        .unwrap();

        assert_eq!(
            method_banner(&result),
            "Using rule-based formalizer (AI model didn't produce good results)"
        );
    }

    #[test]
    fn test_banner_for_generative() {
        let result: FormalResult = serde_json::from_value(serde_json::json!({
            "output": "Thank you for your assistance.",
            "method": "generative"
        }))
        .unwrap();

        assert_eq!(method_banner(&result), "Using AI-powered formalization");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \n\t"));
        assert!(!is_blank(" hi "));
    }

    #[test]
    fn test_render_examples() {
        let rendered = render_examples(EXAMPLES);

        assert!(rendered.starts_with("Examples:\n"));
        assert_eq!(rendered.matches(" → ").count(), EXAMPLES.len());
        assert!(rendered.contains("Rule-based: Thank you for the help."));
        assert!(rendered.contains("Formal:     Kindly review the document"));
    }
}
