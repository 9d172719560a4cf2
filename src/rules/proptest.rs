//! Property-based tests for the rule-based formalizer.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::rules::{rule_based_formalize, RuleSet, TERMINAL_PUNCTUATION};

    // Lowercase sentences built from short words
    fn lowercase_sentence() -> impl Strategy<Value = String> {
        "[a-z]{1,8}( [a-z]{1,8}){0,6}"
    }

    fn has_informal_token(text: &str) -> bool {
        RuleSet::builtin().iter().any(|rule| rule.is_match(text))
    }

    proptest! {
        /// Output is never empty and always ends in terminal punctuation.
        #[test]
        fn output_is_terminated(text in any::<String>()) {
            let formal = rule_based_formalize(&text);
            prop_assert!(!formal.is_empty());
            prop_assert!(
                formal.ends_with(TERMINAL_PUNCTUATION),
                "{:?} -> {:?}", text, formal
            );
        }

        /// Output has no leading, trailing or repeated whitespace.
        #[test]
        fn output_whitespace_is_normalized(text in "[ a-zA-Z!?.\t\n]{0,40}") {
            let formal = rule_based_formalize(&text);
            prop_assert_eq!(formal.trim(), formal.as_str());
            prop_assert!(!formal.contains("  "));
            prop_assert!(!formal.contains('\n'));
            prop_assert!(!formal.contains('\t'));
        }

        /// The trailing exclamation rule leaves no final `!`.
        #[test]
        fn output_never_ends_in_exclamation(text in "[ a-z!]{0,30}") {
            prop_assert!(!rule_based_formalize(&text).ends_with('!'));
        }

        /// A second pass is a fixed point for plain lowercase text.
        #[test]
        fn second_pass_is_fixed_point(text in lowercase_sentence()) {
            prop_assume!(!has_informal_token(&text));

            let once = rule_based_formalize(&text);
            let twice = rule_based_formalize(&once);
            prop_assert_eq!(once, twice);
        }

        /// Deleted interjections never survive.
        #[test]
        fn interjections_are_removed(prefix in lowercase_sentence(), suffix in lowercase_sentence()) {
            let text = format!("{} omg {} lol", prefix, suffix);
            prop_assume!(!prefix.split(' ').any(|w| w == "omg" || w == "lol"));
            prop_assume!(!suffix.split(' ').any(|w| w == "omg" || w == "lol"));

            let formal = rule_based_formalize(&text);
            prop_assert!(!formal.split(' ').any(|w| w.trim_end_matches('.') == "omg"));
            prop_assert!(!formal.split(' ').any(|w| w.trim_end_matches('.') == "lol"));
        }
    }
}
