//! Rule-based formalization.
//!
//! The rule-based formalizer is the deterministic fallback used whenever no
//! generative candidate is accepted. It runs a fixed pipeline:
//!
//! 1. Lowercase the whole input. All original casing is lost here.
//! 2. Apply an ordered list of [`PatternRule`]s, each over the output of the
//!    previous one.
//! 3. Uppercase the first character only.
//! 4. Append `.` unless the text already ends in `.`, `!` or `?`.
//! 5. Collapse whitespace runs to a single space and trim.
//!
//! ## Rule chaining
//!
//! Rules are applied strictly in sequence, so a replacement can be matched
//! again by a later rule. The built-in table relies on this: `pls` becomes
//! `please`, which the next rule turns into `kindly`. It also means `u -> you`
//! runs before `can u -> Could you`, so the latter never fires on the
//! built-in table. New rules must be placed with this ordering in mind.
//!
//! ## Example
//!
//! ```rust
//! use formalizer::rules::rule_based_formalize;
//!
//! let formal = rule_based_formalize("hey can u send me the report asap?");
//! assert_eq!(
//!     formal,
//!     "Hello can you send me the report at your earliest convenience?"
//! );
//! ```

#[cfg(test)]
mod proptest;

use regex::{NoExpand, Regex, RegexBuilder};
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Characters accepted as sentence-final punctuation.
pub const TERMINAL_PUNCTUATION: &[char] = &['.', '!', '?'];

/// Built-in informal-to-formal substitutions, in application order.
const INFORMAL_SUBSTITUTIONS: &[(&str, &str)] = &[
    (r"\bhey\b", "Hello"),
    (r"\bhi\b", "Hello"),
    (r"\bu\b", "you"),
    (r"\bur\b", "your"),
    (r"\basap\b", "at your earliest convenience"),
    (r"\bpls\b", "please"),
    (r"\bplease\b", "kindly"),
    (r"\bthx\b", "thank you"),
    (r"\bthanks\b", "thank you"),
    (r"\bcan u\b", "Could you"),
    (r"\bcould u\b", "Could you"),
    (r"\bwanna\b", "would like to"),
    (r"\bgonna\b", "going to"),
    (r"\bgr8\b", "great"),
    (r"\bbtw\b", "additionally"),
    (r"\bimo\b", "in my opinion"),
    (r"\brn\b", "right now"),
    (r"\bomg\b", ""),
    (r"\blol\b", ""),
    // Trailing exclamation becomes a period
    (r"!\s*$", "."),
];

static DEFAULT_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(INFORMAL_SUBSTITUTIONS.iter().copied()).expect("invalid built-in rule")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid regex"));

/// A single case-insensitive substitution.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pattern: Regex,
    replacement: String,
}

impl PatternRule {
    /// Compile a rule. The pattern always matches case-insensitively.
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let compiled = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::invalid_rule(pattern, e))?;

        Ok(Self {
            pattern: compiled,
            replacement: replacement.into(),
        })
    }

    /// The pattern source as written.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// The literal replacement text. Empty means the match is deleted.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Whether the rule matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Replace every match in `text`. Replacements are literal; `$` is not expanded.
    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, NoExpand(&self.replacement))
            .into_owned()
    }
}

/// An ordered sequence of [`PatternRule`]s plus the formalization pipeline.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<PatternRule>,
}

impl RuleSet {
    /// Compile an ordered rule set from `(pattern, replacement)` pairs.
    pub fn new<I, P, R>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, R)>,
        P: AsRef<str>,
        R: Into<String>,
    {
        let rules = pairs
            .into_iter()
            .map(|(pattern, replacement)| PatternRule::new(pattern.as_ref(), replacement))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// The built-in informal-to-formal table.
    pub fn builtin() -> &'static RuleSet {
        &DEFAULT_RULES
    }

    /// An owned copy of the built-in table, for extending.
    pub fn default_rules() -> Self {
        DEFAULT_RULES.clone()
    }

    /// Append a rule after all existing ones.
    pub fn with_rule(mut self, pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        self.rules.push(PatternRule::new(pattern, replacement)?);
        Ok(self)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate rules in application order.
    pub fn iter(&self) -> impl Iterator<Item = &PatternRule> {
        self.rules.iter()
    }

    /// Apply every rule in order over a working string.
    pub fn substitute(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |working, rule| rule.apply(&working))
    }

    /// Run the full pipeline. Total: always returns a non-empty string ending
    /// in `.`, `!` or `?`.
    pub fn formalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let substituted = self.substitute(&lowered);

        // Capitalization runs before whitespace is collapsed, so a deleted
        // leading token leaves the first word lowercase.
        let mut formal = capitalize_first(&substituted);
        if !formal.ends_with(TERMINAL_PUNCTUATION) {
            formal.push('.');
        }

        WHITESPACE_RUN.replace_all(&formal, " ").trim().to_string()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::default_rules()
    }
}

/// Formalize `text` with the built-in rule table.
pub fn rule_based_formalize(text: &str) -> String {
    DEFAULT_RULES.formalize(text)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_request() {
        let formal = rule_based_formalize("hey can u send me the report asap?");

        assert!(formal.starts_with("Hello"));
        assert!(formal.contains("you"));
        assert!(formal.contains("at your earliest convenience"));
        assert!(formal.ends_with('?'));
        assert_eq!(
            formal,
            "Hello can you send me the report at your earliest convenience?"
        );
    }

    #[test]
    fn test_deleted_tokens() {
        let formal = rule_based_formalize("omg lol that's great");

        assert!(!formal.contains("omg"));
        assert!(!formal.contains("lol"));
        assert_eq!(formal, "that's great.");
    }

    #[test]
    fn test_trailing_exclamation() {
        assert_eq!(rule_based_formalize("thanks!"), "Thank you.");
        assert_eq!(rule_based_formalize("thx for the help!  "), "Thank you for the help.");
        // Only the final one is rewritten
        assert_eq!(rule_based_formalize("wow!!"), "Wow!.");
    }

    #[test]
    fn test_question_mark_kept() {
        assert_eq!(rule_based_formalize("u there?"), "You there?");
    }

    #[test]
    fn test_lowercasing_is_destructive() {
        assert_eq!(
            rule_based_formalize("I NEED The FILE"),
            "I need the file."
        );
        assert_eq!(rule_based_formalize("Meeting With NASA"), "Meeting with nasa.");
    }

    #[test]
    fn test_chained_rules() {
        // pls -> please -> kindly
        assert_eq!(
            rule_based_formalize("pls review the doc"),
            "Kindly review the doc."
        );
        // u -> you runs first, so `can u` never reaches its own rule
        assert_eq!(rule_based_formalize("can u help"), "Can you help.");
        assert_eq!(
            rule_based_formalize("could u check ur inbox"),
            "Could you check your inbox."
        );
    }

    #[test]
    fn test_inserted_casing_survives() {
        assert_eq!(rule_based_formalize("ok hey"), "Ok Hello.");
    }

    #[test]
    fn test_word_boundaries() {
        // `hi` inside `this`, `u` inside `us`, `rn` inside `turn`
        assert_eq!(
            rule_based_formalize("this is for us, turn it in"),
            "This is for us, turn it in."
        );
    }

    #[test]
    fn test_abbreviations() {
        assert_eq!(
            rule_based_formalize("btw imo we're gonna need it rn"),
            "Additionally in my opinion we're going to need it right now."
        );
        assert_eq!(
            rule_based_formalize("i wanna say gr8 job"),
            "I would like to say great job."
        );
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(rule_based_formalize(""), ".");
        assert_eq!(rule_based_formalize("   \n\t "), ".");
    }

    #[test]
    fn test_whitespace_collapsed() {
        // The period is appended before trailing whitespace is trimmed
        assert_eq!(
            rule_based_formalize("  see   you\n\ntomorrow "),
            "see you tomorrow ."
        );
        assert_eq!(rule_based_formalize("see   you\ttomorrow"), "See you tomorrow.");
    }

    #[test]
    fn test_builtin_table_shape() {
        let rules = RuleSet::builtin();
        assert_eq!(rules.len(), 20);
        assert_eq!(rules.iter().next().unwrap().replacement(), "Hello");
        assert_eq!(rules.iter().last().unwrap().replacement(), ".");
        assert!(rules.iter().any(|r| r.replacement().is_empty()));
    }

    #[test]
    fn test_custom_rule_set() {
        let rules = RuleSet::new([(r"\bidk\b", "I am not certain"), (r"\bcertain\b", "sure")])
            .unwrap();

        // Chaining applies to custom sets too
        assert_eq!(rules.formalize("IDK"), "I am not sure.");
    }

    #[test]
    fn test_extend_default_rules() {
        let rules = RuleSet::default_rules()
            .with_rule(r"\blmk\b", "let me know")
            .unwrap();

        assert_eq!(rules.len(), RuleSet::builtin().len() + 1);
        assert_eq!(
            rules.formalize("pls lmk what u think"),
            "Kindly let me know what you think."
        );
    }

    #[test]
    fn test_replacement_is_literal() {
        let rules = RuleSet::new([(r"\bcost\b", "$1 fee")]).unwrap();
        assert_eq!(rules.formalize("the cost"), "The $1 fee.");
    }

    #[test]
    fn test_invalid_rule() {
        let err = RuleSet::new([(r"(unclosed", "x")]).unwrap_err();
        assert!(matches!(err, Error::InvalidRule { .. }));
    }

    #[test]
    fn test_rule_is_case_insensitive() {
        let rule = PatternRule::new(r"\bhey\b", "Hello").unwrap();
        assert!(rule.is_match("HEY there"));
        assert_eq!(rule.apply("HEY there"), "Hello there");
        assert_eq!(rule.pattern(), r"\bhey\b");
    }
}
