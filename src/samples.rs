//! Static example pairs shown alongside the formalizer.

use serde::Serialize;

use crate::rules::rule_based_formalize;

/// Text pre-filled in interactive front ends.
pub const DEFAULT_INPUT: &str = "hey can u send me the report asap?";

/// A casual sentence and a hand-written formal rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamplePair {
    pub informal: &'static str,
    pub formal: &'static str,
}

impl ExamplePair {
    /// What the rule-based formalizer makes of the informal side.
    pub fn rule_based(&self) -> String {
        rule_based_formalize(self.informal)
    }

    pub fn to_row(&self) -> ExampleRow {
        ExampleRow {
            informal: self.informal,
            formal: self.formal,
            rule_based: self.rule_based(),
        }
    }
}

/// One line of the example table, as emitted by `formalizer examples --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleRow {
    pub informal: &'static str,
    pub formal: &'static str,
    pub rule_based: String,
}

pub const EXAMPLES: &[ExamplePair] = &[
    ExamplePair {
        informal: "hey can u send me the report asap?",
        formal: "Hello, could you please send me the report at your earliest convenience?",
    },
    ExamplePair {
        informal: "im gonna need that file by tomorrow",
        formal: "I will require that file by tomorrow.",
    },
    ExamplePair {
        informal: "thx for the help!",
        formal: "Thank you for your assistance.",
    },
    ExamplePair {
        informal: "pls review the doc and lmk what u think",
        formal: "Kindly review the document and let me know your thoughts.",
    },
];
