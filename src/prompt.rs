//! Prompt templates for the generative formalizer.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Placeholder replaced by the user's text.
pub const TEXT_PLACEHOLDER: &str = "{text}";

/// A named prompt with a `{text}` slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    name: String,
    template: String,
}

impl PromptTemplate {
    /// Create a template. It must contain the `{text}` placeholder.
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let template = template.into();
        if !template.contains(TEXT_PLACEHOLDER) {
            return Err(Error::Config(format!(
                "prompt template `{}` has no {} placeholder",
                name, TEXT_PLACEHOLDER
            )));
        }
        Ok(Self { name, template })
    }

    fn builtin(name: &str, instruction: &str) -> Self {
        Self {
            name: name.to_string(),
            template: format!("{}: {}", instruction, TEXT_PLACEHOLDER),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Embed `text` verbatim.
    pub fn render(&self, text: &str) -> String {
        self.template.replacen(TEXT_PLACEHOLDER, text, 1)
    }
}

/// The built-in prompts, in the order they are tried.
pub fn default_prompts() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate::builtin("formal_tone", "paraphrase this in a formal business tone"),
        PromptTemplate::builtin("professional_email", "rewrite this as a professional email"),
        PromptTemplate::builtin("more_formal", "make this sound more formal and professional"),
        PromptTemplate::builtin(
            "business_language",
            "convert this casual text to formal business language",
        ),
    ]
}
