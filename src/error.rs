//! Error types for formalizer.

use thiserror::Error;

/// Result type alias using formalizer's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or calling the formalizer.
///
/// None of these reach the caller of [`Formalizer::formalize`](crate::Formalizer::formalize);
/// the selection policy turns them into attempt records and falls back to the
/// rule-based path.
#[derive(Error, Debug)]
pub enum Error {
    /// No generative backend could be constructed
    #[error("Generative backend unavailable: {message}")]
    GeneratorUnavailable { message: String },

    /// A single generation call failed
    #[error("Generation error: {model} - {message}")]
    Generation { model: String, message: String },

    /// A substitution rule did not compile
    #[error("Invalid rule pattern `{pattern}`: {source}")]
    InvalidRule {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a generator unavailable error.
    pub fn generator_unavailable(message: impl Into<String>) -> Self {
        Self::GeneratorUnavailable {
            message: message.into(),
        }
    }

    /// Create a generation error.
    pub fn generation(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Generation {
            model: model.into(),
            message: message.into(),
        }
    }

    /// Create an invalid rule error.
    pub fn invalid_rule(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidRule {
            pattern: pattern.into(),
            source,
        }
    }
}
