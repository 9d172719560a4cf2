//! # formalizer
//!
//! Rewrites casual text in a formal register. A generative text2text model is
//! tried first; when it is unavailable or its output fails validation, a
//! deterministic rule-based formalizer produces the answer.
//!
//! ## Core Components
//!
//! - **Rules**: ordered pattern substitutions plus capitalization and
//!   punctuation clean-up
//! - **Policy**: prompt attempts, candidate validation, fallback selection
//! - **LLM**: generator trait, HTTP client, one-shot model loader
//! - **Config**: session configuration from builders or the environment
//!
//! ## Example
//!
//! ```rust,ignore
//! use formalizer::{FormalizerConfig, FormalizationMethod};
//!
//! let formalizer = FormalizerConfig::from_env().build().await?;
//! let result = formalizer.formalize("hey can u send me the report asap?").await;
//!
//! if result.method == FormalizationMethod::RuleBased {
//!     println!("fallback: {:?}", result.fallback_reason);
//! }
//! println!("{}", result.output);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod policy;
pub mod prompt;
pub mod rules;
pub mod samples;

// Re-exports for convenience
pub use config::FormalizerConfig;
pub use error::{Error, Result};
pub use llm::{
    first_available, Candidate, ClientConfig, GenerationOptions, GenerationRequest,
    HuggingFaceClient, ModelLoader, TextGenerator, PRIMARY_MODEL, SECONDARY_MODEL,
};
pub use policy::{
    validate_candidate, AttemptOutcome, AttemptRecord, FallbackReason, FormalResult,
    FormalizationMethod, Formalizer, RejectionReason,
};
pub use prompt::{default_prompts, PromptTemplate};
pub use rules::{rule_based_formalize, PatternRule, RuleSet};
pub use samples::{ExamplePair, ExampleRow, DEFAULT_INPUT, EXAMPLES};
