//! Selection policy: generative candidates first, rule-based fallback always.
//!
//! [`Formalizer::formalize`] tries each prompt template once, in order, against
//! the injected generator. The first candidate that passes
//! [`validate_candidate`] is returned tagged [`FormalizationMethod::Generative`].
//! Call failures and rejected candidates are recorded and skipped. When no
//! candidate is accepted, or no generator is available, the rule-based
//! formalizer runs on the original text.
//!
//! The policy never returns an error.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::llm::{GenerationOptions, GenerationRequest, TextGenerator};
use crate::prompt::{default_prompts, PromptTemplate};
use crate::rules::RuleSet;

/// Which path produced a [`FormalResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormalizationMethod {
    Generative,
    RuleBased,
}

impl std::fmt::Display for FormalizationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generative => write!(f, "generative"),
            Self::RuleBased => write!(f, "rule-based"),
        }
    }
}

/// Why the rule-based path was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No generator was constructed for this session.
    GeneratorUnavailable,
    /// Every prompt failed or produced a rejected candidate.
    NoAcceptedCandidate,
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GeneratorUnavailable => write!(f, "generative model unavailable"),
            Self::NoAcceptedCandidate => write!(f, "no acceptable generative candidate"),
        }
    }
}

/// Why a candidate failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Same as the input after trimming and lowercasing
    Unchanged,
    /// Not longer than half the input
    TooShort,
    /// The input itself was blank
    BlankInput,
}

/// Outcome of one prompt attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Accepted,
    CallFailed { error: String },
    Rejected { reason: RejectionReason },
}

/// One prompt attempt, for observability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Prompt template name
    pub prompt: String,
    pub outcome: AttemptOutcome,
    pub elapsed_ms: u64,
}

/// The formalized text and how it was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormalResult {
    pub output: String,
    pub method: FormalizationMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<FallbackReason>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attempts: Vec<AttemptRecord>,
}

impl FormalResult {
    fn generative(output: String, attempts: Vec<AttemptRecord>) -> Self {
        Self {
            output,
            method: FormalizationMethod::Generative,
            fallback_reason: None,
            attempts,
        }
    }

    fn rule_based(output: String, reason: FallbackReason, attempts: Vec<AttemptRecord>) -> Self {
        Self {
            output,
            method: FormalizationMethod::RuleBased,
            fallback_reason: Some(reason),
            attempts,
        }
    }

    pub fn is_generative(&self) -> bool {
        self.method == FormalizationMethod::Generative
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Accept a candidate iff it differs from the input (ignoring case and
/// surrounding whitespace) and is longer than half the input, in characters.
pub fn validate_candidate(candidate: &str, input: &str) -> Result<(), RejectionReason> {
    let normalized_input = normalize(input);
    if normalized_input.is_empty() {
        return Err(RejectionReason::BlankInput);
    }
    if normalize(candidate) == normalized_input {
        return Err(RejectionReason::Unchanged);
    }
    // len(candidate) > 0.5 * len(input), kept in integers
    if candidate.chars().count() * 2 <= input.chars().count() {
        return Err(RejectionReason::TooShort);
    }
    Ok(())
}

/// Casual-to-formal rewriting with a guaranteed rule-based fallback.
///
/// The generator handle is built once by the host application and shared
/// read-only across requests.
pub struct Formalizer {
    generator: Option<Arc<dyn TextGenerator>>,
    prompts: Vec<PromptTemplate>,
    options: GenerationOptions,
    rules: RuleSet,
}

impl Formalizer {
    /// Create a formalizer. `None` means every request takes the rule-based path.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            generator,
            prompts: default_prompts(),
            options: GenerationOptions::default(),
            rules: RuleSet::default_rules(),
        }
    }

    /// Create a formalizer with no generator.
    pub fn rule_based() -> Self {
        Self::new(None)
    }

    pub fn with_prompts(mut self, prompts: Vec<PromptTemplate>) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    pub fn prompts(&self) -> &[PromptTemplate] {
        &self.prompts
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Formalize `text`. Never fails.
    ///
    /// Every prompt is attempted, blank input included; its candidates are
    /// then rejected with [`RejectionReason::BlankInput`].
    pub async fn formalize(&self, text: &str) -> FormalResult {
        let Some(generator) = &self.generator else {
            return self.fallback(text, FallbackReason::GeneratorUnavailable, Vec::new());
        };

        let mut attempts = Vec::with_capacity(self.prompts.len());

        for prompt in &self.prompts {
            let request =
                GenerationRequest::new(prompt.render(text)).with_options(self.options.clone());
            let started = Instant::now();

            let outcome = match generator.generate(request).await {
                Ok(candidate) => match validate_candidate(&candidate.text, text) {
                    Ok(()) => {
                        attempts.push(AttemptRecord {
                            prompt: prompt.name().to_string(),
                            outcome: AttemptOutcome::Accepted,
                            elapsed_ms: started.elapsed().as_millis() as u64,
                        });
                        info!(
                            "Accepted candidate from {} via prompt {}",
                            generator.model(),
                            prompt.name()
                        );
                        return FormalResult::generative(candidate.text, attempts);
                    }
                    Err(reason) => {
                        debug!("Prompt {} candidate rejected: {:?}", prompt.name(), reason);
                        AttemptOutcome::Rejected { reason }
                    }
                },
                Err(e) => {
                    debug!("Prompt {} failed: {}", prompt.name(), e);
                    AttemptOutcome::CallFailed {
                        error: e.to_string(),
                    }
                }
            };

            attempts.push(AttemptRecord {
                prompt: prompt.name().to_string(),
                outcome,
                elapsed_ms: started.elapsed().as_millis() as u64,
            });
        }

        self.fallback(text, FallbackReason::NoAcceptedCandidate, attempts)
    }

    fn fallback(
        &self,
        text: &str,
        reason: FallbackReason,
        attempts: Vec<AttemptRecord>,
    ) -> FormalResult {
        info!("Using rule-based formalizer: {}", reason);
        FormalResult::rule_based(self.rules.formalize(text), reason, attempts)
    }
}
