//! Session configuration.
//!
//! The host application builds one [`FormalizerConfig`] at startup, usually
//! from the environment, and turns it into a [`Formalizer`] with
//! [`FormalizerConfig::build`]. Model loading happens exactly once there.

use tracing::info;

use crate::error::Result;
use crate::llm::{ClientConfig, GenerationOptions, ModelLoader, PRIMARY_MODEL, SECONDARY_MODEL};
use crate::policy::Formalizer;

/// Everything needed to construct a [`Formalizer`].
#[derive(Debug, Clone)]
pub struct FormalizerConfig {
    /// HTTP settings for the generative backend
    pub client: ClientConfig,
    /// Model ids, in preference order
    pub models: Vec<String>,
    /// Decoding parameters for every attempt
    pub generation: GenerationOptions,
    /// When false, no model is loaded and every request is rule-based
    pub generator_enabled: bool,
}

impl Default for FormalizerConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            models: vec![PRIMARY_MODEL.to_string(), SECONDARY_MODEL.to_string()],
            generation: GenerationOptions::default(),
            generator_enabled: true,
        }
    }
}

impl FormalizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            client: ClientConfig::from_env(),
            models: std::env::var("FORMALIZER_MODELS")
                .ok()
                .map(|raw| parse_models(&raw))
                .filter(|models| !models.is_empty())
                .unwrap_or(defaults.models),
            generation: defaults.generation,
            generator_enabled: !std::env::var("FORMALIZER_DISABLE_GENERATOR")
                .map(|raw| parse_flag(&raw))
                .unwrap_or(false),
        }
    }

    pub fn with_client(mut self, client: ClientConfig) -> Self {
        self.client = client;
        self
    }

    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_generation(mut self, generation: GenerationOptions) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_generator_enabled(mut self, enabled: bool) -> Self {
        self.generator_enabled = enabled;
        self
    }

    /// Loader for the configured model chain.
    pub fn loader(&self) -> ModelLoader {
        ModelLoader::new(self.client.clone()).with_models(self.models.iter().cloned())
    }

    /// Validate, load a generator if enabled, and build the formalizer.
    pub async fn build(&self) -> Result<Formalizer> {
        self.generation.validate()?;

        let generator = if self.generator_enabled {
            self.loader().load().await
        } else {
            info!("Generative formalization disabled by configuration");
            None
        };

        Ok(Formalizer::new(generator).with_options(self.generation.clone()))
    }
}

fn parse_models(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
