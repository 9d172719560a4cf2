//! One-shot generator construction with a model fallback chain.
//!
//! The loader runs once at startup. It walks an ordered list of model ids,
//! returns the first backend that constructs and passes its health check, and
//! never retries afterwards. Failing every model yields no generator, which
//! the selection policy treats as "always use the rule-based path".

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

use super::client::{ClientConfig, HuggingFaceClient, TextGenerator};

/// Paraphrasing model tried first.
pub const PRIMARY_MODEL: &str = "humarin/chatgpt_paraphraser_on_T5_base";

/// General text2text model tried when the primary is unavailable.
pub const SECONDARY_MODEL: &str = "t5-base";

/// Builds the shared generator handle.
#[derive(Debug, Clone)]
pub struct ModelLoader {
    client: ClientConfig,
    models: Vec<String>,
}

impl ModelLoader {
    pub fn new(client: ClientConfig) -> Self {
        Self {
            client,
            models: vec![PRIMARY_MODEL.to_string(), SECONDARY_MODEL.to_string()],
        }
    }

    /// Replace the model chain. Order is preference order.
    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Load the first available model.
    pub async fn try_load(&self) -> Result<Arc<dyn TextGenerator>> {
        let candidates = self.models.iter().map(|model| {
            HuggingFaceClient::new(model.as_str(), self.client.clone())
                .map(|client| Arc::new(client) as Arc<dyn TextGenerator>)
        });

        first_available(candidates).await
    }

    /// Load the first available model, or `None` when every model fails.
    pub async fn load(&self) -> Option<Arc<dyn TextGenerator>> {
        match self.try_load().await {
            Ok(generator) => Some(generator),
            Err(e) => {
                warn!("{}; falling back to rule-based formalization", e);
                None
            }
        }
    }
}

/// Return the first generator that constructs and passes its health check.
///
/// Construction is lazy: later entries are only built if earlier ones fail.
pub async fn first_available<I>(candidates: I) -> Result<Arc<dyn TextGenerator>>
where
    I: IntoIterator<Item = Result<Arc<dyn TextGenerator>>>,
{
    let mut failures = Vec::new();

    for candidate in candidates {
        let generator = match candidate {
            Ok(generator) => generator,
            Err(e) => {
                debug!("Generator construction failed: {}", e);
                failures.push(e.to_string());
                continue;
            }
        };

        match generator.health_check().await {
            Ok(()) => {
                info!("Loaded generative model {}", generator.model());
                return Ok(generator);
            }
            Err(e) => {
                warn!("Model {} unavailable: {}", generator.model(), e);
                failures.push(e.to_string());
            }
        }
    }

    if failures.is_empty() {
        return Err(Error::generator_unavailable("no models configured"));
    }
    Err(Error::generator_unavailable(failures.join("; ")))
}
