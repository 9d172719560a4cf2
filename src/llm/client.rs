//! Text generator trait and the Hugging Face inference client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

use crate::error::{Error, Result};

use super::types::{Candidate, GenerationOptions, GenerationRequest};

/// A text-to-text generation backend.
///
/// Calls may be slow and may fail; callers treat every error as a skipped
/// attempt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a candidate for one prompt.
    async fn generate(&self, request: GenerationRequest) -> Result<Candidate>;

    /// Identifier of the model behind this generator.
    fn model(&self) -> &str;

    /// Check that the backend can serve requests.
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

/// Configuration for HTTP generator clients.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer token, if the endpoint requires one
    pub api_token: Option<String>,
    /// Base URL override
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: None,
            timeout_secs: 120,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            api_token: std::env::var("FORMALIZER_API_TOKEN")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            base_url: std::env::var("FORMALIZER_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            timeout_secs: std::env::var("FORMALIZER_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(120),
        }
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

fn build_http_client(timeout_secs: u64) -> Result<Client> {
    let timeout = Duration::from_secs(timeout_secs);

    // Proxy auto-detection can panic in some sandboxed environments.
    // Retry without proxy support in that case.
    match catch_unwind(AssertUnwindSafe(|| {
        Client::builder().timeout(timeout).build()
    })) {
        Ok(Ok(client)) => Ok(client),
        Ok(Err(_)) | Err(_) => Client::builder()
            .no_proxy()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::generator_unavailable(format!("Failed to create HTTP client: {}", e))
            }),
    }
}

/// Client for a Hugging Face Inference API compatible text2text endpoint.
pub struct HuggingFaceClient {
    config: ClientConfig,
    model: String,
    http: Client,
}

impl HuggingFaceClient {
    const DEFAULT_BASE_URL: &'static str = "https://api-inference.huggingface.co";

    pub fn new(model: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let http = build_http_client(config.timeout_secs)?;

        Ok(Self {
            config,
            model: model.into(),
            http,
        })
    }

    fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or(Self::DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    fn model_url(&self) -> String {
        format!("{}/models/{}", self.base_url(), self.model)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    fn api_error(&self, status: reqwest::StatusCode, body: &str) -> Error {
        if let Ok(error) = serde_json::from_str::<HfError>(body) {
            return Error::generation(
                &self.model,
                format!("Inference API error ({}): {}", status, error.error),
            );
        }
        Error::generation(&self.model, format!("Inference API error ({}): {}", status, body))
    }
}

// Inference API types
#[derive(Debug, Serialize)]
struct HfRequest<'a> {
    inputs: &'a str,
    parameters: HfParameters,
    options: HfOptions,
}

#[derive(Debug, Serialize)]
struct HfParameters {
    max_length: u32,
    num_return_sequences: u32,
    temperature: f64,
    do_sample: bool,
    repetition_penalty: f64,
    num_beams: u32,
}

impl From<&GenerationOptions> for HfParameters {
    fn from(options: &GenerationOptions) -> Self {
        Self {
            max_length: options.max_output_length,
            num_return_sequences: options.sample_count,
            temperature: options.temperature,
            do_sample: options.do_sample,
            repetition_penalty: options.repetition_penalty,
            num_beams: options.beam_width,
        }
    }
}

#[derive(Debug, Serialize)]
struct HfOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HfResponse {
    Many(Vec<HfGeneration>),
    One(HfGeneration),
}

impl HfResponse {
    fn into_first(self) -> Option<String> {
        match self {
            Self::Many(generations) => generations.into_iter().next().map(|g| g.generated_text),
            Self::One(generation) => Some(generation.generated_text),
        }
    }
}

#[derive(Debug, Deserialize)]
struct HfGeneration {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
struct HfError {
    error: String,
}

#[async_trait]
impl TextGenerator for HuggingFaceClient {
    async fn generate(&self, request: GenerationRequest) -> Result<Candidate> {
        let api_request = HfRequest {
            inputs: &request.prompt,
            parameters: HfParameters::from(&request.options),
            options: HfOptions {
                wait_for_model: true,
            },
        };

        let response = self
            .authorize(self.http.post(self.model_url()))
            .header("content-type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| Error::generation(&self.model, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            Error::generation(&self.model, format!("Failed to read response: {}", e))
        })?;

        if !status.is_success() {
            return Err(self.api_error(status, &body));
        }

        let api_response: HfResponse = serde_json::from_str(&body).map_err(|e| {
            Error::generation(&self.model, format!("Failed to parse response: {}", e))
        })?;

        api_response
            .into_first()
            .map(Candidate::from)
            .ok_or_else(|| Error::generation(&self.model, "No generations in response"))
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn health_check(&self) -> Result<()> {
        let response = self
            .authorize(self.http.get(self.model_url()))
            .send()
            .await
            .map_err(|e| Error::generation(&self.model, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(self.api_error(status, &body))
    }
}
