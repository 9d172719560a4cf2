//! Generation request, option and candidate types.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Decoding parameters sent with every generation call.
///
/// Sampling and beam search are independent knobs; the defaults enable both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Maximum output length (tokens)
    pub max_output_length: u32,
    /// Sequences returned per call
    pub sample_count: u32,
    /// Sampling temperature
    pub temperature: f64,
    /// Enable stochastic sampling
    pub do_sample: bool,
    /// Penalty applied to repeated tokens
    pub repetition_penalty: f64,
    /// Beam search width
    pub beam_width: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_output_length: 128,
            sample_count: 1,
            temperature: 0.7,
            do_sample: true,
            repetition_penalty: 2.0,
            beam_width: 5,
        }
    }
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_output_length(mut self, max_output_length: u32) -> Self {
        self.max_output_length = max_output_length;
        self
    }

    pub fn with_sample_count(mut self, sample_count: u32) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_sampling(mut self, do_sample: bool) -> Self {
        self.do_sample = do_sample;
        self
    }

    pub fn with_repetition_penalty(mut self, repetition_penalty: f64) -> Self {
        self.repetition_penalty = repetition_penalty;
        self
    }

    pub fn with_beam_width(mut self, beam_width: u32) -> Self {
        self.beam_width = beam_width;
        self
    }

    /// Reject values no backend can honor.
    pub fn validate(&self) -> Result<()> {
        if self.max_output_length == 0 {
            return Err(Error::Config("max_output_length must be positive".to_string()));
        }
        if self.sample_count == 0 {
            return Err(Error::Config("sample_count must be positive".to_string()));
        }
        if self.beam_width == 0 {
            return Err(Error::Config("beam_width must be positive".to_string()));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(Error::Config(format!(
                "temperature must be a non-negative number, got {}",
                self.temperature
            )));
        }
        if !self.repetition_penalty.is_finite() || self.repetition_penalty <= 0.0 {
            return Err(Error::Config(format!(
                "repetition_penalty must be positive, got {}",
                self.repetition_penalty
            )));
        }
        Ok(())
    }
}

/// A single prompt sent to a generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub options: GenerationOptions,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            options: GenerationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }
}

/// Text produced by one generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
}

impl Candidate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<String> for Candidate {
    fn from(text: String) -> Self {
        Self { text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = GenerationOptions::default();
        assert_eq!(options.max_output_length, 128);
        assert_eq!(options.sample_count, 1);
        assert_eq!(options.temperature, 0.7);
        assert!(options.do_sample);
        assert_eq!(options.repetition_penalty, 2.0);
        assert_eq!(options.beam_width, 5);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_options_builder() {
        let options = GenerationOptions::new()
            .with_max_output_length(64)
            .with_sample_count(3)
            .with_temperature(0.2)
            .with_sampling(false)
            .with_repetition_penalty(1.3)
            .with_beam_width(1);

        assert_eq!(options.max_output_length, 64);
        assert_eq!(options.sample_count, 3);
        assert_eq!(options.temperature, 0.2);
        assert!(!options.do_sample);
        assert_eq!(options.repetition_penalty, 1.3);
        assert_eq!(options.beam_width, 1);
    }

    #[test]
    fn test_options_validation() {
        assert!(GenerationOptions::new().with_beam_width(0).validate().is_err());
        assert!(GenerationOptions::new().with_max_output_length(0).validate().is_err());
        assert!(GenerationOptions::new().with_sample_count(0).validate().is_err());
        assert!(GenerationOptions::new().with_temperature(-0.1).validate().is_err());
        assert!(GenerationOptions::new().with_temperature(f64::NAN).validate().is_err());
        assert!(GenerationOptions::new().with_repetition_penalty(0.0).validate().is_err());
        assert!(GenerationOptions::new().with_temperature(0.0).validate().is_ok());
    }

    #[test]
    fn test_options_partial_deserialize() {
        let options: GenerationOptions =
            serde_json::from_str(r#"{"beam_width": 3, "do_sample": false}"#).unwrap();
        assert_eq!(options.beam_width, 3);
        assert!(!options.do_sample);
        assert_eq!(options.max_output_length, 128);
    }

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new("rewrite: hi")
            .with_options(GenerationOptions::new().with_beam_width(2));
        assert_eq!(request.prompt, "rewrite: hi");
        assert_eq!(request.options.beam_width, 2);
    }
}
