//! Generative backend abstraction.
//!
//! This module provides the [`TextGenerator`] trait consumed by the selection
//! policy, an HTTP client for Hugging Face Inference API compatible text2text
//! endpoints, and a loader that picks the first available model once at
//! startup.
//!
//! ## Example
//!
//! ```rust,ignore
//! use formalizer::llm::{ClientConfig, GenerationRequest, ModelLoader};
//!
//! let loader = ModelLoader::new(ClientConfig::from_env());
//! if let Some(generator) = loader.load().await {
//!     let candidate = generator
//!         .generate(GenerationRequest::new("rewrite this as a professional email: hey"))
//!         .await?;
//!     println!("{}", candidate.text);
//! }
//! ```

mod client;
mod loader;
mod types;

pub use client::{ClientConfig, HuggingFaceClient, TextGenerator};
pub use loader::{first_available, ModelLoader, PRIMARY_MODEL, SECONDARY_MODEL};
pub use types::{Candidate, GenerationOptions, GenerationRequest};
