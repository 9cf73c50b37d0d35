//! summark-providers — Collaborator integrations.
//!
//! Implements the `Embedder` trait for OpenAI-compatible and Ollama embedding
//! APIs and the `EntityTagger` trait for the AI for Thai TNER service, plus
//! the configuration file that selects between them.

pub mod config;
pub mod error;
pub mod mock;
pub mod ollama;
pub mod openai;
pub mod tner;

pub use config::{create_embedder, create_tagger, load_config, EmbedderConfig, SummarkConfig, TaggerConfig};
pub use error::ProviderError;
