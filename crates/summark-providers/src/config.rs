//! Collaborator configuration and factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use summark_core::entity::EntityTagger;
use summark_core::semantic::Embedder;
use summark_core::tokenize::TokenizerConfig;

use crate::ollama::OllamaEmbedder;
use crate::openai::OpenAiEmbedder;
use crate::tner::{TnerClient, DEFAULT_TIMEOUT_SECS};

/// Which embedding backend to use.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EmbedderConfig {
    OpenAI {
        api_key: String,
        #[serde(default = "default_openai_model")]
        model: String,
        #[serde(default)]
        base_url: Option<String>,
    },
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
        #[serde(default = "default_ollama_model")]
        model: String,
    },
}

impl std::fmt::Debug for EmbedderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbedderConfig::OpenAI {
                api_key: _,
                model,
                base_url,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("model", model)
                .field("base_url", base_url)
                .finish(),
            EmbedderConfig::Ollama { base_url, model } => f
                .debug_struct("Ollama")
                .field("base_url", base_url)
                .field("model", model)
                .finish(),
        }
    }
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        EmbedderConfig::Ollama {
            base_url: default_ollama_url(),
            model: default_ollama_model(),
        }
    }
}

fn default_openai_model() -> String {
    crate::openai::DEFAULT_MODEL.to_string()
}
fn default_ollama_url() -> String {
    crate::ollama::DEFAULT_BASE_URL.to_string()
}
fn default_ollama_model() -> String {
    crate::ollama::DEFAULT_MODEL.to_string()
}

/// Entity-tagging service settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct TaggerConfig {
    /// TNER credential. Empty means every tagging call degrades.
    #[serde(default)]
    pub api_key: String,
    /// Endpoint override.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_tagger_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for TaggerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaggerConfig")
            .field("api_key", &"***")
            .field("url", &self.url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            url: None,
            timeout_secs: default_tagger_timeout(),
        }
    }
}

fn default_tagger_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Top-level summark configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarkConfig {
    #[serde(default)]
    pub embedder: EmbedderConfig,
    #[serde(default)]
    pub tagger: TaggerConfig,
    #[serde(default)]
    pub tokenizer: TokenizerConfig,
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_embedder_config(config: &EmbedderConfig) -> EmbedderConfig {
    match config {
        EmbedderConfig::OpenAI {
            api_key,
            model,
            base_url,
        } => EmbedderConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            model: resolve_env_vars(model),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
        },
        EmbedderConfig::Ollama { base_url, model } => EmbedderConfig::Ollama {
            base_url: resolve_env_vars(base_url),
            model: resolve_env_vars(model),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `summark.toml` in the current directory
/// 2. `~/.config/summark/config.toml`
///
/// Environment variable overrides: `SUMMARK_TNER_KEY`, `SUMMARK_OPENAI_KEY`.
pub fn load_config() -> Result<SummarkConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<SummarkConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("summark.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<SummarkConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => SummarkConfig::default(),
    };

    // Apply env var overrides
    if let Ok(key) = std::env::var("SUMMARK_TNER_KEY") {
        config.tagger.api_key = key;
    }
    if let Ok(key) = std::env::var("SUMMARK_OPENAI_KEY") {
        if let EmbedderConfig::OpenAI { api_key, .. } = &mut config.embedder {
            *api_key = key;
        }
    }

    config.embedder = resolve_embedder_config(&config.embedder);
    config.tagger.api_key = resolve_env_vars(&config.tagger.api_key);
    config.tagger.url = config.tagger.url.as_deref().map(resolve_env_vars);

    // A relative dictionary path is relative to the config file.
    if let (Some(config_path), Some(dict)) = (&config_path, &config.tokenizer.dictionary_file) {
        if dict.is_relative() {
            let base = config_path.parent().unwrap_or_else(|| Path::new("."));
            config.tokenizer.dictionary_file = Some(base.join(dict));
        }
    }

    if config.tagger.api_key.is_empty() {
        tracing::warn!("no TNER API key configured; abbreviation check will use the pattern only");
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("summark"))
}

/// Create an embedder from its configuration.
pub fn create_embedder(config: &EmbedderConfig) -> Result<Arc<dyn Embedder>> {
    match config {
        EmbedderConfig::OpenAI {
            api_key,
            model,
            base_url,
        } => Ok(Arc::new(OpenAiEmbedder::new(api_key, model, base_url.clone())?)),
        EmbedderConfig::Ollama { base_url, model } => {
            Ok(Arc::new(OllamaEmbedder::new(base_url, model)?))
        }
    }
}

/// Create the entity tagger from its configuration.
pub fn create_tagger(config: &TaggerConfig) -> Result<Arc<dyn EntityTagger>> {
    Ok(Arc::new(TnerClient::new(
        &config.api_key,
        config.url.clone(),
        Some(config.timeout_secs),
    )?))
}
