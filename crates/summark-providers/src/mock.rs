//! Mock collaborators for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use summark_core::entity::{Entity, EntityTagger};
use summark_core::semantic::Embedder;

/// A mock embedder for exercising the evaluator without a model.
///
/// Each text gets the vector of the first rule whose key it contains, or the
/// default vector.
pub struct MockEmbedder {
    /// Ordered (substring, vector) rules.
    rules: Vec<(String, Vec<f32>)>,
    /// Vector for texts that match no rule.
    default_vector: Vec<f32>,
    /// Number of encode calls made.
    call_count: AtomicU32,
    /// Texts of the last encode call.
    last_texts: Mutex<Vec<String>>,
}

impl MockEmbedder {
    pub fn new(rules: Vec<(String, Vec<f32>)>, default_vector: Vec<f32>) -> Self {
        Self {
            rules,
            default_vector,
            call_count: AtomicU32::new(0),
            last_texts: Mutex::new(Vec::new()),
        }
    }

    /// An embedder that maps every text to the same vector (similarity 1.0).
    pub fn constant() -> Self {
        Self::new(Vec::new(), vec![1.0, 0.0, 0.0])
    }

    /// Texts containing `marker` point one way, everything else is orthogonal.
    pub fn on_topic(marker: &str) -> Self {
        Self::new(
            vec![(marker.to_string(), vec![1.0, 0.0, 0.0])],
            vec![0.0, 1.0, 0.0],
        )
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_texts(&self) -> Vec<String> {
        self.last_texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn encode(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_texts.lock().unwrap() = texts.to_vec();

        Ok(texts
            .iter()
            .map(|text| {
                self.rules
                    .iter()
                    .find(|(key, _)| text.contains(key.as_str()))
                    .map(|(_, v)| v.clone())
                    .unwrap_or_else(|| self.default_vector.clone())
            })
            .collect())
    }
}

/// A mock entity tagger that returns a fixed entity list or always fails.
pub struct MockTagger {
    entities: Vec<Entity>,
    failure: Option<String>,
    call_count: AtomicU32,
}

impl MockTagger {
    pub fn with_entities(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            failure: None,
            call_count: AtomicU32::new(0),
        }
    }

    /// A tagger whose every call fails with `message`.
    pub fn unavailable(message: &str) -> Self {
        Self {
            entities: Vec::new(),
            failure: Some(message.to_string()),
            call_count: AtomicU32::new(0),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl EntityTagger for MockTagger {
    fn name(&self) -> &str {
        "mock"
    }

    async fn tag(&self, _text: &str) -> anyhow::Result<Vec<Entity>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        match &self.failure {
            Some(message) => anyhow::bail!("{message}"),
            None => Ok(self.entities.clone()),
        }
    }
}
