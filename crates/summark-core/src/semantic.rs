//! Embedding collaborator and the summary-similarity check.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::model::RuleResult;

/// Trait for sentence-embedding backends.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Human-readable backend name (e.g. "ollama").
    fn name(&self) -> &str;

    /// Encode each text into a dense vector. Output order matches input order
    /// and every vector has the same length.
    async fn encode(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}

/// Cosine similarity of two vectors.
///
/// A zero vector has no direction; its similarity to anything is 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64> {
    anyhow::ensure!(
        a.len() == b.len(),
        "embedding dimensions differ: {} vs {}",
        a.len(),
        b.len()
    );

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// Compares a submission with the reference passage in embedding space.
#[derive(Clone)]
pub struct SemanticMatcher {
    embedder: Arc<dyn Embedder>,
}

impl SemanticMatcher {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Encode both texts in one batch (submission first) and compare them.
    pub async fn similarity(&self, submission: &str, reference: &str) -> Result<f64> {
        let texts = [submission.to_string(), reference.to_string()];
        let vectors = self
            .embedder
            .encode(&texts)
            .await
            .with_context(|| format!("embedding with {} failed", self.embedder.name()))?;

        let [submission_vec, reference_vec] = vectors.as_slice() else {
            anyhow::bail!(
                "embedder {} returned {} vectors for 2 inputs",
                self.embedder.name(),
                vectors.len()
            );
        };
        cosine_similarity(submission_vec, reference_vec)
    }

    /// Pass iff similarity reaches the threshold. The score is logged, not
    /// reported.
    pub async fn check(&self, submission: &str, reference: &str, threshold: f64) -> Result<RuleResult> {
        let similarity = self.similarity(submission, reference).await?;
        tracing::debug!(similarity, threshold, "summary similarity computed");
        Ok(RuleResult::similarity(similarity >= threshold))
    }
}
