//! Central evaluator.
//!
//! Runs every rule of the registry against one submission and reduces the
//! results to a verdict. Rules do not feed each other and there is no early
//! exit; the two collaborator-backed rules run concurrently.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use futures::future::join_all;

use crate::entity::{EntityMatcher, EntityTagger};
use crate::lexical::{check_examples, check_pronouns, check_title};
use crate::model::RuleResult;
use crate::report::VerdictReport;
use crate::rules::{Rule, RuleSet};
use crate::semantic::{Embedder, SemanticMatcher};
use crate::tokenize::Tokenizer;

/// Grades submissions against a fixed rule set.
///
/// Holds only immutable configuration and shared collaborators, so one
/// instance can serve concurrent evaluations.
#[derive(Clone)]
pub struct Evaluator {
    rules: RuleSet,
    semantic: SemanticMatcher,
    entities: EntityMatcher,
    tokenizer: Arc<dyn Tokenizer>,
}

impl Evaluator {
    pub fn new(
        rules: RuleSet,
        embedder: Arc<dyn Embedder>,
        tagger: Arc<dyn EntityTagger>,
        tokenizer: Arc<dyn Tokenizer>,
    ) -> Self {
        Self {
            rules,
            semantic: SemanticMatcher::new(embedder),
            entities: EntityMatcher::new(tagger),
            tokenizer,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Evaluate one submission.
    ///
    /// Fails only when the embedding backend fails; a failing entity tagger
    /// degrades the abbreviation rule instead.
    pub async fn evaluate(&self, submission: &str) -> Result<VerdictReport> {
        let start = Instant::now();

        let outcomes = join_all(self.rules.iter().map(|rule| async move {
            let result = self
                .run_rule(rule, submission)
                .await
                .with_context(|| format!("rule {} failed", rule.kind()));
            (rule.kind(), result)
        }))
        .await;

        let mut results = Vec::with_capacity(outcomes.len());
        for (kind, outcome) in outcomes {
            let result = outcome?;
            tracing::debug!(
                rule = %kind,
                valid = result.valid,
                evidence = result.violated_words.len(),
                "rule evaluated"
            );
            results.push((kind, result));
        }

        let report = VerdictReport::from_results(results);
        tracing::info!(
            score = report.score,
            failed = ?report.failed_rules(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "submission evaluated"
        );
        Ok(report)
    }

    async fn run_rule(&self, rule: &Rule, submission: &str) -> Result<RuleResult> {
        match rule {
            Rule::SummarySimilarity {
                reference_text,
                threshold,
            } => {
                self.semantic
                    .check(submission, reference_text, *threshold)
                    .await
            }
            Rule::NoExample { phrases } => Ok(check_examples(submission, phrases)),
            Rule::NoPronouns { pronouns } => Ok(check_pronouns(
                submission,
                pronouns,
                self.tokenizer.as_ref(),
            )),
            Rule::NoAbbreviations => Ok(self.entities.check_abbreviations(submission).await),
            Rule::NoTitle { forbidden_title } => Ok(check_title(submission, forbidden_title)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::corpus::{ReferenceCorpus, DEFAULT_FORBIDDEN_TITLE};
    use crate::entity::Entity;
    use crate::model::{RuleKind, SIMILARITY_MISMATCH_MESSAGE};
    use crate::tokenize::DictionaryTokenizer;

    /// Maps each text to `on_topic` when it contains `marker`, else `off_topic`.
    struct MarkerEmbedder {
        marker: &'static str,
        calls: AtomicU32,
    }

    impl MarkerEmbedder {
        fn new(marker: &'static str) -> Self {
            Self {
                marker,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl Embedder for MarkerEmbedder {
        fn name(&self) -> &str {
            "marker"
        }

        async fn encode(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(texts
                .iter()
                .map(|t| {
                    if t.contains(self.marker) {
                        vec![1.0, 0.0]
                    } else {
                        vec![0.0, 1.0]
                    }
                })
                .collect())
        }
    }

    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        fn name(&self) -> &str {
            "failing"
        }

        async fn encode(&self, _texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
            anyhow::bail!("model not loaded")
        }
    }

    enum TaggerMode {
        Entities(Vec<Entity>),
        Down,
    }

    struct StubTagger(TaggerMode);

    #[async_trait]
    impl EntityTagger for StubTagger {
        fn name(&self) -> &str {
            "stub"
        }

        async fn tag(&self, _text: &str) -> anyhow::Result<Vec<Entity>> {
            match &self.0 {
                TaggerMode::Entities(e) => Ok(e.clone()),
                TaggerMode::Down => anyhow::bail!("timed out"),
            }
        }
    }

    const MARKER: &str = "สื่อสังคม";

    fn corpus() -> ReferenceCorpus {
        ReferenceCorpus {
            reference_text: format!("{MARKER}เป็นช่องทางแพร่กระจายข่าวสาร"),
            example_phrases: vec!["ยกตัวอย่างเช่น".into(), "อาทิ".into()],
            pronouns: vec!["ผม".into(), "เขา".into()],
            ..Default::default()
        }
    }

    fn evaluator(embedder: Arc<dyn Embedder>, tagger: TaggerMode) -> Evaluator {
        let tokenizer = DictionaryTokenizer::new([MARKER, "ภูเขา", "เขา", "ผม", "คิดว่า"]);
        Evaluator::new(
            RuleSet::from_corpus(&corpus()),
            embedder,
            Arc::new(StubTagger(tagger)),
            Arc::new(tokenizer),
        )
    }

    #[tokio::test]
    async fn clean_submission_scores_one() {
        let eval = evaluator(Arc::new(MarkerEmbedder::new(MARKER)), TaggerMode::Entities(vec![]));
        let report = eval
            .evaluate("สื่อสังคมช่วยให้ข่าวสารกระจายได้รวดเร็ว")
            .await
            .unwrap();

        assert_eq!(report.score, 1);
        assert_eq!(report.details.len(), 5);
        assert!(report.details.values().all(|r| r.valid && r.violated_words.is_empty()));
    }

    #[tokio::test]
    async fn title_only_violation_fails_verdict() {
        let eval = evaluator(Arc::new(MarkerEmbedder::new(MARKER)), TaggerMode::Entities(vec![]));
        let submission = format!("{DEFAULT_FORBIDDEN_TITLE} {MARKER}ช่วยให้ข่าวสารกระจายได้รวดเร็ว");
        let report = eval.evaluate(&submission).await.unwrap();

        assert_eq!(report.score, 0);
        let title = report.get(RuleKind::NoTitle).unwrap();
        assert!(!title.valid);
        assert_eq!(title.violated_words, vec![DEFAULT_FORBIDDEN_TITLE]);
        assert_eq!(report.failed_rules(), vec![RuleKind::NoTitle]);
    }

    #[tokio::test]
    async fn all_rules_run_after_a_failure() {
        let eval = evaluator(
            Arc::new(MarkerEmbedder::new(MARKER)),
            TaggerMode::Entities(vec![Entity::new("ABB_ORG", "สสส.")]),
        );
        let report = eval
            .evaluate("ผมคิดว่าข่าว ยกตัวอย่างเช่น ก.พ. ไม่ใช่ภูเขา")
            .await
            .unwrap();

        assert_eq!(report.score, 0);
        assert_eq!(report.failed_rules(), RuleKind::ALL[..4].to_vec());
        assert_eq!(
            report.get(RuleKind::SummarySimilarity).unwrap().violated_words,
            vec![SIMILARITY_MISMATCH_MESSAGE]
        );
        assert_eq!(
            report.get(RuleKind::NoExample).unwrap().violated_words,
            vec!["ยกตัวอย่างเช่น"]
        );
        assert_eq!(
            report.get(RuleKind::NoPronouns).unwrap().violated_words,
            vec!["ผม"]
        );
        assert_eq!(
            report.get(RuleKind::NoAbbreviations).unwrap().violated_words,
            vec!["ก.พ.", "สสส."]
        );
    }

    #[tokio::test]
    async fn tagger_outage_does_not_abort() {
        let eval = evaluator(Arc::new(MarkerEmbedder::new(MARKER)), TaggerMode::Down);
        let report = eval
            .evaluate("สื่อสังคมช่วยให้ข่าวสารกระจาย ตั้งแต่ ม.ค.")
            .await
            .unwrap();

        let abbreviations = report.get(RuleKind::NoAbbreviations).unwrap();
        assert!(!abbreviations.valid);
        // "ม.ค." is two initials, caught by the pattern alone.
        assert_eq!(abbreviations.violated_words, vec!["ม.ค."]);
    }

    #[tokio::test]
    async fn embedding_failure_is_fatal() {
        let eval = evaluator(Arc::new(FailingEmbedder), TaggerMode::Entities(vec![]));
        let err = eval.evaluate("anything").await.unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("summary_similarity"), "{message}");
        assert!(message.contains("model not loaded"), "{message}");
    }

    #[tokio::test]
    async fn evaluation_is_idempotent() {
        let embedder = Arc::new(MarkerEmbedder::new(MARKER));
        let eval = evaluator(embedder.clone(), TaggerMode::Entities(vec![]));
        let submission = "เขาว่าสื่อสังคมดี";

        let first = eval.evaluate(submission).await.unwrap();
        let second = eval.evaluate(submission).await.unwrap();
        assert_eq!(
            first.to_json_pretty().unwrap(),
            second.to_json_pretty().unwrap()
        );
        // One batched encode call per evaluation.
        assert_eq!(embedder.calls.load(Ordering::Relaxed), 2);
    }
}
