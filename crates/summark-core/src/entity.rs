//! Entity-tagging collaborator and the abbreviation check built on it.
//!
//! The tagger is a remote service that may be down, slow, or unauthorized.
//! None of that is allowed to fail an evaluation: [`EntityMatcher::lookup`]
//! folds every failure into [`TaggingOutcome::Degraded`], and the
//! abbreviation rule then relies on the dotted-initials pattern alone.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::lexical::first_abbreviation_pattern;
use crate::model::RuleResult;

/// Trait for named-entity taggers.
#[async_trait]
pub trait EntityTagger: Send + Sync {
    /// Human-readable tagger name (e.g. "tner").
    fn name(&self) -> &str;

    /// Tag the full text and return entities in service order.
    async fn tag(&self, text: &str) -> anyhow::Result<Vec<Entity>>;
}

/// One entity returned by the tagger. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Tag such as `ABB_ORG` or `PERSON`.
    #[serde(rename = "type")]
    pub entity_type: String,
    /// The tagged span of the submission.
    pub text: String,
}

impl Entity {
    pub fn new(entity_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            text: text.into(),
        }
    }

    /// The abbreviation category of this entity, if it is one.
    pub fn abbreviation_tag(&self) -> Option<AbbreviationTag> {
        self.entity_type.parse().ok()
    }
}

/// Entity tags that mark an abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbbreviationTag {
    /// `ABB_DES`
    Descriptive,
    /// `ABB_TTL`
    Title,
    /// `ABB_ORG`
    Organization,
    /// `ABB_LOC`
    Location,
    /// `ABB`
    Generic,
}

impl fmt::Display for AbbreviationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            AbbreviationTag::Descriptive => "ABB_DES",
            AbbreviationTag::Title => "ABB_TTL",
            AbbreviationTag::Organization => "ABB_ORG",
            AbbreviationTag::Location => "ABB_LOC",
            AbbreviationTag::Generic => "ABB",
        };
        f.write_str(tag)
    }
}

impl FromStr for AbbreviationTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ABB_DES" => Ok(AbbreviationTag::Descriptive),
            "ABB_TTL" => Ok(AbbreviationTag::Title),
            "ABB_ORG" => Ok(AbbreviationTag::Organization),
            "ABB_LOC" => Ok(AbbreviationTag::Location),
            "ABB" => Ok(AbbreviationTag::Generic),
            other => Err(format!("not an abbreviation tag: {other}")),
        }
    }
}

/// What the tagger produced for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggingOutcome {
    /// The service answered.
    Tagged(Vec<Entity>),
    /// The service failed; the reason is kept for logs and callers.
    Degraded { reason: String },
}

impl TaggingOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, TaggingOutcome::Degraded { .. })
    }

    /// Abbreviation spans, in service order. Empty when degraded.
    pub fn abbreviations(&self) -> Vec<String> {
        match self {
            TaggingOutcome::Tagged(entities) => entities
                .iter()
                .filter(|e| e.abbreviation_tag().is_some())
                .map(|e| e.text.clone())
                .collect(),
            TaggingOutcome::Degraded { .. } => Vec::new(),
        }
    }
}

/// Wraps a tagger so that failures become a degraded outcome.
#[derive(Clone)]
pub struct EntityMatcher {
    tagger: Arc<dyn EntityTagger>,
}

impl EntityMatcher {
    pub fn new(tagger: Arc<dyn EntityTagger>) -> Self {
        Self { tagger }
    }

    pub async fn lookup(&self, text: &str) -> TaggingOutcome {
        match self.tagger.tag(text).await {
            Ok(entities) => {
                tracing::debug!(
                    tagger = self.tagger.name(),
                    entities = entities.len(),
                    "entity tagging succeeded"
                );
                TaggingOutcome::Tagged(entities)
            }
            Err(e) => {
                tracing::warn!(
                    tagger = self.tagger.name(),
                    "entity tagging unavailable, abbreviation check uses pattern only: {e:#}"
                );
                TaggingOutcome::Degraded {
                    reason: format!("{e:#}"),
                }
            }
        }
    }

    /// Pattern evidence first, then tagged abbreviations.
    pub async fn check_abbreviations(&self, submission: &str) -> RuleResult {
        let mut violated: Vec<String> = first_abbreviation_pattern(submission).into_iter().collect();
        violated.extend(self.lookup(submission).await.abbreviations());
        RuleResult::from_violations(violated)
    }
}
