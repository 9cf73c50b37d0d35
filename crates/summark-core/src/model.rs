//! Core data model types for summark.
//!
//! A rule check always produces a [`RuleResult`]; the evaluator collects one
//! per [`RuleKind`] into a verdict.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Evidence reported when the submission does not summarize the reference.
///
/// Thai for "the text does not capture the gist of the reference article".
pub const SIMILARITY_MISMATCH_MESSAGE: &str = "ข้อความไม่สรุปใจความตรงกับบทความอ้างอิง";

/// The closed set of rubric rules.
///
/// Variant order is registry order; `Ord` follows it so ordered maps keyed by
/// `RuleKind` list rules the way the registry runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    SummarySimilarity,
    NoExample,
    NoPronouns,
    NoAbbreviations,
    NoTitle,
}

impl RuleKind {
    /// All rules, in registry order.
    pub const ALL: [RuleKind; 5] = [
        RuleKind::SummarySimilarity,
        RuleKind::NoExample,
        RuleKind::NoPronouns,
        RuleKind::NoAbbreviations,
        RuleKind::NoTitle,
    ];

    /// Stable identifier used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::SummarySimilarity => "summary_similarity",
            RuleKind::NoExample => "no_example",
            RuleKind::NoPronouns => "no_pronouns",
            RuleKind::NoAbbreviations => "no_abbreviations",
            RuleKind::NoTitle => "no_title",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown rule: {s}"))
    }
}

/// Outcome of a single rule check.
///
/// For every rule except summary similarity, `valid` is exactly
/// `violated_words.is_empty()`. Similarity carries its own thresholded flag
/// and at most one sentinel message; use [`RuleResult::similarity`] for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    /// Whether the submission satisfies the rule.
    pub valid: bool,
    /// Offending phrases, pronouns, abbreviations, or the similarity message.
    pub violated_words: Vec<String>,
}

impl RuleResult {
    /// Result of an evidence-list rule: valid iff nothing was found.
    pub fn from_violations(violated_words: Vec<String>) -> Self {
        Self {
            valid: violated_words.is_empty(),
            violated_words,
        }
    }

    /// Result of the similarity rule. The score itself is not surfaced.
    pub fn similarity(passed: bool) -> Self {
        let violated_words = if passed {
            Vec::new()
        } else {
            vec![SIMILARITY_MISMATCH_MESSAGE.to_string()]
        };
        Self {
            valid: passed,
            violated_words,
        }
    }

    /// A passing result with no evidence.
    pub fn pass() -> Self {
        Self::from_violations(Vec::new())
    }
}
