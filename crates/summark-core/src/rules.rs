//! The rule registry.
//!
//! Each rule is an enum variant carrying the arguments bound to it at
//! configuration time, so dispatch is a `match` rather than a lookup by name.

use crate::corpus::ReferenceCorpus;
use crate::model::RuleKind;

/// One rubric rule with its bound arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// The submission must stay close to the reference passage.
    SummarySimilarity { reference_text: String, threshold: f64 },
    /// No example phrase may appear verbatim.
    NoExample { phrases: Vec<String> },
    /// No personal pronoun may appear as a word.
    NoPronouns { pronouns: Vec<String> },
    /// No dotted-initials pattern and no tagged abbreviation.
    NoAbbreviations,
    /// The exercise title must not be copied.
    NoTitle { forbidden_title: String },
}

impl Rule {
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::SummarySimilarity { .. } => RuleKind::SummarySimilarity,
            Rule::NoExample { .. } => RuleKind::NoExample,
            Rule::NoPronouns { .. } => RuleKind::NoPronouns,
            Rule::NoAbbreviations => RuleKind::NoAbbreviations,
            Rule::NoTitle { .. } => RuleKind::NoTitle,
        }
    }
}

/// Ordered, immutable collection of rules.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// The full rubric, bound to the corpus, in registry order.
    pub fn from_corpus(corpus: &ReferenceCorpus) -> Self {
        Self {
            rules: vec![
                Rule::SummarySimilarity {
                    reference_text: corpus.reference_text.clone(),
                    threshold: corpus.similarity_threshold,
                },
                Rule::NoExample {
                    phrases: corpus.example_phrases.clone(),
                },
                Rule::NoPronouns {
                    pronouns: corpus.pronouns.clone(),
                },
                Rule::NoAbbreviations,
                Rule::NoTitle {
                    forbidden_title: corpus.forbidden_title.clone(),
                },
            ],
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn kinds(&self) -> Vec<RuleKind> {
        self.rules.iter().map(Rule::kind).collect()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
