//! Word segmentation for scripts that do not delimit words with spaces.
//!
//! Pronoun detection works on whole words, so the submission has to be
//! segmented first. Thai writes words back to back; splitting on whitespace
//! would leave whole phrases as single tokens.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use icu_segmenter::WordSegmenter;
use serde::{Deserialize, Serialize};

use crate::corpus::read_word_list;

/// Splits text into words.
pub trait Tokenizer: Send + Sync {
    /// Short name for logs (e.g. "unicode").
    fn name(&self) -> &str;

    /// Segment `text` into words, in order. Whitespace and punctuation-only
    /// segments are not returned.
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Segmentation backed by ICU word-break rules, with dictionary/LSTM models
/// for Thai, Lao, Khmer, Burmese, Chinese and Japanese.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeWordTokenizer;

impl Tokenizer for UnicodeWordTokenizer {
    fn name(&self) -> &str {
        "unicode"
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        // The segmenter borrows compiled-in data; building it is cheap and
        // keeps this type Send + Sync.
        let segmenter = WordSegmenter::new_auto();
        let mut tokens = Vec::new();
        let mut start = 0;
        for end in segmenter.segment_str(text) {
            let segment = &text[start..end];
            if segment.chars().any(char::is_alphanumeric) {
                tokens.push(segment.to_string());
            }
            start = end;
        }
        tokens
    }
}

/// Maximal-matching segmentation against a fixed vocabulary.
///
/// At each position the longest vocabulary word wins. Characters that start
/// no known word are grouped into a run that ends at the next known word or
/// separator.
#[derive(Debug, Clone)]
pub struct DictionaryTokenizer {
    words: HashSet<String>,
    max_word_chars: usize,
}

impl DictionaryTokenizer {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: HashSet<String> = words
            .into_iter()
            .map(Into::into)
            .filter(|w: &String| !w.is_empty())
            .collect();
        let max_word_chars = words.iter().map(|w| w.chars().count()).max().unwrap_or(0);
        Self {
            words,
            max_word_chars,
        }
    }

    /// Load the vocabulary from a file with one word per line.
    pub fn from_file(path: &Path) -> Result<Self> {
        let words = read_word_list(path)
            .with_context(|| format!("failed to load tokenizer dictionary: {}", path.display()))?;
        Ok(Self::new(words))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn longest_match(&self, chars: &[char], start: usize) -> Option<usize> {
        let limit = chars.len().min(start + self.max_word_chars);
        (start + 1..=limit).rev().find(|&end| {
            let candidate: String = chars[start..end].iter().collect();
            self.words.contains(&candidate)
        })
    }
}

impl Tokenizer for DictionaryTokenizer {
    fn name(&self) -> &str {
        "dictionary"
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut unknown_start: Option<usize> = None;
        let mut i = 0;

        let flush = |tokens: &mut Vec<String>, from: Option<usize>, to: usize| {
            if let Some(from) = from {
                tokens.push(chars[from..to].iter().collect());
            }
        };

        while i < chars.len() {
            if let Some(end) = self.longest_match(&chars, i) {
                flush(&mut tokens, unknown_start.take(), i);
                tokens.push(chars[i..end].iter().collect());
                i = end;
            } else if is_separator(chars[i]) {
                flush(&mut tokens, unknown_start.take(), i);
                i += 1;
            } else {
                unknown_start.get_or_insert(i);
                i += 1;
            }
        }
        flush(&mut tokens, unknown_start, chars.len());

        tokens
    }
}

// Thai tone marks are not alphabetic, so "not alphanumeric" would split
// words apart; only whitespace and punctuation separate.
fn is_separator(c: char) -> bool {
    c.is_whitespace()
        || c.is_control()
        || c.is_ascii_punctuation()
        || matches!(c, '“' | '”' | '‘' | '’' | '…' | '–' | '—' | '«' | '»')
}

/// Which tokenizer to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    #[default]
    Unicode,
    Dictionary,
}

/// Tokenizer section of the collaborator config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenizerConfig {
    #[serde(default)]
    pub kind: TokenizerKind,
    /// Vocabulary for the dictionary tokenizer, one word per line.
    #[serde(default)]
    pub dictionary_file: Option<PathBuf>,
}

/// Build a tokenizer from its configuration.
pub fn create_tokenizer(config: &TokenizerConfig) -> Result<Arc<dyn Tokenizer>> {
    match config.kind {
        TokenizerKind::Unicode => Ok(Arc::new(UnicodeWordTokenizer)),
        TokenizerKind::Dictionary => {
            let Some(path) = &config.dictionary_file else {
                anyhow::bail!("dictionary tokenizer requires `dictionary_file`");
            };
            let tokenizer = DictionaryTokenizer::from_file(path)?;
            if tokenizer.is_empty() {
                tracing::warn!("tokenizer dictionary {} is empty", path.display());
            }
            Ok(Arc::new(tokenizer))
        }
    }
}
