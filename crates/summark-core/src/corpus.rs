//! TOML rubric loader.
//!
//! Loads the reference corpus (reference passage, forbidden phrases, pronoun
//! lists, forbidden title, similarity threshold) from a rubric file and
//! validates it for common issues.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Title the submission must not repeat.
pub const DEFAULT_FORBIDDEN_TITLE: &str = "การใช้สื่อสังคมออนไลน์";

/// Minimum cosine similarity between submission and reference.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Static grading inputs, read-only once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCorpus {
    /// The passage students are asked to summarize.
    pub reference_text: String,
    /// Example phrases that must not appear verbatim.
    pub example_phrases: Vec<String>,
    /// Personal pronouns that must not appear as words.
    pub pronouns: Vec<String>,
    /// The exercise title, which must not be copied into the answer.
    pub forbidden_title: String,
    /// Similarity threshold for the summary rule.
    pub similarity_threshold: f64,
}

impl Default for ReferenceCorpus {
    fn default() -> Self {
        Self {
            reference_text: String::new(),
            example_phrases: Vec::new(),
            pronouns: Vec::new(),
            forbidden_title: DEFAULT_FORBIDDEN_TITLE.to_string(),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

/// Intermediate TOML structure for parsing rubric files.
#[derive(Debug, Deserialize)]
struct TomlRubricFile {
    rubric: TomlRubricHeader,
    #[serde(default)]
    examples: TomlWordList,
    #[serde(default)]
    pronouns: TomlPronouns,
}

#[derive(Debug, Deserialize)]
struct TomlRubricHeader {
    #[serde(default)]
    reference_text: String,
    #[serde(default)]
    reference_file: Option<PathBuf>,
    #[serde(default = "default_title")]
    forbidden_title: String,
    #[serde(default = "default_threshold")]
    similarity_threshold: f64,
}

fn default_title() -> String {
    DEFAULT_FORBIDDEN_TITLE.to_string()
}

fn default_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

#[derive(Debug, Default, Deserialize)]
struct TomlWordList {
    #[serde(default)]
    phrases: Vec<String>,
    #[serde(default)]
    file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct TomlPronouns {
    #[serde(default)]
    primary: Vec<String>,
    #[serde(default)]
    primary_file: Option<PathBuf>,
    #[serde(default)]
    secondary: Vec<String>,
    #[serde(default)]
    secondary_file: Option<PathBuf>,
}

/// Parse a rubric TOML file into a `ReferenceCorpus`.
///
/// Word-list and reference files named inside the rubric are resolved
/// relative to the rubric's own directory.
pub fn parse_rubric(path: &Path) -> Result<ReferenceCorpus> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read rubric file: {}", path.display()))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    parse_rubric_str(&content, base_dir)
        .with_context(|| format!("invalid rubric: {}", path.display()))
}

/// Parse a rubric TOML string (useful for testing).
pub fn parse_rubric_str(content: &str, base_dir: &Path) -> Result<ReferenceCorpus> {
    let parsed: TomlRubricFile = toml::from_str(content).context("failed to parse rubric TOML")?;

    let reference_text = match &parsed.rubric.reference_file {
        Some(file) => {
            let path = base_dir.join(file);
            std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read reference text: {}", path.display()))?
        }
        None => parsed.rubric.reference_text,
    };

    let example_phrases = merge_word_list(
        parsed.examples.phrases,
        parsed.examples.file.as_deref(),
        base_dir,
    )?;

    // Two source lists, concatenated in order; duplicates are harmless.
    let mut pronouns = merge_word_list(
        parsed.pronouns.primary,
        parsed.pronouns.primary_file.as_deref(),
        base_dir,
    )?;
    pronouns.extend(merge_word_list(
        parsed.pronouns.secondary,
        parsed.pronouns.secondary_file.as_deref(),
        base_dir,
    )?);

    Ok(ReferenceCorpus {
        reference_text,
        example_phrases,
        pronouns,
        forbidden_title: parsed.rubric.forbidden_title,
        similarity_threshold: parsed.rubric.similarity_threshold,
    })
}

fn merge_word_list(
    mut inline: Vec<String>,
    file: Option<&Path>,
    base_dir: &Path,
) -> Result<Vec<String>> {
    if let Some(file) = file {
        inline.extend(read_word_list(&base_dir.join(file))?);
    }
    Ok(inline)
}

/// Read a word list with one entry per line. Blank lines are skipped.
pub fn read_word_list(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read word list: {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// A warning from rubric validation.
#[derive(Debug, Clone)]
pub struct CorpusWarning {
    /// Warning message.
    pub message: String,
}

/// Validate a corpus for common issues.
///
/// Nothing here is fatal: an incomplete corpus still grades, it just grades
/// less strictly.
pub fn validate_corpus(corpus: &ReferenceCorpus) -> Vec<CorpusWarning> {
    let mut warnings = Vec::new();
    let mut warn = |message: &str| {
        warnings.push(CorpusWarning {
            message: message.to_string(),
        })
    };

    if corpus.reference_text.trim().is_empty() {
        warn("reference text is empty; every summary will be compared against nothing");
    }
    if corpus.example_phrases.is_empty() {
        warn("example phrase list is empty; no_example will always pass");
    }
    if corpus.example_phrases.iter().any(|p| p.is_empty()) {
        warn("example phrase list contains an empty entry, which matches every answer");
    }
    if corpus.pronouns.is_empty() {
        warn("pronoun list is empty; no_pronouns will always pass");
    }
    if corpus.forbidden_title.is_empty() {
        warn("forbidden title is empty, which matches every answer");
    }
    if !(-1.0..=1.0).contains(&corpus.similarity_threshold) {
        warn("similarity threshold is outside [-1.0, 1.0]");
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_TOML: &str = r#"
[rubric]
reference_text = """
สื่อสังคม (Social Media) เป็นสื่อหรือช่องทางที่แพร่กระจายข้อมูลข่าวสาร
"""
forbidden_title = "การใช้สื่อสังคมออนไลน์"
similarity_threshold = 0.75

[examples]
phrases = ["ยกตัวอย่างเช่น", "อาทิเช่น"]

[pronouns]
primary = ["ฉัน", "ผม"]
secondary = ["เขา", "ผม"]
"#;

    #[test]
    fn parse_valid_toml() {
        let corpus = parse_rubric_str(VALID_TOML, Path::new(".")).unwrap();
        assert!(corpus.reference_text.contains("สื่อสังคม"));
        assert_eq!(corpus.example_phrases, vec!["ยกตัวอย่างเช่น", "อาทิเช่น"]);
        assert_eq!(corpus.pronouns, vec!["ฉัน", "ผม", "เขา", "ผม"]);
        assert_eq!(corpus.similarity_threshold, 0.75);
        assert!(validate_corpus(&corpus).is_empty());
    }

    #[test]
    fn parse_missing_optional_fields() {
        let corpus = parse_rubric_str("[rubric]\nreference_text = \"x\"\n", Path::new(".")).unwrap();
        assert_eq!(corpus.forbidden_title, DEFAULT_FORBIDDEN_TITLE);
        assert_eq!(corpus.similarity_threshold, DEFAULT_SIMILARITY_THRESHOLD);
        assert!(corpus.example_phrases.is_empty());
        assert!(corpus.pronouns.is_empty());
    }

    #[test]
    fn word_lists_load_relative_to_rubric() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("local_words.txt"), "เช่น\n\n  ได้แก่  \n").unwrap();
        std::fs::write(dir.path().join("pronouns2.txt"), "คุณ\nท่าน\n").unwrap();
        std::fs::write(dir.path().join("reference.txt"), "บทความอ้างอิง").unwrap();
        let rubric_path = dir.path().join("rubric.toml");
        std::fs::write(
            &rubric_path,
            r#"
[rubric]
reference_file = "reference.txt"

[examples]
phrases = ["อาทิ"]
file = "local_words.txt"

[pronouns]
primary = ["ฉัน"]
secondary_file = "pronouns2.txt"
"#,
        )
        .unwrap();

        let corpus = parse_rubric(&rubric_path).unwrap();
        assert_eq!(corpus.reference_text, "บทความอ้างอิง");
        assert_eq!(corpus.example_phrases, vec!["อาทิ", "เช่น", "ได้แก่"]);
        assert_eq!(corpus.pronouns, vec!["ฉัน", "คุณ", "ท่าน"]);
    }

    #[test]
    fn missing_word_list_is_an_error() {
        let toml = "[rubric]\n[examples]\nfile = \"does-not-exist.txt\"\n";
        let err = parse_rubric_str(toml, Path::new("/nonexistent")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read word list"));
    }

    #[test]
    fn parse_malformed_toml() {
        let result = parse_rubric_str("this is not [valid toml }{", Path::new("."));
        assert!(result.is_err());
    }

    #[test]
    fn validate_flags_degraded_corpus() {
        let corpus = ReferenceCorpus {
            forbidden_title: String::new(),
            similarity_threshold: 1.5,
            ..Default::default()
        };
        let warnings = validate_corpus(&corpus);
        let all = warnings
            .iter()
            .map(|w| w.message.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(all.contains("reference text is empty"));
        assert!(all.contains("pronoun list is empty"));
        assert!(all.contains("forbidden title is empty"));
        assert!(all.contains("outside"));
    }
}
