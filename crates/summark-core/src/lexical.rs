//! Lexical checks over the raw submission text.
//!
//! All matching here is exact and case-sensitive; nothing is normalized.
//! Evidence follows the order of the forbidden list, not the order in which
//! items occur in the submission.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::RuleResult;
use crate::tokenize::Tokenizer;

static ABBREVIATION_RE: OnceLock<Regex> = OnceLock::new();

/// Two or more single Thai consonants or Latin letters each followed by a
/// period ("ก.พ.", "A.B."), captured in group 1.
///
/// The left edge is the start of text or any character that is not a letter,
/// digit or underscore. `\b` would not do: it treats Thai vowel and tone
/// marks as word characters, so "ตั้งแต่ก.พ." would never match.
fn abbreviation_re() -> &'static Regex {
    ABBREVIATION_RE.get_or_init(|| {
        Regex::new(r"(?:^|[^\p{L}\p{N}_])((?:[ก-ฮA-Za-z]\.){2,})").expect("abbreviation regex")
    })
}

/// Flag every forbidden example phrase that occurs verbatim in the text.
pub fn check_examples(submission: &str, phrases: &[String]) -> RuleResult {
    let violated = phrases
        .iter()
        .filter(|phrase| submission.contains(phrase.as_str()))
        .cloned()
        .collect();
    RuleResult::from_violations(violated)
}

/// Flag every forbidden pronoun that occurs as a whole word.
///
/// A pronoun embedded in a longer word does not count, which is why the text
/// is tokenized rather than searched.
pub fn check_pronouns(
    submission: &str,
    pronouns: &[String],
    tokenizer: &dyn Tokenizer,
) -> RuleResult {
    let words: HashSet<String> = tokenizer.tokenize(submission).into_iter().collect();
    let violated = pronouns
        .iter()
        .filter(|pronoun| words.contains(pronoun.as_str()))
        .cloned()
        .collect();
    RuleResult::from_violations(violated)
}

/// Flag the exercise title if it was copied into the text.
pub fn check_title(submission: &str, forbidden_title: &str) -> RuleResult {
    if submission.contains(forbidden_title) {
        RuleResult::from_violations(vec![forbidden_title.to_string()])
    } else {
        RuleResult::pass()
    }
}

/// First dotted-initials abbreviation in the text, if any.
///
/// Only the first occurrence is reported. The entity tagger usually catches
/// the rest, and one hit already fails the rule.
pub fn first_abbreviation_pattern(submission: &str) -> Option<String> {
    abbreviation_re()
        .captures(submission)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
