//! Verdict report with JSON persistence.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{RuleKind, RuleResult};

/// The aggregated outcome of one evaluation.
///
/// `score` is 1 only when every rule is valid. There is no partial credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictReport {
    pub score: u8,
    /// Per-rule results, listed in registry order.
    pub details: BTreeMap<RuleKind, RuleResult>,
}

impl VerdictReport {
    /// Reduce per-rule results with a logical AND.
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = (RuleKind, RuleResult)>,
    {
        let details: BTreeMap<RuleKind, RuleResult> = results.into_iter().collect();
        let score = u8::from(details.values().all(|r| r.valid));
        Self { score, details }
    }

    pub fn passed(&self) -> bool {
        self.score == 1
    }

    pub fn get(&self, kind: RuleKind) -> Option<&RuleResult> {
        self.details.get(&kind)
    }

    /// Rules that did not pass, in registry order.
    pub fn failed_rules(&self) -> Vec<RuleKind> {
        self.details
            .iter()
            .filter(|(_, r)| !r.valid)
            .map(|(kind, _)| *kind)
            .collect()
    }

    /// Indented JSON with non-ASCII text written as-is.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize verdict")
    }

    /// Save the verdict as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write verdict to {}", path.display()))?;
        Ok(())
    }

    /// Load a verdict from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read verdict from {}", path.display()))?;
        serde_json::from_str(&content).context("failed to parse verdict JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SIMILARITY_MISMATCH_MESSAGE;

    fn all_pass() -> Vec<(RuleKind, RuleResult)> {
        RuleKind::ALL
            .into_iter()
            .map(|kind| (kind, RuleResult::pass()))
            .collect()
    }

    #[test]
    fn score_is_one_only_when_all_valid() {
        let report = VerdictReport::from_results(all_pass());
        assert_eq!(report.score, 1);
        assert!(report.passed());
        assert!(report.failed_rules().is_empty());

        let mut results = all_pass();
        results[3].1 = RuleResult::from_violations(vec!["ก.พ.".into()]);
        let report = VerdictReport::from_results(results);
        assert_eq!(report.score, 0);
        assert_eq!(report.failed_rules(), vec![RuleKind::NoAbbreviations]);
    }

    #[test]
    fn json_lists_rules_in_registry_order() {
        let mut results = all_pass();
        results.reverse();
        results[4].1 = RuleResult::similarity(false);
        let json = VerdictReport::from_results(results).to_json_pretty().unwrap();

        let positions: Vec<usize> = RuleKind::ALL
            .iter()
            .map(|k| json.find(&format!("\"{k}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
        assert!(json.starts_with("{\n  \"score\": 0,"));
        assert!(json.contains(SIMILARITY_MISMATCH_MESSAGE), "non-ASCII must not be escaped");
    }

    #[test]
    fn save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/verdict.json");
        let report = VerdictReport::from_results(all_pass());
        report.save_json(&path).unwrap();

        let loaded = VerdictReport::load_json(&path).unwrap();
        assert_eq!(loaded, report);
        assert!(loaded.get(RuleKind::NoTitle).unwrap().valid);
    }
}
