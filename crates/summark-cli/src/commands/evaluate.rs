//! The `summark evaluate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use summark_core::corpus::{parse_rubric, validate_corpus};
use summark_core::rules::RuleSet;
use summark_core::tokenize::create_tokenizer;
use summark_core::{Evaluator, VerdictReport};
use summark_providers::config::load_config_from;
use summark_providers::{create_embedder, create_tagger};

pub async fn execute(
    rubric_path: PathBuf,
    answer_path: Option<PathBuf>,
    text: Option<String>,
    config_path: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "json" | "table"),
        "unknown format '{format}', expected json or table"
    );

    let submission = match (answer_path, text) {
        (Some(path), _) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read answer: {}", path.display()))?,
        (None, Some(text)) => text,
        (None, None) => anyhow::bail!("provide --answer <file> or --text <answer>"),
    };

    let corpus = parse_rubric(&rubric_path)?;
    for warning in validate_corpus(&corpus) {
        tracing::warn!("rubric: {}", warning.message);
    }

    let config = load_config_from(config_path.as_deref())?;
    tracing::debug!(?config, "loaded configuration");

    let evaluator = Evaluator::new(
        RuleSet::from_corpus(&corpus),
        create_embedder(&config.embedder)?,
        create_tagger(&config.tagger)?,
        create_tokenizer(&config.tokenizer)?,
    );

    let report = evaluator.evaluate(&submission).await?;

    match format.as_str() {
        "table" => print_summary(&report),
        _ => println!("{}", report.to_json_pretty()?),
    }

    if let Some(path) = output {
        report.save_json(&path)?;
        eprintln!("Verdict saved to: {}", path.display());
    }

    Ok(())
}

fn print_summary(report: &VerdictReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Rule", "Result", "Violations"]);

    for (kind, result) in &report.details {
        table.add_row(vec![
            Cell::new(kind),
            Cell::new(if result.valid { "PASS" } else { "FAIL" }),
            Cell::new(result.violated_words.join(", ")),
        ]);
    }

    println!("{table}");
    println!("Score: {}", report.score);
}
