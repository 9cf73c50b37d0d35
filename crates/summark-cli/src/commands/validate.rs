//! The `summark validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(rubric_path: PathBuf) -> Result<()> {
    let corpus = summark_core::corpus::parse_rubric(&rubric_path)?;

    println!(
        "Rubric: {} ({} example phrases, {} pronouns, threshold {})",
        rubric_path.display(),
        corpus.example_phrases.len(),
        corpus.pronouns.len(),
        corpus.similarity_threshold
    );
    println!("Forbidden title: {}", corpus.forbidden_title);

    let warnings = summark_core::corpus::validate_corpus(&corpus);
    for w in &warnings {
        println!("  WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Rubric valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
