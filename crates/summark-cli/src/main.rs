//! summark CLI — grade a summary against the rubric from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "summark", version, about = "Rubric grader for summary-writing exercises")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade one student answer
    Evaluate {
        /// Path to the rubric .toml
        #[arg(long)]
        rubric: PathBuf,

        /// File containing the student answer
        #[arg(long, conflicts_with = "text", required_unless_present = "text")]
        answer: Option<PathBuf>,

        /// The student answer inline
        #[arg(long)]
        text: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: json, table
        #[arg(long, default_value = "json")]
        format: String,

        /// Also write the JSON verdict to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a rubric file
    Validate {
        /// Path to the rubric .toml
        #[arg(long)]
        rubric: PathBuf,
    },

    /// Create starter config and rubric
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("summark=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate {
            rubric,
            answer,
            text,
            config,
            format,
            output,
        } => commands::evaluate::execute(rubric, answer, text, config, format, output).await,
        Commands::Validate { rubric } => commands::validate::execute(rubric),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
