// finova/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "finova")]
#[command(about = "Ontology-driven data quality scoring for tabular datasets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Ontology file, overrides 'ontology-path' from finova.yaml
    #[arg(long, global = true, env = "FINOVA_ONTOLOGY")]
    pub ontology: Option<PathBuf>,

    /// More logs on stderr (-v info, -vv debug)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔬 Profiles a dataset and scores it against the ontology
    Analyze {
        /// CSV file, or a JSON profile document
        input: PathBuf,

        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Attach a plain-language explanation and recommendations
        #[arg(long)]
        explain: bool,

        /// Do not record the analysis in target/history.json
        #[arg(long)]
        no_history: bool,

        /// Score datasets even when no column matches the ontology
        #[arg(long)]
        allow_unmatched: bool,
    },

    /// 📊 Profiles a CSV file (null and duplicate rates per column)
    Profile {
        input: PathBuf,

        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// 🩺 Checks that the ontology can be loaded
    Health {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// 📜 Lists past analyses, newest first
    History {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Number of entries to show
        #[arg(long, default_value = "10")]
        limit: usize,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// 💬 Answers a question about an analysis (newest history entry by default)
    Ask {
        question: String,

        /// JSON report written by `analyze --format json`
        #[arg(long)]
        report: Option<PathBuf>,

        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 🧹 Cleans build artifacts (target/ folder)
    Clean {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}
