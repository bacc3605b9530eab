// finova/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. Setup Logging (Tracing), on stderr so `--format json` stays parseable
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze {
            input,
            project_dir,
            format,
            explain,
            no_history,
            allow_unmatched,
        } => {
            commands::analyze::execute(commands::analyze::AnalyzeOptions {
                input,
                project_dir,
                ontology: cli.ontology,
                format,
                explain,
                no_history,
                allow_unmatched,
            })
            .await
        }
        Commands::Profile {
            input,
            project_dir,
            format,
        } => commands::profile::execute(input, project_dir, format).await,
        Commands::Health {
            project_dir,
            format,
        } => commands::health::execute(project_dir, cli.ontology, format),
        Commands::History {
            project_dir,
            limit,
            format,
        } => commands::history::execute(project_dir, limit, format),
        Commands::Ask {
            question,
            report,
            project_dir,
        } => commands::ask::execute(question, report, project_dir),
        Commands::Clean { project_dir } => commands::clean::execute(project_dir),
    }
}
