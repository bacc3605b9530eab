// finova/src/commands/ask.rs
//
// USE CASE: Questions about a finished analysis.

use std::path::PathBuf;

use finova_core::FinovaError;
use finova_core::application::{ChatSubject, ask_about_analysis};
use finova_core::infrastructure::JsonHistoryStore;
use finova_core::infrastructure::config::load_or_default;

use super::resolve_input;

pub fn execute(question: String, report: Option<PathBuf>, project_dir: PathBuf) -> anyhow::Result<()> {
    let config = load_or_default(&project_dir)?;
    let history = JsonHistoryStore::in_target(
        &project_dir.join(&config.target_path),
        config.history.max_entries,
    );
    let subject = match report {
        Some(path) => ChatSubject::Report(resolve_input(&project_dir, &path)),
        None => ChatSubject::Latest,
    };

    match ask_about_analysis(&question, &subject, &history) {
        Ok(reply) => println!("💬 {}", reply),
        Err(e @ FinovaError::NoAnalysisRecorded) => {
            eprintln!("📭 {}", e);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
