// finova-core/src/application/chat.rs

use std::path::PathBuf;

use tracing::{info, instrument};

use crate::application::analysis::AnalysisReport;
use crate::domain::knowledge::chat::answer;
use crate::error::FinovaError;
use crate::infrastructure::fs::read_json;
use crate::ports::history::HistoryStore;

const PREVIEW_CHARS: usize = 60;

/// The analysis a question is about.
#[derive(Debug, Clone)]
pub enum ChatSubject {
    /// JSON report written by `analyze --format json`.
    Report(PathBuf),
    /// Newest entry of the project history.
    Latest,
}

#[instrument(skip_all)]
pub fn ask_about_analysis(
    question: &str,
    subject: &ChatSubject,
    history: &dyn HistoryStore,
) -> Result<String, FinovaError> {
    let preview: String = question.chars().take(PREVIEW_CHARS).collect();
    info!(question = %preview, subject = ?subject, "Chat request");

    match subject {
        ChatSubject::Report(path) => {
            let report: AnalysisReport = read_json(path)?;
            Ok(answer(question, &report.chat_context()))
        }
        ChatSubject::Latest => {
            let records = history.list()?;
            let latest = records.first().ok_or(FinovaError::NoAnalysisRecorded)?;
            Ok(answer(question, &latest.chat_context()))
        }
    }
}
