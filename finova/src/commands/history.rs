// finova/src/commands/history.rs
//
// USE CASE: Past analyses of the project.

use std::path::PathBuf;

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use finova_core::infrastructure::JsonHistoryStore;
use finova_core::infrastructure::config::load_or_default;
use finova_core::ports::HistoryStore;

use crate::cli::OutputFormat;

pub fn execute(project_dir: PathBuf, limit: usize, format: OutputFormat) -> anyhow::Result<()> {
    let config = load_or_default(&project_dir)?;
    let store = JsonHistoryStore::in_target(
        &project_dir.join(&config.target_path),
        config.history.max_entries,
    );
    let records: Vec<_> = store.list()?.into_iter().take(limit).collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Table => {
            if records.is_empty() {
                println!("📜 No analyses recorded yet in {}", store.path().display());
                return Ok(());
            }
            println!("📜 {} most recent analyses", records.len());
            let mut table = Table::new();
            table.load_preset(UTF8_FULL).set_header(vec![
                "When",
                "Dataset",
                "DQS",
                "Violations",
                "Summary",
            ]);
            for r in &records {
                table.add_row(vec![
                    r.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    r.dataset_name.clone(),
                    format!("{:.2}", r.overall_dqs),
                    r.violations.len().to_string(),
                    r.summary.clone(),
                ]);
            }
            println!("{table}");
        }
    }

    Ok(())
}
