// finova/src/commands/profile.rs
//
// USE CASE: Column statistics only, no ontology involved.

use std::path::PathBuf;

use anyhow::Context;
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use finova_core::infrastructure::DuckDBProfiler;
use finova_core::ports::Profiler;

use crate::cli::OutputFormat;
use crate::commands::{fmt_rate, resolve_input};

pub async fn execute(
    input: PathBuf,
    project_dir: PathBuf,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let input = resolve_input(&project_dir, &input);
    let profiler = DuckDBProfiler::new().context("Failed to initialize DuckDB")?;
    let profiled = profiler
        .profile(&input)
        .await
        .with_context(|| format!("Failed to profile {:?}", input))?;

    match format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "dataset": profiled.metadata,
                "profile": profiled.profile,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Table => {
            println!(
                "📊 {} ({} rows, {} columns, engine: {})",
                input.display(),
                profiled.metadata.rows,
                profiled.metadata.columns,
                profiler.engine_name()
            );
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_header(vec!["Column", "Type", "Null rate", "Duplicate rate"]);
            for attr in profiled.profile.iter() {
                table.add_row(vec![
                    attr.name.clone(),
                    attr.declared_type.clone(),
                    fmt_rate(attr.null_rate),
                    fmt_rate(attr.duplicate_rate),
                ]);
            }
            println!("{table}");
        }
    }

    Ok(())
}
