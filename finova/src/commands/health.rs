// finova/src/commands/health.rs
//
// USE CASE: Can the ontology be loaded?

use std::path::PathBuf;

use finova_core::application::check_health;

use crate::cli::OutputFormat;
use crate::commands::project_context;

pub fn execute(
    project_dir: PathBuf,
    ontology: Option<PathBuf>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let (_, loader) = project_context(&project_dir, ontology)?;
    let status = check_health(&loader);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
        OutputFormat::Table => {
            println!("🩺 Status: {}", status.status);
            if status.ontology_loaded {
                println!("   ✅ Ontology loaded from {}", loader.path().display());
            } else {
                println!("   ❌ Ontology not loaded from {}", loader.path().display());
                if let Some(detail) = &status.detail {
                    println!("      {}", detail);
                }
            }
        }
    }

    Ok(())
}
