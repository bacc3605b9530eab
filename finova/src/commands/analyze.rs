// finova/src/commands/analyze.rs
//
// USE CASE: Score a dataset against the ontology.

use std::path::PathBuf;

use anyhow::Context;
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use finova_core::FinovaError;
use finova_core::application::{AnalysisReport, AnalysisRequest, DatasetSource, analyze_dataset};
use finova_core::domain::error::DomainError;
use finova_core::domain::ports::TracingSink;
use finova_core::infrastructure::adapters::load_profile_document;
use finova_core::infrastructure::{DuckDBProfiler, JsonHistoryStore};
use finova_core::ports::HistoryStore;

use crate::cli::OutputFormat;
use crate::commands::{fmt_rate, project_context, resolve_input};

pub struct AnalyzeOptions {
    pub input: PathBuf,
    pub project_dir: PathBuf,
    pub ontology: Option<PathBuf>,
    pub format: OutputFormat,
    pub explain: bool,
    pub no_history: bool,
    pub allow_unmatched: bool,
}

pub async fn execute(opts: AnalyzeOptions) -> anyhow::Result<()> {
    let start = std::time::Instant::now();
    let quiet = opts.format == OutputFormat::Json;

    // A. Config & adapters
    let (config, loader) = project_context(&opts.project_dir, opts.ontology)?;
    let input = resolve_input(&opts.project_dir, &opts.input);
    if !quiet {
        println!("⚙️  Project: {} (v{})", config.name, config.version);
        println!("   Ontology: {}", loader.path().display());
    }

    let source = if input.extension().and_then(|e| e.to_str()) == Some("json") {
        let profile = load_profile_document(&input)
            .with_context(|| format!("Failed to read profile document {:?}", input))?;
        DatasetSource::Profile(profile)
    } else {
        DatasetSource::Csv(input.clone())
    };

    let profiler = DuckDBProfiler::new().context("Failed to initialize DuckDB")?;
    let history = JsonHistoryStore::in_target(
        &opts.project_dir.join(&config.target_path),
        config.history.max_entries,
    );
    let history_port: Option<&dyn HistoryStore> = if config.history.enabled && !opts.no_history {
        Some(&history)
    } else {
        None
    };

    let request = AnalysisRequest {
        dataset_name: input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string()),
        source,
        explain: opts.explain || config.analysis.explain,
        require_match: config.analysis.require_match && !opts.allow_unmatched,
    };

    // B. Run the analysis (Application Layer)
    let report = match analyze_dataset(&profiler, &loader, history_port, request, &TracingSink).await
    {
        Ok(report) => report,
        Err(FinovaError::OntologyUnavailable(e)) => {
            eprintln!("💥 Ontology unavailable: {}", e);
            std::process::exit(1);
        }
        Err(FinovaError::Domain(e @ DomainError::NoOntologyMatch { .. })) => {
            eprintln!("❌ {}", e);
            eprintln!("👉 Use --allow-unmatched to score it anyway.");
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("Analysis failed"),
    };

    // C. Output
    match opts.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => {
            print_report(&report);
            println!("\n✨ Analysis finished in {:.2?}", start.elapsed());
        }
    }

    Ok(())
}

fn print_report(report: &AnalysisReport) {
    let result = &report.result;

    println!("\n📦 Dataset: {}", report.dataset_name);
    if let Some(meta) = report.dataset {
        println!("   Rows: {} | Columns: {}", meta.rows, meta.columns);
    }
    println!(
        "   Matched attributes: {}/{}",
        result.matched_attributes,
        report.profile.len()
    );

    println!("\n🎯 Overall DQS: {:.2}", result.overall_dqs);
    let mut scores = Table::new();
    scores.load_preset(UTF8_FULL).set_header(vec!["Dimension", "Score"]);
    for (dimension, score) in result.dimension_scores.iter() {
        scores.add_row(vec![dimension.to_string(), format!("{:.2}", score)]);
    }
    println!("{scores}");

    if result.has_violations() {
        println!("\n⚠️  {} violation(s):", result.violations.len());
        let mut violations = Table::new();
        violations.load_preset(UTF8_FULL).set_header(vec![
            "Attribute",
            "Issue",
            "Rate",
            "Severity",
            "Dimensions",
            "Impacts",
        ]);
        for v in &result.violations {
            let dims: Vec<String> = v.dimensions.iter().map(|d| d.to_string()).collect();
            let impacts: Vec<String> = v.impacts.iter().map(|i| i.to_string()).collect();
            violations.add_row(vec![
                v.attribute.clone(),
                v.issue.to_string(),
                fmt_rate(Some(v.violation_rate)),
                v.severity.to_string(),
                dims.join(", "),
                impacts.join(", "),
            ]);
        }
        println!("{violations}");
    }
    println!("\n📝 {}", result.summary);

    if let Some(explanation) = &report.explanation {
        println!("\n💡 {}", explanation.summary);
        for rec in &explanation.recommendations {
            println!("   ➜ [{}] {}: {}", rec.priority, rec.dimension, rec.action);
        }
        println!("   🛡️  {}", explanation.safety_note);
    }
}
