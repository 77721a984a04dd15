//! Batch command - extract fields from every document matching a glob.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, warn};

use termsheet_core::models::config::DocumentConfig;
use termsheet_core::ExtractionResult;

use super::process::{extract, format_result, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern selecting the input documents
    #[arg(required = true)]
    input: String,

    /// Directory for per-document results and the summary
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each document
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Write summary.csv with one row per document
    #[arg(long)]
    summary: bool,

    /// Keep going when a document fails
    #[arg(long)]
    continue_on_error: bool,

    /// Also scan for market terms
    #[arg(long)]
    market_terms: bool,
}

/// What happened to one input document.
struct FileOutcome {
    path: PathBuf,
    result: Result<ExtractionResult, String>,
    elapsed_ms: u64,
}

impl FileOutcome {
    fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }
}

/// One line of summary.csv.
#[derive(Serialize)]
struct SummaryRow<'a> {
    filename: &'a str,
    status: &'static str,
    entities_found: Option<usize>,
    missing: String,
    processing_time_ms: u64,
    error: &'a str,
}

impl<'a> From<&'a FileOutcome> for SummaryRow<'a> {
    fn from(outcome: &'a FileOutcome) -> Self {
        match &outcome.result {
            Ok(result) => SummaryRow {
                filename: outcome.file_name(),
                status: "success",
                entities_found: Some(result.entities_found),
                missing: result
                    .missing_fields()
                    .iter()
                    .map(|f| f.label())
                    .collect::<Vec<_>>()
                    .join("; "),
                processing_time_ms: outcome.elapsed_ms,
                error: "",
            },
            Err(e) => SummaryRow {
                filename: outcome.file_name(),
                status: "error",
                entities_found: None,
                missing: String::new(),
                processing_time_ms: outcome.elapsed_ms,
                error: e,
            },
        }
    }
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if args.market_terms {
        config.extraction.market_terms = true;
    }

    let files = collect_inputs(&args.input, &config.document)?;
    println!(
        "{} Found {} documents to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let mut outcomes = Vec::with_capacity(files.len());

    for path in files {
        pb.set_message(path.display().to_string());

        let file_start = Instant::now();
        let result = extract(&path, &config).map_err(|e| e.to_string());
        let elapsed_ms = file_start.elapsed().as_millis() as u64;

        if let Err(e) = &result {
            if !args.continue_on_error {
                pb.abandon();
                anyhow::bail!("Processing failed: {}", e);
            }
            warn!("Skipping {}: {}", path.display(), e);
        }

        outcomes.push(FileOutcome {
            path,
            result,
            elapsed_ms,
        });
        pb.inc(1);
    }

    pb.finish_and_clear();

    if let Some(dir) = &args.output_dir {
        write_outputs(&outcomes, dir, args.format, config.output.pretty)?;
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_deref()
            .unwrap_or_else(|| Path::new("."))
            .join("summary.csv");

        write_summary(&summary_path, &outcomes)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<&FileOutcome> = outcomes.iter().filter(|o| o.result.is_err()).collect();

    println!();
    println!(
        "{} Processed {} documents in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(outcomes.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed documents:").red());
        for outcome in failed {
            if let Err(e) = &outcome.result {
                println!("  - {}: {}", outcome.path.display(), e);
            }
        }
    }

    Ok(())
}

/// Expand the glob, keeping only extensions the loaders know.
fn collect_inputs(pattern: &str, config: &DocumentConfig) -> anyhow::Result<Vec<PathBuf>> {
    let files: Vec<PathBuf> = glob(pattern)?
        .filter_map(|entry| entry.ok())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| config.is_supported(ext))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No supported documents match pattern: {}", pattern);
    }

    Ok(files)
}

fn write_outputs(
    outcomes: &[FileOutcome],
    dir: &Path,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<()> {
    for outcome in outcomes {
        let Ok(result) = &outcome.result else { continue };

        let stem = outcome
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("termsheet");
        let output_path = dir.join(format!("{}.{}", stem, format.extension()));

        fs::write(&output_path, format_result(result, format, pretty)?)?;
        debug!("Wrote {}", output_path.display());
    }

    Ok(())
}

fn write_summary(path: &Path, outcomes: &[FileOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    for outcome in outcomes {
        wtr.serialize(SummaryRow::from(outcome))?;
    }

    wtr.flush()?;
    Ok(())
}
