//! Process command - extract fields from a single document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use termsheet_core::{extract_file, ExtractionResult, TermsheetConfig};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (DOCX or text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Save to the configured default output file, with the extension of --format
    #[arg(long, conflicts_with = "output")]
    save: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also scan for market terms (ISIN, tenor, notional size, ...)
    #[arg(long)]
    market_terms: bool,

    /// List fields that were not found
    #[arg(long)]
    show_missing: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per field
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if args.market_terms {
        config.extraction.market_terms = true;
    }

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let result = extract(&args.input, &config)?;

    let output = format_result(&result, args.format, config.output.pretty)?;

    let output_path = if args.save {
        Some(saved_output_path(&config.output.default_file, args.format))
    } else {
        args.output.clone()
    };

    if let Some(output_path) = &output_path {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_missing && !matches!(args.format, OutputFormat::Text) {
        let missing = result.missing_fields();
        if missing.is_empty() {
            eprintln!("{} All {} fields found", style("ℹ").blue(), result.target_entities.len());
        } else {
            eprintln!("{}", style("Fields not found:").yellow());
            for field in &missing {
                eprintln!("  - {}", field);
            }
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load a document and run the parser configured by `config`.
pub fn extract(path: &Path, config: &TermsheetConfig) -> anyhow::Result<ExtractionResult> {
    extract_file(path, config).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
}

/// The configured default output file, with the extension of `format`.
fn saved_output_path(default_file: &str, format: OutputFormat) -> PathBuf {
    Path::new(default_file).with_extension(format.extension())
}

pub fn format_result(
    result: &ExtractionResult,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["field", "value"])?;

    for field in &result.target_entities {
        wtr.write_record([field.label(), result.get(*field).unwrap_or("")])?;
    }

    if let Some(terms) = &result.market_terms {
        let rows = [
            ("notional_size", &terms.notional_size),
            ("isin", &terms.isin),
            ("maturity", &terms.maturity),
            ("bid", &terms.bid),
            ("payment_frequency", &terms.payment_frequency),
        ];
        for (name, value) in rows {
            wtr.write_record([name, value.as_deref().unwrap_or("")])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Extracted {} entities:\n", result.entities_found));
    output.push_str(&"-".repeat(50));
    output.push('\n');

    for (field, value) in &result.extracted_entities {
        output.push_str(&format!("{}: {}\n", field, value));
    }

    let missing = result.missing_fields();
    if !missing.is_empty() {
        output.push('\n');
        output.push_str("Not found:\n");
        for field in missing {
            output.push_str(&format!("  - {}\n", field));
        }
    }

    if let Some(terms) = result.market_terms.as_ref().filter(|t| !t.is_empty()) {
        output.push('\n');
        output.push_str("Market terms:\n");
        let rows = [
            ("Notional size", &terms.notional_size),
            ("ISIN", &terms.isin),
            ("Maturity", &terms.maturity),
            ("Bid", &terms.bid),
            ("Payment frequency", &terms.payment_frequency),
        ];
        for (name, value) in rows {
            if let Some(value) = value {
                output.push_str(&format!("  {}: {}\n", name, value));
            }
        }
    }

    output
}
