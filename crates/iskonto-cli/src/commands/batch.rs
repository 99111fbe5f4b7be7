//! Batch command - extract products from multiple price-list PDFs.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use iskonto_core::batch::{BatchOutcome, BatchProcessor};
use iskonto_core::models::config::IskontoConfig;
use iskonto_core::models::product::{DocumentResult, DocumentType};

use super::process::{format_document, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-document results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each document
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also write a merged view across all documents
    #[arg(long)]
    merged: bool,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        IskontoConfig::from_file(std::path::Path::new(path))?
    } else {
        IskontoConfig::default()
    };

    let files = expand_inputs(&args.input)?;
    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let processor = BatchProcessor::from_config(&config);
    let outcome = processor.process_paths_with(&files, |_| pb.inc(1))?;
    pb.finish_with_message("Complete");

    // Per-document outputs
    if let Some(ref output_dir) = args.output_dir {
        for document in outcome.documents() {
            let stem = PathBuf::from(&document.name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("document")
                .to_string();
            let output_path =
                output_dir.join(format!("{}.{}", stem, args.format.extension()));
            fs::write(&output_path, format_document(document, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.merged {
        let merged = DocumentResult {
            name: "merged".to_string(),
            doc_type: DocumentType::Normal,
            categories: outcome.merged(),
        };
        let content = format_document(&merged, args.format)?;
        match args.output_dir {
            Some(ref output_dir) => {
                let path = output_dir.join(format!("merged.{}", args.format.extension()));
                fs::write(&path, content)?;
                println!(
                    "{} Merged view written to {}",
                    style("✓").green(),
                    path.display()
                );
            }
            None => println!("{}", content),
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &outcome)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcome.documents().len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} excluded",
        style(outcome.documents().len()).green(),
        style(outcome.failures().len()).red()
    );

    if !outcome.failures().is_empty() {
        println!();
        println!("{}", style("Excluded files:").red());
        for failure in outcome.failures() {
            println!("  - {}: {}", failure.path.display(), failure.reason);
        }
    }

    Ok(())
}

/// Expand a glob pattern (or plain path) into the PDF files it names.
pub fn expand_inputs(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let files: Vec<PathBuf> = glob(pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("pdf")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching PDF files found for pattern: {}", pattern);
    }

    Ok(files)
}

/// Summary CSV: one row per (document, category) with the record
/// count, then one row per excluded document.
fn write_summary(path: &PathBuf, outcome: &BatchOutcome) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["document", "document_type", "category", "products", "error"])?;

    for document in outcome.documents() {
        let doc_type = match document.doc_type {
            DocumentType::Normal => "normal",
            DocumentType::Frozen => "frozen",
            DocumentType::Weighted => "weighted",
        };
        for (category, records) in document.categories.iter() {
            wtr.write_record([
                &document.name,
                doc_type,
                category.slug(),
                &records.len().to_string(),
                "",
            ])?;
        }
    }

    for failure in outcome.failures() {
        let filename = failure
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        wtr.write_record([filename, "", "", "", &failure.reason])?;
    }

    wtr.flush()?;
    Ok(())
}
