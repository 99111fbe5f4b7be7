//! Process command - extract products from a single price-list PDF.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use iskonto_core::models::config::IskontoConfig;
use iskonto_core::models::product::{DocumentResult, DocumentType};
use iskonto_core::pricelist::PriceListExtractor;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per product
    Csv,
    /// Per-category report
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        IskontoConfig::from_file(std::path::Path::new(path))?
    } else {
        IskontoConfig::default()
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Loading PDF...");
    pb.set_position(10);

    let data = fs::read(&args.input)?;
    let name = args
        .input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document");

    pb.set_message("Extracting products...");
    pb.set_position(40);

    let extractor = PriceListExtractor::from_config(&config);
    let result = extractor.extract(&data, name)?;

    pb.set_position(100);
    pb.finish_with_message("Done");

    if result.categories.is_empty() {
        eprintln!(
            "{} No products extracted from {}",
            style("!").yellow(),
            args.input.display()
        );
    }

    let output = format_document(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_document(result: &DocumentResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &DocumentResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "document",
        "category",
        "code",
        "name",
        "price_without_vat",
        "price_with_vat",
    ])?;

    for (category, records) in result.categories.iter() {
        for record in records {
            wtr.write_record([
                &result.name,
                category.slug(),
                &record.code,
                &record.name,
                &record.price_without_vat.to_string(),
                &record.price_with_vat.to_string(),
            ])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &DocumentResult) -> String {
    let mut output = String::new();

    let type_label = match result.doc_type {
        DocumentType::Normal => "normal",
        DocumentType::Frozen => "frozen (dondurulmuş)",
        DocumentType::Weighted => "weighted (gramaj/soslu)",
    };

    output.push_str(&format!("Document: {}\n", result.name));
    output.push_str(&format!("Type: {}\n", type_label));
    output.push_str(&format!("Products: {}\n", result.categories.total_count()));

    for (category, records) in result.categories.iter() {
        if records.is_empty() {
            continue;
        }
        output.push_str(&format!(
            "\n{} ({})\n",
            category.display_name(),
            records.len()
        ));
        for record in records.iter().take(5) {
            output.push_str(&format!(
                "  {:<12} {:<45} {:>8} / {:>8}\n",
                record.code, record.name, record.price_without_vat, record.price_with_vat
            ));
        }
        if records.len() > 5 {
            output.push_str(&format!("  ... and {} more\n", records.len() - 5));
        }
    }

    output
}
