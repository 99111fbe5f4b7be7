//! Discount command - extract products and apply per-category discounts.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use rust_decimal::Decimal;
use tracing::{debug, info};

use iskonto_core::batch::BatchProcessor;
use iskonto_core::discount::{apply_discounts, DiscountRates, DiscountedRecord};
use iskonto_core::models::config::IskontoConfig;
use iskonto_core::models::product::Category;

use super::batch::expand_inputs;

/// Arguments for the discount command.
#[derive(Args)]
pub struct DiscountArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Discount rate for one category, as category=percent
    /// (e.g. --rate wing=10 --rate breast=12.5)
    #[arg(short, long = "rate", value_parser = parse_rate)]
    rates: Vec<(Category, Decimal)>,

    /// JSON file with per-category rates (e.g. {"wing": 10})
    #[arg(long)]
    rates_file: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: DiscountFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum DiscountFormat {
    /// JSON output
    Json,
    /// CSV output, one row per product
    Csv,
    /// Per-category report with original prices
    Text,
}

fn parse_rate(value: &str) -> Result<(Category, Decimal), String> {
    let (name, rate) = value
        .split_once('=')
        .ok_or_else(|| format!("expected category=percent, got '{}'", value))?;
    let category: Category = name.trim().parse()?;
    let rate: Decimal = rate
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| format!("invalid percentage '{}'", rate))?;
    Ok((category, rate))
}

pub async fn run(args: DiscountArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        IskontoConfig::from_file(std::path::Path::new(path))?
    } else {
        IskontoConfig::default()
    };

    // Rates file first, command-line rates override per category
    let mut rates = match &args.rates_file {
        Some(path) => serde_json::from_str::<DiscountRates>(&fs::read_to_string(path)?)?,
        None => DiscountRates::new(),
    };
    for (category, rate) in &args.rates {
        rates.set(*category, *rate);
    }

    let files = expand_inputs(&args.input)?;
    info!("Applying discounts across {} file(s)", files.len());

    let processor = BatchProcessor::from_config(&config);
    let outcome = processor.process_paths(&files)?;

    for failure in outcome.failures() {
        eprintln!(
            "{} Excluded {}: {}",
            style("!").yellow(),
            failure.path.display(),
            failure.reason
        );
    }

    let merged = outcome.merged();
    if merged.is_empty() {
        anyhow::bail!("No products extracted from any input file");
    }

    let discounted = apply_discounts(&merged, &rates)?;

    let output = match args.format {
        DiscountFormat::Json => serde_json::to_string_pretty(&discounted)?,
        DiscountFormat::Csv => format_csv(&discounted)?,
        DiscountFormat::Text => format_text(&discounted, &rates),
    };

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

fn format_csv(discounted: &BTreeMap<Category, Vec<DiscountedRecord>>) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "category",
        "name",
        "price_without_vat",
        "price_with_vat",
        "original_price_without_vat",
        "original_price_with_vat",
    ])?;

    for (category, records) in discounted {
        for record in records {
            wtr.write_record([
                category.slug(),
                &record.name,
                &record.price_without_vat.to_string(),
                &record.price_with_vat.to_string(),
                &record.original_price_without_vat.to_string(),
                &record.original_price_with_vat.to_string(),
            ])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(
    discounted: &BTreeMap<Category, Vec<DiscountedRecord>>,
    rates: &DiscountRates,
) -> String {
    let mut output = String::new();

    for (category, records) in discounted {
        output.push_str(&format!(
            "{} ({} products, {}% discount)\n",
            category.display_name(),
            records.len(),
            rates.get(*category)
        ));
        for record in records {
            output.push_str(&format!(
                "  {:<45} {:>8} / {:>8}  (was {} / {})\n",
                record.name,
                record.price_without_vat,
                record.price_with_vat,
                record.original_price_without_vat,
                record.original_price_with_vat
            ));
        }
        output.push('\n');
    }

    output
}
