use anyhow::Context;
use clap::Parser;
use mb_quote::core::batch;
use mb_quote::utils::{logger, validation::Validate};
use mb_quote::{PricingConfig, PricingTable};
use std::fs::File;
use std::io::{BufReader, BufWriter};

#[derive(Parser)]
#[command(name = "quote-batch")]
#[command(about = "Price a CSV file of cleaning quote requests")]
struct Args {
    /// CSV with a header row (service,size,bedrooms,bathrooms,frequency,...)
    #[arg(short, long)]
    input: String,

    /// Where to write the priced rows
    #[arg(short, long, default_value = "quotes.csv")]
    output: String,

    /// Pricing TOML file overriding the published rates
    #[arg(short, long)]
    config: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting quote batch");

    let table = match load_table(args.config.as_deref()) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!("❌ Pricing configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    };

    tracing::info!("📥 Reading requests from: {}", args.input);
    let reader = File::open(&args.input)
        .with_context(|| format!("failed to open input CSV '{}'", args.input))?;
    let writer = File::create(&args.output)
        .with_context(|| format!("failed to create output CSV '{}'", args.output))?;

    let summary = batch::price_csv(BufReader::new(reader), BufWriter::new(writer), &table)
        .with_context(|| format!("failed to price '{}'", args.input))?;

    for failure in &summary.failures {
        eprintln!("⚠️ Row {} skipped: {}", failure.row, failure.message);
    }

    tracing::info!(
        "✅ Priced {} requests ({} failed, {} values normalized)",
        summary.priced,
        summary.failed(),
        summary.normalized_values
    );
    println!("✅ Priced {} requests, {} failed", summary.priced, summary.failed());
    println!("📁 Output saved to: {}", args.output);

    if summary.failed() > 0 {
        std::process::exit(2);
    }

    Ok(())
}

fn load_table(path: Option<&str>) -> mb_quote::Result<PricingTable> {
    let Some(path) = path else {
        return Ok(PricingTable::default());
    };

    tracing::info!("📁 Loading pricing from: {}", path);
    let pricing = PricingConfig::from_file(path)?;
    pricing.validate()?;
    Ok(pricing.pricing_table())
}
