use chrono::{DateTime, Utc};
use clap::Parser;
use mb_quote::core::presentation::{format_rate, format_usd, ServiceCopy};
use mb_quote::core::pricing::PriceBreakdown;
use mb_quote::utils::{logger, validation::Validate};
use mb_quote::{
    field_lines, CliConfig, ContactSettings, OutputFormat, PricingConfig, PricingTable,
    QuoteEstimator, QuoteSubmission, Service,
};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("🚀 Starting mb-quote");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ Quote failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = e.severity().exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn run(config: &CliConfig) -> mb_quote::Result<()> {
    let (table, mut contact) = load_pricing(config)?;
    if let Some(recipient) = &config.recipient {
        tracing::info!("🔧 Recipient overridden to: {}", recipient);
        contact.recipient = recipient.clone();
    }

    let mut estimator = QuoteEstimator::new(Service::from_form_value(&config.service), table);
    estimator.apply_form(&config.to_form());

    let submission = if config.mailto {
        Some(estimator.submit(&contact)?)
    } else {
        None
    };

    match config.format {
        OutputFormat::Text => print_text(&estimator, config.breakdown, submission.as_ref()),
        OutputFormat::Json => print_json(&estimator, config.breakdown, submission.as_ref())?,
    }

    Ok(())
}

fn load_pricing(config: &CliConfig) -> mb_quote::Result<(PricingTable, ContactSettings)> {
    let Some(path) = &config.config else {
        return Ok((PricingTable::default(), ContactSettings::default()));
    };

    tracing::info!("📁 Loading pricing from: {}", path);
    let pricing = PricingConfig::from_file(path)?;

    // 驗證配置
    pricing.validate()?;
    tracing::info!("✅ Pricing configuration loaded and validated");

    Ok(pricing.into_parts())
}

fn print_text(estimator: &QuoteEstimator, show_breakdown: bool, submission: Option<&QuoteSubmission>) {
    let input = estimator.input();
    let result = estimator.result();
    let copy = ServiceCopy::for_service(input.service);

    println!("📋 {} ({})", copy.heading, input.service);
    for (label, value) in field_lines(input) {
        println!("  {}: {}", label, value);
    }
    println!();

    println!("💰 Your Estimated Price: {}", format_usd(result.total));
    if result.has_per_sq_ft() {
        println!(
            "  Per sq ft: {} (base rate {})",
            format_rate(result.per_sq_ft),
            format_rate(result.base_rate_per_sq_ft)
        );
    }
    if result.minimum_applied {
        println!("  Minimum charge applied: {}", format_usd(result.minimum_charge));
    }
    println!("  {}", copy.disclaimer);

    if show_breakdown {
        print_breakdown(&estimator.breakdown());
    }

    if let Some(submission) = submission {
        println!();
        println!("📨 {}", copy.submit_label);
        println!("{}", submission.mailto);
        println!("✅ {}", copy.confirmation);
    }
}

fn print_breakdown(breakdown: &PriceBreakdown) {
    println!();
    println!("🧾 Estimate breakdown:");
    for line in &breakdown.lines {
        let sign = if line.amount < 0.0 { "-" } else { "" };
        println!(
            "  {:<28} {}{}",
            line.kind.label(),
            sign,
            format_rate(line.amount.abs())
        );
    }
    println!("  {:<28} {}", "Total", format_usd(breakdown.result.total));
}

fn print_json(
    estimator: &QuoteEstimator,
    show_breakdown: bool,
    submission: Option<&QuoteSubmission>,
) -> mb_quote::Result<()> {
    let output = json_output(estimator, show_breakdown, submission, Utc::now())?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn json_output(
    estimator: &QuoteEstimator,
    show_breakdown: bool,
    submission: Option<&QuoteSubmission>,
    generated_at: DateTime<Utc>,
) -> mb_quote::Result<serde_json::Value> {
    let result = estimator.result();
    let mut output = serde_json::json!({
        "input": estimator.input(),
        "result": result,
        "formatted_total": format_usd(result.total),
        "generated_at": generated_at,
    });

    if show_breakdown {
        output["breakdown"] = serde_json::to_value(estimator.breakdown())?;
    }
    if let Some(submission) = submission {
        output["submission"] = serde_json::to_value(submission)?;
    }

    Ok(output)
}
