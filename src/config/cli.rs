use crate::config::toml_config::{DEFAULT_BUSINESS_NAME, DEFAULT_RECIPIENT};
use crate::domain::form::QuoteForm;
use crate::domain::model::{QuoteInput, Service};
use crate::domain::ports::ContactProvider;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Numbers and choices are taken as text and normalized like the web form,
/// so `--size abc` prices as zero instead of failing.
#[derive(Debug, Clone, Parser)]
#[command(name = "mb-quote")]
#[command(about = "Instant cleaning quote estimate for residential and construction jobs")]
pub struct CliConfig {
    /// residential or construction
    #[arg(long, default_value = "residential")]
    pub service: String,

    /// Property or project size in square feet (defaults to 1500 / 10000)
    #[arg(long)]
    pub size: Option<String>,

    #[arg(long)]
    pub bedrooms: Option<String>,

    #[arg(long)]
    pub bathrooms: Option<String>,

    /// one-time, weekly, biweekly or monthly
    #[arg(long, default_value = "one-time")]
    pub frequency: String,

    #[arg(long)]
    pub deep_clean: bool,

    #[arg(long)]
    pub window_cleaning: bool,

    #[arg(long)]
    pub garage_cleaning: bool,

    /// low, medium or high
    #[arg(long, default_value = "medium")]
    pub complexity: String,

    #[arg(long, default_value = "")]
    pub notes: String,

    /// Pricing TOML file overriding the published rates
    #[arg(short, long)]
    pub config: Option<String>,

    /// Overrides the recipient from the pricing file
    #[arg(long)]
    pub recipient: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the mailto: link for the quote request
    #[arg(long)]
    pub mailto: bool,

    /// Print the line items behind the estimate
    #[arg(long)]
    pub breakdown: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Unset numeric arguments take the service's form defaults.
    pub fn to_form(&self) -> QuoteForm {
        let defaults = QuoteInput::for_service(Service::from_form_value(&self.service));
        let or_default = |value: &Option<String>, default: String| {
            Some(value.clone().unwrap_or(default))
        };

        QuoteForm {
            service: Some(self.service.clone()),
            size: or_default(&self.size, defaults.property_size_sq_ft.to_string()),
            bedrooms: or_default(&self.bedrooms, defaults.bedrooms.to_string()),
            bathrooms: or_default(&self.bathrooms, defaults.bathrooms.to_string()),
            frequency: Some(self.frequency.clone()),
            deep_clean: Some(self.deep_clean.to_string()),
            window_cleaning: Some(self.window_cleaning.to_string()),
            garage_cleaning: Some(self.garage_cleaning.to_string()),
            complexity: Some(self.complexity.clone()),
            notes: Some(self.notes.clone()),
        }
    }
}

impl ContactProvider for CliConfig {
    fn recipient(&self) -> &str {
        self.recipient.as_deref().unwrap_or(DEFAULT_RECIPIENT)
    }

    fn business_name(&self) -> &str {
        DEFAULT_BUSINESS_NAME
    }
}
