//! Quote request message: subject, plain-text body and the `mailto:` hand-off.
//! Nothing here sends anything; the caller dispatches the URI.

use crate::core::presentation::{format_rate, format_sq_ft, format_usd};
use crate::domain::model::{Complexity, Frequency, PricedResult, QuoteInput, Service};
use crate::utils::error::Result;
use crate::utils::validation::{validate_email, validate_mailto};
use serde::{Deserialize, Serialize};

pub fn subject(input: &QuoteInput) -> String {
    match input.service {
        Service::Residential => "Residential Cleaning Quote Request".to_string(),
        Service::Construction => "Construction Cleanup Quote Request".to_string(),
    }
}

/// Label/value pairs for the fields that belong to the selected service, in
/// display order. Add-ons appear only when at least one is selected.
pub fn field_lines(input: &QuoteInput) -> Vec<(&'static str, String)> {
    let mut fields = Vec::new();

    match input.service {
        Service::Residential => {
            fields.push(("Property size", format_sq_ft(input.size())));
            fields.push(("Bedrooms", input.bedrooms.to_string()));
            fields.push(("Bathrooms", input.bathrooms.to_string()));
            fields.push(("Frequency", input.frequency.to_string()));
            let add_ons = input.selected_add_ons();
            if !add_ons.is_empty() {
                fields.push(("Add-ons", add_ons.join(", ")));
            }
        }
        Service::Construction => {
            fields.push(("Project size", format_sq_ft(input.size())));
            fields.push(("Complexity", input.complexity.to_string()));
        }
    }

    fields
}

pub fn body(input: &QuoteInput, result: &PricedResult) -> String {
    let greeting = match input.service {
        Service::Residential => "Hello, I'd like a quote for residential cleaning.",
        Service::Construction => "Hello, I'd like a quote for post-construction cleanup.",
    };

    let mut lines = vec![
        greeting.to_string(),
        String::new(),
        format!("Service: {}", input.service),
    ];
    for (label, value) in field_lines(input) {
        lines.push(format!("{}: {}", label, value));
    }

    lines.push(String::new());
    lines.push(format!("Estimated total: {}", format_usd(result.total)));
    if result.has_per_sq_ft() {
        lines.push(format!("Per sq ft: {}", format_rate(result.per_sq_ft)));
    }

    if !input.notes.trim().is_empty() {
        lines.push(String::new());
        lines.push("Notes:".to_string());
        lines.push(input.notes.clone());
    }

    lines.join("\n")
}

/// `mailto:` URI with a percent-encoded subject and body. Body line breaks
/// are sent as CRLF.
pub fn mailto_uri(recipient: &str, input: &QuoteInput, result: &PricedResult) -> Result<String> {
    validate_email("contact.recipient", recipient)?;

    let body = body(input, result).replace('\n', "\r\n");
    let uri = format!(
        "mailto:{}?subject={}&body={}",
        recipient,
        urlencoding::encode(&subject(input)),
        urlencoding::encode(&body)
    );

    validate_mailto(&uri)?;
    Ok(uri)
}

/// Structured copy of a submitted request. Only fields that belong to the
/// selected service are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub service: Service,
    pub property_size_sq_ft: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_clean: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_cleaning: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub garage_cleaning: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Complexity>,
    pub notes: String,
    pub estimate: u64,
}

impl QuoteRequest {
    pub fn new(input: &QuoteInput, result: &PricedResult) -> Self {
        let residential = input.service == Service::Residential;

        Self {
            service: input.service,
            property_size_sq_ft: input.size(),
            bedrooms: residential.then_some(input.bedrooms),
            bathrooms: residential.then_some(input.bathrooms),
            frequency: residential.then_some(input.frequency),
            deep_clean: residential.then_some(input.deep_clean),
            window_cleaning: residential.then_some(input.window_cleaning),
            garage_cleaning: residential.then_some(input.garage_cleaning),
            complexity: (!residential).then_some(input.complexity),
            notes: input.notes.clone(),
            estimate: result.total,
        }
    }
}
