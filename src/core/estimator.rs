use crate::core::message::{self, QuoteRequest};
use crate::core::pricing::{self, PriceBreakdown};
use crate::domain::form::QuoteForm;
use crate::domain::model::{Complexity, Frequency, PricedResult, QuoteInput, Service};
use crate::domain::ports::ContactProvider;
use crate::domain::rates::PricingTable;
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteSubmission {
    pub request: QuoteRequest,
    pub subject: String,
    pub body: String,
    pub mailto: String,
}

/// One quote form session: owns the input, reprices on every change.
pub struct QuoteEstimator {
    table: PricingTable,
    input: QuoteInput,
    result: PricedResult,
}

impl QuoteEstimator {
    pub fn new(service: Service, table: PricingTable) -> Self {
        Self::with_input(QuoteInput::for_service(service), table)
    }

    pub fn with_input(input: QuoteInput, table: PricingTable) -> Self {
        let result = pricing::price(&input, &table);
        Self {
            table,
            input,
            result,
        }
    }

    pub fn input(&self) -> &QuoteInput {
        &self.input
    }

    pub fn result(&self) -> PricedResult {
        self.result
    }

    pub fn table(&self) -> &PricingTable {
        &self.table
    }

    pub fn breakdown(&self) -> PriceBreakdown {
        pricing::breakdown(&self.input, &self.table)
    }

    /// Switching service starts from that service's form defaults; notes carry over.
    pub fn set_service(&mut self, service: Service) -> PricedResult {
        if service == self.input.service {
            return self.result;
        }
        let notes = std::mem::take(&mut self.input.notes);
        self.input = QuoteInput::for_service(service).with_notes(notes);
        self.recompute()
    }

    pub fn set_property_size(&mut self, property_size_sq_ft: f64) -> PricedResult {
        self.input.property_size_sq_ft = property_size_sq_ft;
        self.recompute()
    }

    pub fn set_bedrooms(&mut self, bedrooms: u32) -> PricedResult {
        self.input.bedrooms = bedrooms;
        self.recompute()
    }

    pub fn set_bathrooms(&mut self, bathrooms: u32) -> PricedResult {
        self.input.bathrooms = bathrooms;
        self.recompute()
    }

    pub fn set_frequency(&mut self, frequency: Frequency) -> PricedResult {
        self.input.frequency = frequency;
        self.recompute()
    }

    pub fn set_deep_clean(&mut self, deep_clean: bool) -> PricedResult {
        self.input.deep_clean = deep_clean;
        self.recompute()
    }

    pub fn set_window_cleaning(&mut self, window_cleaning: bool) -> PricedResult {
        self.input.window_cleaning = window_cleaning;
        self.recompute()
    }

    pub fn set_garage_cleaning(&mut self, garage_cleaning: bool) -> PricedResult {
        self.input.garage_cleaning = garage_cleaning;
        self.recompute()
    }

    pub fn set_complexity(&mut self, complexity: Complexity) -> PricedResult {
        self.input.complexity = complexity;
        self.recompute()
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) -> PricedResult {
        self.input.notes = notes.into();
        self.result
    }

    /// Replaces the whole input with a normalized raw form.
    pub fn apply_form(&mut self, form: &QuoteForm) -> PricedResult {
        let normalized = form.normalize();
        for issue in &normalized.issues {
            tracing::warn!("⚠️ Form value normalized: {}", issue);
        }
        self.input = normalized.input;
        self.recompute()
    }

    pub fn submit(&self, contact: &impl ContactProvider) -> Result<QuoteSubmission> {
        let mailto = message::mailto_uri(contact.recipient(), &self.input, &self.result)?;
        tracing::info!(
            "📨 Quote request prepared for {}: {} {}",
            contact.business_name(),
            self.input.service,
            self.result.total
        );

        Ok(QuoteSubmission {
            request: QuoteRequest::new(&self.input, &self.result),
            subject: message::subject(&self.input),
            body: message::body(&self.input, &self.result),
            mailto,
        })
    }

    fn recompute(&mut self) -> PricedResult {
        self.result = pricing::price(&self.input, &self.table);
        tracing::debug!(
            "Repriced {} quote: total={} per_sq_ft={:.4} minimum_applied={}",
            self.input.service,
            self.result.total,
            self.result.per_sq_ft,
            self.result.minimum_applied
        );
        self.result
    }
}
