pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, OutputFormat};
pub use crate::config::{ContactSettings, PricingConfig};

pub use crate::core::estimator::{QuoteEstimator, QuoteSubmission};
pub use crate::core::message::{body, field_lines, mailto_uri, subject, QuoteRequest};
pub use crate::core::pricing::{breakdown, price, PriceBreakdown};
pub use crate::domain::form::QuoteForm;
pub use crate::domain::model::{Complexity, Frequency, PricedResult, QuoteInput, Service};
pub use crate::domain::rates::PricingTable;
pub use crate::utils::error::{QuoteError, Result};
