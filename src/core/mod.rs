pub mod batch;
pub mod estimator;
pub mod message;
pub mod presentation;
pub mod pricing;

pub use crate::domain::model::{Complexity, Frequency, PricedResult, QuoteInput, Service};
pub use crate::domain::ports::ContactProvider;
pub use crate::domain::rates::PricingTable;
pub use crate::utils::error::Result;
