//! Pricing engine. Pure functions of `(QuoteInput, PricingTable)`.
//!
//! Residential order of operations:
//! base (size * tier rate + rooms) -> deep-clean multiplier on base only ->
//! add extras -> frequency multiplier on the sum -> minimum -> round.
//!
//! Construction: size * complexity rate -> size-banded minimum -> round.

use crate::domain::model::{PricedResult, QuoteInput, Service};
use crate::domain::rates::PricingTable;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    SizeCharge,
    Bedrooms,
    Bathrooms,
    DeepClean,
    WindowCleaning,
    GarageCleaning,
    FrequencyDiscount,
    MinimumAdjustment,
}

impl LineKind {
    pub fn label(&self) -> &'static str {
        match self {
            LineKind::SizeCharge => "Base cleaning",
            LineKind::Bedrooms => "Bedrooms",
            LineKind::Bathrooms => "Bathrooms",
            LineKind::DeepClean => "Deep clean",
            LineKind::WindowCleaning => "Window cleaning",
            LineKind::GarageCleaning => "Garage cleaning",
            LineKind::FrequencyDiscount => "Frequency discount",
            LineKind::MinimumAdjustment => "Minimum charge adjustment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineItem {
    pub kind: LineKind,
    /// Unrounded dollars; discounts are negative.
    pub amount: f64,
}

/// Line items behind a quote, for the "estimate breakdown" panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub service: Service,
    pub size_sq_ft: f64,
    pub lines: Vec<LineItem>,
    /// Sum of the lines before the minimum is applied.
    pub subtotal: f64,
    pub result: PricedResult,
}

impl PriceBreakdown {
    pub fn line(&self, kind: LineKind) -> Option<&LineItem> {
        self.lines.iter().find(|line| line.kind == kind)
    }
}

pub fn price(input: &QuoteInput, table: &PricingTable) -> PricedResult {
    breakdown(input, table).result
}

pub fn breakdown(input: &QuoteInput, table: &PricingTable) -> PriceBreakdown {
    match input.service {
        Service::Residential => residential(input, table),
        Service::Construction => construction(input, table),
    }
}

fn residential(input: &QuoteInput, table: &PricingTable) -> PriceBreakdown {
    let rates = &table.residential;
    let size = input.size();
    let tier_rate = rates.tier_rate(size);
    let mut lines = Vec::new();

    let size_charge = size * tier_rate;
    let bedroom_charge = f64::from(input.bedrooms) * rates.bedroom_rate;
    let bathroom_charge = f64::from(input.bathrooms) * rates.bathroom_rate;
    lines.push(LineItem {
        kind: LineKind::SizeCharge,
        amount: size_charge,
    });
    if input.bedrooms > 0 {
        lines.push(LineItem {
            kind: LineKind::Bedrooms,
            amount: bedroom_charge,
        });
    }
    if input.bathrooms > 0 {
        lines.push(LineItem {
            kind: LineKind::Bathrooms,
            amount: bathroom_charge,
        });
    }

    let mut base = size_charge + bedroom_charge + bathroom_charge;
    if input.deep_clean {
        let multiplied = base * rates.deep_clean_multiplier;
        lines.push(LineItem {
            kind: LineKind::DeepClean,
            amount: multiplied - base,
        });
        base = multiplied;
    }

    let mut extras = 0.0;
    if input.window_cleaning {
        let charge = rates.window_cleaning.charge(size);
        lines.push(LineItem {
            kind: LineKind::WindowCleaning,
            amount: charge,
        });
        extras += charge;
    }
    if input.garage_cleaning {
        let charge = rates.garage_cleaning.charge(size);
        lines.push(LineItem {
            kind: LineKind::GarageCleaning,
            amount: charge,
        });
        extras += charge;
    }

    let undiscounted = base + extras;
    let total = undiscounted * rates.frequency_multipliers.for_frequency(input.frequency);
    if total != undiscounted {
        lines.push(LineItem {
            kind: LineKind::FrequencyDiscount,
            amount: total - undiscounted,
        });
    }

    let minimum = rates.minimum_for(input.frequency);
    finish(input.service, size, tier_rate, lines, total, minimum)
}

fn construction(input: &QuoteInput, table: &PricingTable) -> PriceBreakdown {
    let rates = &table.construction;
    let size = input.size();
    let rate = rates.complexity_rate(input.complexity);

    let total = size * rate;
    let lines = vec![LineItem {
        kind: LineKind::SizeCharge,
        amount: total,
    }];

    let minimum = rates.minimum_for(size);
    finish(input.service, size, rate, lines, total, minimum)
}

fn finish(
    service: Service,
    size: f64,
    base_rate_per_sq_ft: f64,
    mut lines: Vec<LineItem>,
    subtotal: f64,
    minimum: u64,
) -> PriceBreakdown {
    let floor = minimum as f64;
    let minimum_applied = subtotal < floor;
    let clamped = if minimum_applied {
        lines.push(LineItem {
            kind: LineKind::MinimumAdjustment,
            amount: floor - subtotal,
        });
        floor
    } else {
        subtotal
    };

    // clamped >= floor >= 0, so the cast only saturates on absurd sizes
    let total = clamped.round() as u64;
    let per_sq_ft = if size > 0.0 { total as f64 / size } else { 0.0 };

    PriceBreakdown {
        service,
        size_sq_ft: size,
        lines,
        subtotal,
        result: PricedResult {
            total,
            per_sq_ft,
            base_rate_per_sq_ft,
            minimum_charge: minimum,
            minimum_applied,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Complexity, Frequency};

    fn table() -> PricingTable {
        PricingTable::default()
    }

    fn bare_residential(size: f64) -> QuoteInput {
        QuoteInput::residential().with_size(size).with_rooms(0, 0)
    }

    #[test]
    fn test_standard_home() {
        // 1500 * 0.13 + 2 * 25 + 1 * 35 = 280
        let result = price(&QuoteInput::residential(), &table());
        assert_eq!(result.total, 280);
        assert_eq!(result.base_rate_per_sq_ft, 0.13);
        assert!(!result.minimum_applied);
        assert!((result.per_sq_ft - 280.0 / 1500.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_size_hits_one_time_minimum() {
        let result = price(&QuoteInput::residential().with_size(0.0), &table());
        assert_eq!(result.total, 120);
        assert_eq!(result.minimum_charge, 120);
        assert!(result.minimum_applied);
        assert_eq!(result.per_sq_ft, 0.0);
        assert_eq!(result.base_rate_per_sq_ft, 0.15);
    }

    #[test]
    fn test_recurring_minimum_is_lower() {
        let input = bare_residential(0.0).with_frequency(Frequency::Monthly);
        let result = price(&input, &table());
        assert_eq!(result.total, 100);
        assert_eq!(result.minimum_charge, 100);
    }

    #[test]
    fn test_weekly_discount() {
        let one_time = price(&QuoteInput::residential(), &table());
        let weekly = price(
            &QuoteInput::residential().with_frequency(Frequency::Weekly),
            &table(),
        );
        assert_eq!(weekly.total, 224);
        assert!(weekly.total < one_time.total);
    }

    #[test]
    fn test_deep_clean_excludes_extras() {
        // base 280 * 1.45 = 406, window max(150, 90) = 150, garage max(75, 75) = 75
        let input = QuoteInput::residential()
            .with_deep_clean(true)
            .with_window_cleaning(true)
            .with_garage_cleaning(true);
        let detail = breakdown(&input, &table());
        assert_eq!(detail.result.total, 631);
        assert_eq!(detail.line(LineKind::WindowCleaning).map(|l| l.amount), Some(150.0));
        let garage = detail.line(LineKind::GarageCleaning).map(|l| l.amount).unwrap_or(0.0);
        assert!((garage - 75.0).abs() < 1e-9);
        let uplift = detail.line(LineKind::DeepClean).map(|l| l.amount).unwrap_or(0.0);
        assert!((uplift - 126.0).abs() < 1e-9);
    }

    #[test]
    fn test_discount_applies_to_base_and_extras() {
        // (406 + 225) * 0.85 = 536.35
        let input = QuoteInput::residential()
            .with_deep_clean(true)
            .with_window_cleaning(true)
            .with_garage_cleaning(true)
            .with_frequency(Frequency::Biweekly);
        let detail = breakdown(&input, &table());
        assert_eq!(detail.result.total, 536);
        let discount = detail
            .line(LineKind::FrequencyDiscount)
            .map(|l| l.amount)
            .unwrap_or(0.0);
        assert!((discount + 631.0 * 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_lines_sum_to_total() {
        let input = QuoteInput::residential()
            .with_size(2400.0)
            .with_rooms(3, 2)
            .with_deep_clean(true)
            .with_window_cleaning(true)
            .with_frequency(Frequency::Monthly);
        let detail = breakdown(&input, &table());
        let sum: f64 = detail.lines.iter().map(|l| l.amount).sum();
        assert_eq!(sum.round() as u64, detail.result.total);
    }

    #[test]
    fn test_construction_medium() {
        let input = QuoteInput::construction();
        let result = price(&input, &table());
        assert_eq!(result.total, 2200);
        assert_eq!(result.base_rate_per_sq_ft, 0.22);
        assert_eq!(result.minimum_charge, 300);
        assert!((result.per_sq_ft - 0.22).abs() < 1e-12);
    }

    #[test]
    fn test_construction_small_job_minimum() {
        let input = QuoteInput::construction()
            .with_size(500.0)
            .with_complexity(Complexity::Low);
        let detail = breakdown(&input, &table());
        assert_eq!(detail.result.total, 350);
        assert!(detail.result.minimum_applied);
        let adjustment = detail
            .line(LineKind::MinimumAdjustment)
            .map(|l| l.amount)
            .unwrap_or(0.0);
        assert!((adjustment - 260.0).abs() < 1e-9);
    }

    #[test]
    fn test_construction_ignores_residential_fields() {
        let plain = QuoteInput::construction();
        let noisy = QuoteInput::construction()
            .with_rooms(9, 9)
            .with_deep_clean(true)
            .with_window_cleaning(true)
            .with_garage_cleaning(true)
            .with_frequency(Frequency::Weekly);
        assert_eq!(price(&plain, &table()), price(&noisy, &table()));
    }

    #[test]
    fn test_residential_ignores_complexity() {
        let low = QuoteInput::residential().with_complexity(Complexity::Low);
        let high = QuoteInput::residential().with_complexity(Complexity::High);
        assert_eq!(price(&low, &table()), price(&high, &table()));
    }

    #[test]
    fn test_out_of_domain_size_is_zero() {
        let negative = price(&bare_residential(-50.0), &table());
        let nan = price(&bare_residential(f64::NAN), &table());
        assert_eq!(negative.total, 120);
        assert_eq!(nan.total, 120);
        assert_eq!(negative.per_sq_ft, 0.0);
        assert_eq!(nan.per_sq_ft, 0.0);
    }

    #[test]
    fn test_custom_table_is_honored() {
        let mut custom = table();
        custom.residential.bedroom_rate = 40.0;
        // 1500 * 0.13 + 2 * 40 + 35 = 310
        assert_eq!(price(&QuoteInput::residential(), &custom).total, 310);
    }
}
