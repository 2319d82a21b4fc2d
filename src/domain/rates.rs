//! Rate tables the pricing engine reads. `Default` carries the published
//! price list; a TOML file may override any subset of keys.

use crate::domain::model::{Complexity, Frequency};
use crate::utils::error::{QuoteError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

/// Upper bound lookup shared by rate tiers and minimum bands.
pub trait SizeBand {
    /// Exclusive upper bound in square feet; `None` for the open-ended last band.
    fn up_to(&self) -> Option<f64>;
}

/// First band whose bound is open or strictly above `size`. Falls back to the
/// last band so an unvalidated table still prices something.
pub fn select_band<B: SizeBand>(bands: &[B], size: f64) -> Option<&B> {
    bands
        .iter()
        .find(|band| band.up_to().map_or(true, |up_to| size < up_to))
        .or_else(|| bands.last())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateTier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to: Option<f64>,
    pub rate: f64,
}

impl SizeBand for RateTier {
    fn up_to(&self) -> Option<f64> {
        self.up_to
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimumBand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to: Option<f64>,
    pub minimum: u64,
}

impl SizeBand for MinimumBand {
    fn up_to(&self) -> Option<f64> {
        self.up_to
    }
}

/// An optional service charged at `max(minimum, size * rate_per_sq_ft)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AddOnRate {
    pub rate_per_sq_ft: f64,
    pub minimum: f64,
}

impl AddOnRate {
    pub fn charge(&self, size: f64) -> f64 {
        self.minimum.max(size * self.rate_per_sq_ft)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyMultipliers {
    pub one_time: f64,
    pub weekly: f64,
    pub biweekly: f64,
    pub monthly: f64,
}

impl FrequencyMultipliers {
    pub fn for_frequency(&self, frequency: Frequency) -> f64 {
        match frequency {
            Frequency::OneTime => self.one_time,
            Frequency::Weekly => self.weekly,
            Frequency::Biweekly => self.biweekly,
            Frequency::Monthly => self.monthly,
        }
    }
}

impl Default for FrequencyMultipliers {
    fn default() -> Self {
        Self {
            one_time: 1.0,
            weekly: 0.80,
            biweekly: 0.85,
            monthly: 0.90,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResidentialRates {
    pub size_tiers: Vec<RateTier>,
    pub bedroom_rate: f64,
    pub bathroom_rate: f64,
    pub deep_clean_multiplier: f64,
    pub window_cleaning: AddOnRate,
    pub garage_cleaning: AddOnRate,
    pub frequency_multipliers: FrequencyMultipliers,
    pub one_time_minimum: u64,
    pub recurring_minimum: u64,
}

impl ResidentialRates {
    pub fn tier_rate(&self, size: f64) -> f64 {
        select_band(&self.size_tiers, size).map_or(0.0, |tier| tier.rate)
    }

    pub fn minimum_for(&self, frequency: Frequency) -> u64 {
        if frequency.is_recurring() {
            self.recurring_minimum
        } else {
            self.one_time_minimum
        }
    }
}

impl Default for ResidentialRates {
    fn default() -> Self {
        Self {
            size_tiers: vec![
                RateTier {
                    up_to: Some(1000.0),
                    rate: 0.15,
                },
                RateTier {
                    up_to: Some(2000.0),
                    rate: 0.13,
                },
                RateTier {
                    up_to: Some(3000.0),
                    rate: 0.11,
                },
                RateTier {
                    up_to: None,
                    rate: 0.10,
                },
            ],
            bedroom_rate: 25.0,
            bathroom_rate: 35.0,
            deep_clean_multiplier: 1.45,
            window_cleaning: AddOnRate {
                rate_per_sq_ft: 0.06,
                minimum: 150.0,
            },
            garage_cleaning: AddOnRate {
                rate_per_sq_ft: 0.05,
                minimum: 75.0,
            },
            frequency_multipliers: FrequencyMultipliers::default(),
            one_time_minimum: 120,
            recurring_minimum: 100,
        }
    }
}

impl Validate for ResidentialRates {
    fn validate(&self) -> Result<()> {
        let bounds: Vec<Option<f64>> = self.size_tiers.iter().map(|t| t.up_to).collect();
        validation::validate_band_bounds("residential.size_tiers", &bounds)?;
        for (index, tier) in self.size_tiers.iter().enumerate() {
            validation::validate_non_negative(
                &format!("residential.size_tiers[{}].rate", index),
                tier.rate,
            )?;
        }

        validation::validate_non_negative("residential.bedroom_rate", self.bedroom_rate)?;
        validation::validate_non_negative("residential.bathroom_rate", self.bathroom_rate)?;
        validation::validate_range(
            "residential.deep_clean_multiplier",
            self.deep_clean_multiplier,
            1.0,
            10.0,
        )?;

        for (name, add_on) in [
            ("residential.window_cleaning", &self.window_cleaning),
            ("residential.garage_cleaning", &self.garage_cleaning),
        ] {
            validation::validate_non_negative(
                &format!("{}.rate_per_sq_ft", name),
                add_on.rate_per_sq_ft,
            )?;
            validation::validate_non_negative(&format!("{}.minimum", name), add_on.minimum)?;
        }

        let m = &self.frequency_multipliers;
        for (name, value) in [
            ("one_time", m.one_time),
            ("weekly", m.weekly),
            ("biweekly", m.biweekly),
            ("monthly", m.monthly),
        ] {
            validation::validate_range(
                &format!("residential.frequency_multipliers.{}", name),
                value,
                f64::MIN_POSITIVE,
                1.0,
            )?;
        }
        // 越頻繁折扣越多
        if !(m.weekly <= m.biweekly && m.biweekly <= m.monthly && m.monthly <= m.one_time) {
            return Err(QuoteError::ConfigValidationError {
                field: "residential.frequency_multipliers".to_string(),
                message: "Discounts must grow as frequency shortens (weekly <= biweekly <= monthly <= one_time)"
                    .to_string(),
            });
        }

        if self.recurring_minimum > self.one_time_minimum {
            return Err(QuoteError::ConfigValidationError {
                field: "residential.recurring_minimum".to_string(),
                message: format!(
                    "Recurring minimum {} cannot exceed the one-time minimum {}",
                    self.recurring_minimum, self.one_time_minimum
                ),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructionRates {
    pub low_rate: f64,
    pub medium_rate: f64,
    pub high_rate: f64,
    pub minimum_bands: Vec<MinimumBand>,
}

impl ConstructionRates {
    pub fn complexity_rate(&self, complexity: Complexity) -> f64 {
        match complexity {
            Complexity::Low => self.low_rate,
            Complexity::Medium => self.medium_rate,
            Complexity::High => self.high_rate,
        }
    }

    pub fn minimum_for(&self, size: f64) -> u64 {
        select_band(&self.minimum_bands, size).map_or(0, |band| band.minimum)
    }
}

impl Default for ConstructionRates {
    fn default() -> Self {
        Self {
            low_rate: 0.18,
            medium_rate: 0.22,
            high_rate: 0.30,
            minimum_bands: vec![
                MinimumBand {
                    up_to: Some(5000.0),
                    minimum: 350,
                },
                MinimumBand {
                    up_to: Some(15000.0),
                    minimum: 300,
                },
                MinimumBand {
                    up_to: None,
                    minimum: 250,
                },
            ],
        }
    }
}

impl Validate for ConstructionRates {
    fn validate(&self) -> Result<()> {
        validation::validate_non_negative("construction.low_rate", self.low_rate)?;
        validation::validate_non_negative("construction.medium_rate", self.medium_rate)?;
        validation::validate_non_negative("construction.high_rate", self.high_rate)?;
        if !(self.low_rate < self.medium_rate && self.medium_rate < self.high_rate) {
            return Err(QuoteError::ConfigValidationError {
                field: "construction".to_string(),
                message: "Complexity rates must increase: low_rate < medium_rate < high_rate"
                    .to_string(),
            });
        }

        let bounds: Vec<Option<f64>> = self.minimum_bands.iter().map(|b| b.up_to).collect();
        validation::validate_band_bounds("construction.minimum_bands", &bounds)?;
        // 大案量的最低收費不可高於小案
        for (index, pair) in self.minimum_bands.windows(2).enumerate() {
            if pair[1].minimum > pair[0].minimum {
                return Err(QuoteError::InvalidConfigValueError {
                    field: format!("construction.minimum_bands[{}].minimum", index + 1),
                    value: pair[1].minimum.to_string(),
                    reason: format!(
                        "Larger projects cannot have a higher minimum than {}",
                        pair[0].minimum
                    ),
                });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingTable {
    pub residential: ResidentialRates,
    pub construction: ConstructionRates,
}

impl Validate for PricingTable {
    fn validate(&self) -> Result<()> {
        self.residential.validate()?;
        self.construction.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        assert!(PricingTable::default().validate().is_ok());
    }

    #[test]
    fn test_tier_boundaries_are_closed_below() {
        let rates = ResidentialRates::default();
        assert_eq!(rates.tier_rate(0.0), 0.15);
        assert_eq!(rates.tier_rate(999.99), 0.15);
        assert_eq!(rates.tier_rate(1000.0), 0.13);
        assert_eq!(rates.tier_rate(1999.0), 0.13);
        assert_eq!(rates.tier_rate(2000.0), 0.11);
        assert_eq!(rates.tier_rate(3000.0), 0.10);
        assert_eq!(rates.tier_rate(1_000_000.0), 0.10);
    }

    #[test]
    fn test_construction_minimum_bands() {
        let rates = ConstructionRates::default();
        assert_eq!(rates.minimum_for(0.0), 350);
        assert_eq!(rates.minimum_for(4999.0), 350);
        assert_eq!(rates.minimum_for(5000.0), 300);
        assert_eq!(rates.minimum_for(14999.0), 300);
        assert_eq!(rates.minimum_for(15000.0), 250);
    }

    #[test]
    fn test_add_on_charge_uses_minimum() {
        let window = ResidentialRates::default().window_cleaning;
        assert_eq!(window.charge(0.0), 150.0);
        assert_eq!(window.charge(5000.0), 300.0);
    }

    #[test]
    fn test_select_band_falls_back_to_last() {
        let tiers = vec![RateTier {
            up_to: Some(100.0),
            rate: 1.0,
        }];
        assert_eq!(select_band(&tiers, 500.0).map(|t| t.rate), Some(1.0));
        let empty: Vec<RateTier> = Vec::new();
        assert!(select_band(&empty, 500.0).is_none());
    }

    #[test]
    fn test_rejects_inverted_discounts() {
        let mut table = PricingTable::default();
        table.residential.frequency_multipliers.weekly = 0.95;
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_rejects_unordered_complexity_rates() {
        let mut table = PricingTable::default();
        table.construction.high_rate = 0.20;
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_rejects_rising_construction_minimums() {
        let mut table = PricingTable::default();
        table.construction.minimum_bands[2].minimum = 500;
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_rejects_deep_clean_discount() {
        let mut table = PricingTable::default();
        table.residential.deep_clean_multiplier = 0.9;
        assert!(table.validate().is_err());
    }
}
