use serde::{Deserialize, Serialize};
use std::fmt;

/// Service line. Selects which fields and pricing rules apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Service {
    #[default]
    Residential,
    Construction,
}

impl Service {
    /// Lenient parse of a form value; anything unrecognized is `Residential`.
    pub fn from_form_value(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    pub fn parse(value: &str) -> Option<Self> {
        match normalize_token(value).as_str() {
            "residential" | "home" | "house" => Some(Service::Residential),
            "construction" | "post-construction" | "commercial" => Some(Service::Construction),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Residential => "residential",
            Service::Construction => "construction",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Residential => write!(f, "Residential"),
            Service::Construction => write!(f, "Construction"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    #[default]
    OneTime,
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    /// Lenient parse of a form value; anything unrecognized is `OneTime`.
    pub fn from_form_value(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    pub fn parse(value: &str) -> Option<Self> {
        match normalize_token(value).as_str() {
            "one-time" | "onetime" | "once" | "single" => Some(Frequency::OneTime),
            "weekly" => Some(Frequency::Weekly),
            "biweekly" | "bi-weekly" | "fortnightly" => Some(Frequency::Biweekly),
            "monthly" => Some(Frequency::Monthly),
            _ => None,
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Frequency::OneTime)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::OneTime => "one-time",
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::OneTime => write!(f, "One-time"),
            Frequency::Weekly => write!(f, "Weekly"),
            Frequency::Biweekly => write!(f, "Bi-weekly"),
            Frequency::Monthly => write!(f, "Monthly"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Complexity {
    Low,
    #[default]
    Medium,
    High,
}

impl Complexity {
    /// Lenient parse of a form value; anything unrecognized is `Medium`.
    pub fn from_form_value(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    pub fn parse(value: &str) -> Option<Self> {
        match normalize_token(value).as_str() {
            "low" | "light" => Some(Complexity::Low),
            "medium" | "standard" => Some(Complexity::Medium),
            "high" | "heavy" => Some(Complexity::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Complexity::Low => write!(f, "Low"),
            Complexity::Medium => write!(f, "Medium"),
            Complexity::High => write!(f, "High"),
        }
    }
}

fn normalize_token(value: &str) -> String {
    value
        .trim()
        .to_ascii_lowercase()
        .replace(|c: char| c == '_' || c.is_whitespace(), "-")
}

/// Replaces negative, NaN and infinite amounts with zero.
pub fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// One estimator session's input. Fields that do not belong to `service`
/// are kept (the form may hold them) but never priced or printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteInput {
    pub service: Service,
    pub property_size_sq_ft: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub frequency: Frequency,
    pub deep_clean: bool,
    pub window_cleaning: bool,
    pub garage_cleaning: bool,
    pub complexity: Complexity,
    pub notes: String,
}

impl QuoteInput {
    /// The values the quote form starts with for each service line.
    pub fn for_service(service: Service) -> Self {
        let property_size_sq_ft = match service {
            Service::Residential => 1500.0,
            Service::Construction => 10000.0,
        };

        Self {
            service,
            property_size_sq_ft,
            bedrooms: 2,
            bathrooms: 1,
            frequency: Frequency::OneTime,
            deep_clean: false,
            window_cleaning: false,
            garage_cleaning: false,
            complexity: Complexity::Medium,
            notes: String::new(),
        }
    }

    pub fn residential() -> Self {
        Self::for_service(Service::Residential)
    }

    pub fn construction() -> Self {
        Self::for_service(Service::Construction)
    }

    /// Property size with out-of-domain values treated as zero.
    pub fn size(&self) -> f64 {
        sanitize_amount(self.property_size_sq_ft)
    }

    pub fn with_size(mut self, property_size_sq_ft: f64) -> Self {
        self.property_size_sq_ft = property_size_sq_ft;
        self
    }

    pub fn with_rooms(mut self, bedrooms: u32, bathrooms: u32) -> Self {
        self.bedrooms = bedrooms;
        self.bathrooms = bathrooms;
        self
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn with_deep_clean(mut self, deep_clean: bool) -> Self {
        self.deep_clean = deep_clean;
        self
    }

    pub fn with_window_cleaning(mut self, window_cleaning: bool) -> Self {
        self.window_cleaning = window_cleaning;
        self
    }

    pub fn with_garage_cleaning(mut self, garage_cleaning: bool) -> Self {
        self.garage_cleaning = garage_cleaning;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Names of the selected residential add-ons, in display order.
    pub fn selected_add_ons(&self) -> Vec<&'static str> {
        if self.service != Service::Residential {
            return Vec::new();
        }

        let mut add_ons = Vec::new();
        if self.deep_clean {
            add_ons.push("Deep clean");
        }
        if self.window_cleaning {
            add_ons.push("Window cleaning");
        }
        if self.garage_cleaning {
            add_ons.push("Garage cleaning");
        }
        add_ons
    }
}

impl Default for QuoteInput {
    fn default() -> Self {
        Self::residential()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricedResult {
    /// Whole dollars, never below `minimum_charge`.
    pub total: u64,
    /// `total / size`, or 0 when the size is 0.
    pub per_sq_ft: f64,
    pub base_rate_per_sq_ft: f64,
    pub minimum_charge: u64,
    pub minimum_applied: bool,
}

impl PricedResult {
    pub fn has_per_sq_ft(&self) -> bool {
        self.per_sq_ft > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_fallbacks() {
        assert_eq!(Frequency::from_form_value("Bi-Weekly"), Frequency::Biweekly);
        assert_eq!(Frequency::from_form_value("one_time"), Frequency::OneTime);
        assert_eq!(Frequency::from_form_value("daily"), Frequency::OneTime);
        assert_eq!(Complexity::from_form_value("HIGH"), Complexity::High);
        assert_eq!(Complexity::from_form_value("extreme"), Complexity::Medium);
        assert_eq!(Service::from_form_value(" construction "), Service::Construction);
        assert_eq!(Service::from_form_value(""), Service::Residential);
    }

    #[test]
    fn test_wire_names_match_form_options() {
        let json = serde_json::to_string(&Frequency::OneTime).unwrap();
        assert_eq!(json, "\"one-time\"");
        let parsed: Frequency = serde_json::from_str("\"biweekly\"").unwrap();
        assert_eq!(parsed, Frequency::Biweekly);
        assert_eq!(Frequency::Biweekly.as_str(), "biweekly");
    }

    #[test]
    fn test_service_defaults() {
        let residential = QuoteInput::residential();
        assert_eq!(residential.property_size_sq_ft, 1500.0);
        assert_eq!((residential.bedrooms, residential.bathrooms), (2, 1));
        assert_eq!(residential.frequency, Frequency::OneTime);

        let construction = QuoteInput::construction();
        assert_eq!(construction.property_size_sq_ft, 10000.0);
        assert_eq!(construction.complexity, Complexity::Medium);
    }

    #[test]
    fn test_size_is_sanitized() {
        assert_eq!(QuoteInput::residential().with_size(-10.0).size(), 0.0);
        assert_eq!(QuoteInput::residential().with_size(f64::NAN).size(), 0.0);
        assert_eq!(QuoteInput::residential().with_size(f64::INFINITY).size(), 0.0);
        assert_eq!(QuoteInput::residential().with_size(812.5).size(), 812.5);
    }

    #[test]
    fn test_add_ons_only_for_residential() {
        let input = QuoteInput::residential()
            .with_deep_clean(true)
            .with_garage_cleaning(true);
        assert_eq!(input.selected_add_ons(), vec!["Deep clean", "Garage cleaning"]);

        let construction = QuoteInput::construction().with_window_cleaning(true);
        assert!(construction.selected_add_ons().is_empty());
    }
}
