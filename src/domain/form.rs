//! Raw quote form as the shell collects it: every field is an optional string.
//! `normalize` never fails. Missing or non-numeric numbers become zero,
//! unknown enum values fall back to their defaults, and each coercion is
//! reported as a `FormIssue` so the caller can log it.

use crate::domain::model::{sanitize_amount, Complexity, Frequency, QuoteInput, Service};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteForm {
    pub service: Option<String>,
    #[serde(alias = "property_size", alias = "property_size_sq_ft")]
    pub size: Option<String>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub frequency: Option<String>,
    pub deep_clean: Option<String>,
    pub window_cleaning: Option<String>,
    pub garage_cleaning: Option<String>,
    pub complexity: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormIssue {
    pub field: &'static str,
    pub value: String,
    pub applied: String,
}

impl std::fmt::Display for FormIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: '{}' treated as {}", self.field, self.value, self.applied)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedForm {
    pub input: QuoteInput,
    pub issues: Vec<FormIssue>,
}

impl QuoteForm {
    pub fn normalize(&self) -> NormalizedForm {
        let mut issues = Vec::new();

        let service = parse_choice(
            "service",
            self.service.as_deref(),
            Service::parse,
            &mut issues,
        );
        let frequency = parse_choice(
            "frequency",
            self.frequency.as_deref(),
            Frequency::parse,
            &mut issues,
        );
        let complexity = parse_choice(
            "complexity",
            self.complexity.as_deref(),
            Complexity::parse,
            &mut issues,
        );

        let input = QuoteInput {
            service,
            property_size_sq_ft: parse_amount("size", self.size.as_deref(), &mut issues),
            bedrooms: parse_count("bedrooms", self.bedrooms.as_deref(), &mut issues),
            bathrooms: parse_count("bathrooms", self.bathrooms.as_deref(), &mut issues),
            frequency,
            deep_clean: parse_flag("deep_clean", self.deep_clean.as_deref(), &mut issues),
            window_cleaning: parse_flag(
                "window_cleaning",
                self.window_cleaning.as_deref(),
                &mut issues,
            ),
            garage_cleaning: parse_flag(
                "garage_cleaning",
                self.garage_cleaning.as_deref(),
                &mut issues,
            ),
            complexity,
            notes: self.notes.clone().unwrap_or_default(),
        };

        NormalizedForm { input, issues }
    }
}

fn blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_choice<T: Default + std::fmt::Display>(
    field: &'static str,
    raw: Option<&str>,
    parse: fn(&str) -> Option<T>,
    issues: &mut Vec<FormIssue>,
) -> T {
    let Some(value) = blank(raw) else {
        return T::default();
    };

    parse(value).unwrap_or_else(|| {
        let fallback = T::default();
        issues.push(FormIssue {
            field,
            value: value.to_string(),
            applied: fallback.to_string(),
        });
        fallback
    })
}

/// Thousands separators and a leading `$` are tolerated, e.g. `"1,500"`.
fn parse_amount(field: &'static str, raw: Option<&str>, issues: &mut Vec<FormIssue>) -> f64 {
    let Some(value) = blank(raw) else {
        return 0.0;
    };

    let cleaned: String = value.chars().filter(|c| !matches!(c, ',' | '$')).collect();
    match cleaned.trim().parse::<f64>() {
        Ok(number) if number.is_finite() && number >= 0.0 => number,
        _ => {
            issues.push(FormIssue {
                field,
                value: value.to_string(),
                applied: "0".to_string(),
            });
            0.0
        }
    }
}

/// Room counts are whole numbers; fractions round down.
fn parse_count(field: &'static str, raw: Option<&str>, issues: &mut Vec<FormIssue>) -> u32 {
    let Some(value) = blank(raw) else {
        return 0;
    };

    if let Ok(count) = value.parse::<u32>() {
        return count;
    }

    let amount = sanitize_amount(value.parse::<f64>().unwrap_or(0.0));
    let count = amount.floor().min(u32::MAX as f64) as u32;
    issues.push(FormIssue {
        field,
        value: value.to_string(),
        applied: count.to_string(),
    });
    count
}

fn parse_flag(field: &'static str, raw: Option<&str>, issues: &mut Vec<FormIssue>) -> bool {
    let Some(value) = blank(raw) else {
        return false;
    };

    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "on" | "checked" | "x" => true,
        "false" | "no" | "n" | "0" | "off" => false,
        _ => {
            issues.push(FormIssue {
                field,
                value: value.to_string(),
                applied: "false".to_string(),
            });
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> QuoteForm {
        QuoteForm {
            service: Some("residential".to_string()),
            size: Some("1,500".to_string()),
            bedrooms: Some("2".to_string()),
            bathrooms: Some("1".to_string()),
            frequency: Some("weekly".to_string()),
            deep_clean: Some("yes".to_string()),
            ..QuoteForm::default()
        }
    }

    #[test]
    fn test_clean_form_has_no_issues() {
        let normalized = form().normalize();
        assert!(normalized.issues.is_empty());
        assert_eq!(normalized.input.property_size_sq_ft, 1500.0);
        assert_eq!(normalized.input.bedrooms, 2);
        assert_eq!(normalized.input.frequency, Frequency::Weekly);
        assert!(normalized.input.deep_clean);
        assert!(!normalized.input.window_cleaning);
    }

    #[test]
    fn test_empty_form_is_all_zero() {
        let normalized = QuoteForm::default().normalize();
        assert!(normalized.issues.is_empty());
        assert_eq!(normalized.input.service, Service::Residential);
        assert_eq!(normalized.input.property_size_sq_ft, 0.0);
        assert_eq!(normalized.input.bedrooms, 0);
        assert_eq!(normalized.input.bathrooms, 0);
        assert_eq!(normalized.input.complexity, Complexity::Medium);
        assert_eq!(normalized.input.notes, "");
    }

    #[test]
    fn test_garbage_numbers_become_zero() {
        let raw = QuoteForm {
            size: Some("big".to_string()),
            bedrooms: Some("-3".to_string()),
            bathrooms: Some("2.7".to_string()),
            ..QuoteForm::default()
        };
        let normalized = raw.normalize();
        assert_eq!(normalized.input.property_size_sq_ft, 0.0);
        assert_eq!(normalized.input.bedrooms, 0);
        assert_eq!(normalized.input.bathrooms, 2);
        let fields: Vec<&str> = normalized.issues.iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["size", "bedrooms", "bathrooms"]);
    }

    #[test]
    fn test_negative_and_infinite_size_rejected() {
        for raw in ["-100", "inf", "NaN"] {
            let normalized = QuoteForm {
                size: Some(raw.to_string()),
                ..QuoteForm::default()
            }
            .normalize();
            assert_eq!(normalized.input.property_size_sq_ft, 0.0, "input {raw}");
            assert_eq!(normalized.issues.len(), 1);
        }
    }

    #[test]
    fn test_unknown_choices_fall_back() {
        let raw = QuoteForm {
            service: Some("spaceship".to_string()),
            frequency: Some("hourly".to_string()),
            complexity: Some("extreme".to_string()),
            ..QuoteForm::default()
        };
        let normalized = raw.normalize();
        assert_eq!(normalized.input.service, Service::Residential);
        assert_eq!(normalized.input.frequency, Frequency::OneTime);
        assert_eq!(normalized.input.complexity, Complexity::Medium);
        assert_eq!(normalized.issues.len(), 3);
        assert_eq!(
            normalized.issues[1].to_string(),
            "frequency: 'hourly' treated as One-time"
        );
    }

    #[test]
    fn test_notes_pass_through_verbatim() {
        let raw = QuoteForm {
            notes: Some("  Gate code 42 & a dog named \"Rex\"\n".to_string()),
            ..QuoteForm::default()
        };
        assert_eq!(
            raw.normalize().input.notes,
            "  Gate code 42 & a dog named \"Rex\"\n"
        );
    }
}
