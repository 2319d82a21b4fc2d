use crate::utils::error::{QuoteError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Checks that a recipient looks like `local@domain.tld` and can sit in a `mailto:` URI.
pub fn validate_email(field_name: &str, address: &str) -> Result<()> {
    let invalid = |reason: &str| QuoteError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: address.to_string(),
        reason: reason.to_string(),
    };

    if address.trim().is_empty() {
        return Err(invalid("Email address cannot be empty"));
    }

    if address
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '?' | '&' | '#' | '/' | ',' | ';'))
    {
        return Err(invalid(
            "Email address cannot contain whitespace or URI delimiters",
        ));
    }

    let (local, domain) = match address.split_once('@') {
        Some(parts) => parts,
        None => return Err(invalid("Email address must contain '@'")),
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid("Email address must look like name@example.com"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("Email domain must contain a dot, e.g. mb.cleaning"));
    }

    Ok(())
}

pub fn validate_mailto(uri: &str) -> Result<Url> {
    let url = Url::parse(uri).map_err(|e| QuoteError::MessageError {
        message: format!("Invalid mailto URI: {}", e),
    })?;

    if url.scheme() != "mailto" {
        return Err(QuoteError::MessageError {
            message: format!("Unsupported URI scheme: {}", url.scheme()),
        });
    }

    Ok(url)
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(QuoteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number that is not negative".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(QuoteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if !(value >= min && value <= max) {
        return Err(QuoteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Band upper bounds must be positive, strictly increasing, and only the last band may be open.
pub fn validate_band_bounds(field_name: &str, bounds: &[Option<f64>]) -> Result<()> {
    if bounds.is_empty() {
        return Err(QuoteError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    let last = bounds.len() - 1;
    let mut previous = 0.0_f64;

    for (index, bound) in bounds.iter().enumerate() {
        match bound {
            Some(up_to) => {
                if !up_to.is_finite() || *up_to <= previous {
                    return Err(QuoteError::InvalidConfigValueError {
                        field: format!("{}[{}].up_to", field_name, index),
                        value: up_to.to_string(),
                        reason: format!("Bounds must increase; previous bound was {}", previous),
                    });
                }
                previous = *up_to;
            }
            None if index != last => {
                return Err(QuoteError::ConfigValidationError {
                    field: format!("{}[{}].up_to", field_name, index),
                    message: "Only the last band may omit 'up_to'".to_string(),
                });
            }
            None => {}
        }
    }

    if bounds[last].is_some() {
        return Err(QuoteError::ConfigValidationError {
            field: format!("{}[{}].up_to", field_name, last),
            message: "The last band must omit 'up_to' so every size is covered".to_string(),
        });
    }

    Ok(())
}
