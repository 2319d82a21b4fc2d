use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Could not build quote message: {message}")]
    MessageError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Message,
    Io,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code used by the binaries.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl QuoteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QuoteError::ConfigValidationError { .. }
            | QuoteError::InvalidConfigValueError { .. }
            | QuoteError::MissingConfigError { .. } => ErrorCategory::Configuration,
            QuoteError::MessageError { .. } => ErrorCategory::Message,
            QuoteError::IoError(_) => ErrorCategory::Io,
            QuoteError::CsvError(_) | QuoteError::SerializationError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            QuoteError::MessageError { .. } => ErrorSeverity::Medium,
            QuoteError::ConfigValidationError { .. }
            | QuoteError::InvalidConfigValueError { .. }
            | QuoteError::MissingConfigError { .. }
            | QuoteError::CsvError(_)
            | QuoteError::SerializationError(_) => ErrorSeverity::High,
            QuoteError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QuoteError::IoError(e) => format!("Could not read or write a file: {}", e),
            QuoteError::CsvError(e) => format!("The quote spreadsheet could not be processed: {}", e),
            QuoteError::SerializationError(e) => format!("Could not encode the quote: {}", e),
            QuoteError::ConfigValidationError { field, message } => {
                format!("Pricing configuration problem in '{}': {}", field, message)
            }
            QuoteError::InvalidConfigValueError { field, value, .. } => {
                format!("'{}' is not an accepted value for '{}'", value, field)
            }
            QuoteError::MissingConfigError { field } => {
                format!("The setting '{}' is required", field)
            }
            QuoteError::MessageError { message } => {
                format!("The quote request email could not be prepared: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => match self {
                QuoteError::InvalidConfigValueError { reason, .. } => reason.clone(),
                _ => "Check the pricing TOML file against the documented keys".to_string(),
            },
            ErrorCategory::Message => {
                "Check the contact recipient address, e.g. info@mb.cleaning".to_string()
            }
            ErrorCategory::Io => "Make sure the path exists and is readable/writable".to_string(),
            ErrorCategory::Data => {
                "Make sure the CSV has a header row and properly quoted cells".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;
