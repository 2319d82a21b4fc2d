use crate::domain::ports::ContactProvider;
use crate::domain::rates::{ConstructionRates, PricingTable, ResidentialRates};
use crate::utils::error::{QuoteError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_RECIPIENT: &str = "info@mb.cleaning";
pub const DEFAULT_BUSINESS_NAME: &str = "MB Cleaning";

/// Pricing file. Every section and key is optional; anything left out keeps
/// the published rate.
///
/// ```toml
/// [residential]
/// bedroom_rate = 30
/// size_tiers = [
///     { up_to = 1200, rate = 0.16 },
///     { rate = 0.12 },
/// ]
///
/// [construction]
/// high_rate = 0.35
///
/// [contact]
/// recipient = "${QUOTE_RECIPIENT}"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub residential: ResidentialRates,
    pub construction: ConstructionRates,
    pub contact: ContactSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    pub recipient: String,
    pub business_name: String,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            recipient: DEFAULT_RECIPIENT.to_string(),
            business_name: DEFAULT_BUSINESS_NAME.to_string(),
        }
    }
}

impl PricingConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuoteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QuoteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${QUOTE_RECIPIENT})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QuoteError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        self.residential.validate()?;
        self.construction.validate()?;
        validation::validate_email("contact.recipient", &self.contact.recipient)?;
        validation::validate_non_empty_string("contact.business_name", &self.contact.business_name)
    }

    pub fn pricing_table(&self) -> PricingTable {
        PricingTable {
            residential: self.residential.clone(),
            construction: self.construction.clone(),
        }
    }

    pub fn into_parts(self) -> (PricingTable, ContactSettings) {
        let table = PricingTable {
            residential: self.residential,
            construction: self.construction,
        };
        (table, self.contact)
    }
}

impl ContactProvider for ContactSettings {
    fn recipient(&self) -> &str {
        &self.recipient
    }

    fn business_name(&self) -> &str {
        &self.business_name
    }
}

impl ContactProvider for PricingConfig {
    fn recipient(&self) -> &str {
        &self.contact.recipient
    }

    fn business_name(&self) -> &str {
        &self.contact.business_name
    }
}

impl Validate for PricingConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
