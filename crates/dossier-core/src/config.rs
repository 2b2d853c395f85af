//! Dossier configuration
//!
//! Branding strings, pricing ratios and valuation constants, loaded from TOML.
//! Every section has defaults, so an empty file is a valid configuration.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::DossierError;

pub const TIER_COUNT: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DossierConfig {
    #[serde(default)]
    pub brand: BrandConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub valuation: ValuationConfig,
    #[serde(default)]
    pub route: RouteConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl DossierConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed or
    /// the values fail [`DossierConfig::validate`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string
    ///
    /// ```
    /// use dossier_core::DossierConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = DossierConfig::from_str(r#"
    ///     [brand]
    ///     dial_code = "+44"
    /// "#)?;
    /// assert_eq!(config.brand.dial_code, "+44");
    /// assert_eq!(config.route.max_steps, 10);
    /// # Ok(())
    /// # }
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        let config: DossierConfig = toml::from_str(s).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DossierError> {
        self.pricing.validate()?;
        self.valuation.validate()?;
        if self.route.max_steps == 0 {
            return Err(DossierError::InvalidConfig(
                "route.max_steps must be at least 1".to_string(),
            ));
        }
        if self.output.extension.trim().is_empty() {
            return Err(DossierError::InvalidConfig(
                "output.extension must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandConfig {
    #[serde(default = "default_brand_name")]
    pub name: String,
    #[serde(default = "default_unit_label")]
    pub unit_label: String,
    #[serde(default = "default_tagline")]
    pub tagline: String,
    #[serde(default = "default_system_version")]
    pub system_version: String,
    #[serde(default = "default_founder_attribution")]
    pub founder_attribution: String,
    #[serde(default = "default_compliance_status")]
    pub compliance_status: String,
    /// Prefixed to viewer phone numbers that carry no country code
    #[serde(default = "default_dial_code")]
    pub dial_code: String,
}

impl BrandConfig {
    /// Footer signature, e.g. `PROPERTYFIE AUDIT SYSTEM • V4.2.0 • ...`
    pub fn signature(&self) -> String {
        format!(
            "{} AUDIT SYSTEM \u{2022} V{} \u{2022} {}",
            self.name.to_uppercase(),
            self.system_version,
            self.tagline.to_uppercase()
        )
    }

    /// Contact line for the cover. The phone is shown exactly as entered.
    pub fn contact(&self, phone: &str) -> String {
        format!("{} {}", self.dial_code, phone)
    }
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            name: default_brand_name(),
            unit_label: default_unit_label(),
            tagline: default_tagline(),
            system_version: default_system_version(),
            founder_attribution: default_founder_attribution(),
            compliance_status: default_compliance_status(),
            dial_code: default_dial_code(),
        }
    }
}

/// Multipliers applied to the base area and price for each tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_area_ratios")]
    pub area_ratios: Vec<f64>,
    #[serde(default = "default_price_ratios")]
    pub price_ratios: Vec<f64>,
}

impl PricingConfig {
    pub fn validate(&self) -> Result<(), DossierError> {
        validate_ratios("pricing.area_ratios", &self.area_ratios)?;
        validate_ratios("pricing.price_ratios", &self.price_ratios)
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            area_ratios: default_area_ratios(),
            price_ratios: default_price_ratios(),
        }
    }
}

fn validate_ratios(name: &str, ratios: &[f64]) -> Result<(), DossierError> {
    if ratios.len() != TIER_COUNT {
        return Err(DossierError::InvalidConfig(format!(
            "{} needs exactly {} values, got {}",
            name,
            TIER_COUNT,
            ratios.len()
        )));
    }
    if ratios.iter().any(|r| !r.is_finite() || *r <= 0.0) {
        return Err(DossierError::InvalidConfig(format!(
            "{} values must be positive",
            name
        )));
    }
    if ratios.windows(2).any(|w| w[1] <= w[0]) {
        return Err(DossierError::InvalidConfig(format!(
            "{} must be strictly increasing",
            name
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationConfig {
    /// Regional metro/tech infrastructure delta, whole percent
    #[serde(default = "default_infrastructure_premium")]
    pub infrastructure_premium_percent: f64,
    /// Used when a property has no fair-value record
    #[serde(default = "default_market_average")]
    pub fallback_market_average: f64,
    #[serde(default = "default_project_premium")]
    pub fallback_project_premium_percent: f64,
}

impl ValuationConfig {
    pub fn validate(&self) -> Result<(), DossierError> {
        let values = [
            self.infrastructure_premium_percent,
            self.fallback_market_average,
            self.fallback_project_premium_percent,
        ];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(DossierError::InvalidConfig(
                "valuation values must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            infrastructure_premium_percent: default_infrastructure_premium(),
            fallback_market_average: default_market_average(),
            fallback_project_premium_percent: default_project_premium(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Commute steps rendered on the compliance page
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_prefix: default_file_prefix(),
            extension: default_extension(),
        }
    }
}

fn default_brand_name() -> String {
    "PROPERTYFIE".to_string()
}

fn default_unit_label() -> String {
    "ELITE INTEL UNIT".to_string()
}

fn default_tagline() -> String {
    "Redefining innovations, We're curiousminds".to_string()
}

fn default_system_version() -> String {
    "4.2.0".to_string()
}

fn default_founder_attribution() -> String {
    "FOUNDER'S STRATEGIC AUDIT - AMAN SINGH".to_string()
}

fn default_compliance_status() -> String {
    "COMPLIANCE STATUS: VERIFIED / TIER-1".to_string()
}

fn default_dial_code() -> String {
    "+91".to_string()
}

fn default_area_ratios() -> Vec<f64> {
    vec![0.75, 1.0, 1.15, 1.5]
}

fn default_price_ratios() -> Vec<f64> {
    vec![0.75, 1.0, 1.2, 1.6]
}

fn default_infrastructure_premium() -> f64 {
    8.0
}

fn default_market_average() -> f64 {
    9500.0
}

fn default_project_premium() -> f64 {
    10.0
}

fn default_max_steps() -> usize {
    10
}

fn default_file_prefix() -> String {
    "Propertyfie_Intel_Dossier_".to_string()
}

fn default_extension() -> String {
    "pdf".to_string()
}
