use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_RATE_PER_KWH: f64 = 95.0;

/// Electricity price and optional VAT.
///
/// `rate_per_kwh` is the only field the calculator reads. VAT is applied
/// solely through [`TariffConfig::apply_vat`] so that tariff-only costs never
/// silently change meaning.
///
/// Persisted as camelCase; the snake_case aliases serve the `[tariff]`
/// section of the configuration file and its environment overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct TariffConfig {
    #[serde(alias = "rate_per_kwh")]
    #[validate(range(min = 0.0, message = "tariff rate cannot be negative"))]
    pub rate_per_kwh: f64,
    #[serde(alias = "vat_enabled")]
    pub vat_enabled: bool,
    #[serde(alias = "vat_percent")]
    #[validate(range(min = 0.0, max = 100.0, message = "VAT must be between 0 and 100 percent"))]
    pub vat_percent: f64,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            rate_per_kwh: DEFAULT_RATE_PER_KWH,
            vat_enabled: false,
            vat_percent: 0.0,
        }
    }
}

impl TariffConfig {
    pub fn with_rate(rate_per_kwh: f64) -> Self {
        Self { rate_per_kwh, ..Self::default() }
    }

    /// Tariff-only cost of `kwh`.
    pub fn cost_of(&self, kwh: f64) -> f64 {
        kwh * self.rate_per_kwh
    }

    /// `cost` with VAT added when enabled, unchanged otherwise.
    pub fn apply_vat(&self, cost: f64) -> f64 {
        if self.vat_enabled {
            cost * (1.0 + self.vat_percent / 100.0)
        } else {
            cost
        }
    }
}
