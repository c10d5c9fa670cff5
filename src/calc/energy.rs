use serde::{Deserialize, Serialize};

use super::{CalcPolicy, DAYS_PER_MONTH};
use crate::domain::{EquipmentRecord, TariffConfig};

/// Consumption and tariff-only cost of one equipment record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyMetrics {
    pub daily_kwh: f64,
    pub monthly_kwh: f64,
    /// `monthly_kwh * rate`, VAT excluded.
    pub cost: f64,
}

impl EnergyMetrics {
    pub fn cost_with_vat(&self, tariff: &TariffConfig) -> f64 {
        tariff.apply_vat(self.cost)
    }
}

/// Converts an equipment record and a tariff into [`EnergyMetrics`].
///
/// Deterministic and uncached; recomputing is cheaper than keeping results
/// in sync with edits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyCalculator {
    days_per_month: f64,
}

impl Default for EnergyCalculator {
    fn default() -> Self {
        Self { days_per_month: DAYS_PER_MONTH }
    }
}

impl EnergyCalculator {
    pub fn new(policy: &CalcPolicy) -> Self {
        Self { days_per_month: policy.days_per_month }
    }

    pub fn days_per_month(&self) -> f64 {
        self.days_per_month
    }

    pub fn compute(&self, item: &EquipmentRecord, tariff: &TariffConfig) -> EnergyMetrics {
        let daily_kwh = item.power_kw * f64::from(item.qty) * item.hours_per_day;
        let monthly_kwh = daily_kwh * self.days_per_month;
        EnergyMetrics {
            daily_kwh,
            monthly_kwh,
            cost: tariff.cost_of(monthly_kwh),
        }
    }
}

/// [`EnergyCalculator::compute`] with the default 30-day month.
pub fn compute(item: &EquipmentRecord, tariff: &TariffConfig) -> EnergyMetrics {
    EnergyCalculator::default().compute(item, tariff)
}
