use serde::Serialize;
use strum_macros::{Display, EnumIter};

use super::aggregate::AuditSummary;
use super::CalcPolicy;
use crate::domain::{Category, TariffConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumIter)]
pub enum SavingsMeasure {
    #[strum(serialize = "LED Retrofit")]
    #[serde(rename = "LED Retrofit")]
    LedRetrofit,
    #[strum(serialize = "HVAC Optimization")]
    #[serde(rename = "HVAC Optimization")]
    HvacOptimization,
    #[strum(serialize = "Occupancy Sensors")]
    #[serde(rename = "Occupancy Sensors")]
    OccupancySensors,
    #[strum(serialize = "Power Factor Correction")]
    #[serde(rename = "Power Factor Correction")]
    PowerFactorCorrection,
}

/// A heuristic point estimate, not a measured saving.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsOpportunity {
    pub measure: SavingsMeasure,
    pub savings_kwh: f64,
    pub savings_cost: f64,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvironmentalImpact {
    pub co2_kg: f64,
    pub trees_equivalent: u64,
}

/// Cost reductions at three levels of effort, on the monthly tariff cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SavingsTiers {
    pub conservative: f64,
    pub moderate: f64,
    pub aggressive: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationEngine {
    policy: CalcPolicy,
}

impl RecommendationEngine {
    pub fn new(policy: CalcPolicy) -> Self {
        Self { policy }
    }

    /// Fixed list of measures, always in the same order.
    pub fn opportunities(
        &self,
        total_monthly_kwh: f64,
        lighting_monthly_kwh: f64,
        hvac_monthly_kwh: f64,
        tariff: &TariffConfig,
    ) -> Vec<SavingsOpportunity> {
        let p = &self.policy;
        [
            (SavingsMeasure::LedRetrofit, lighting_monthly_kwh, p.led_retrofit_fraction, "lighting savings"),
            (SavingsMeasure::HvacOptimization, hvac_monthly_kwh, p.hvac_optimization_fraction, "HVAC savings"),
            (SavingsMeasure::OccupancySensors, total_monthly_kwh, p.occupancy_sensor_fraction, "overall savings"),
            (SavingsMeasure::PowerFactorCorrection, total_monthly_kwh, p.power_factor_fraction, "demand reduction"),
        ]
        .into_iter()
        .map(|(measure, base_kwh, fraction, label)| {
            let savings_kwh = base_kwh * fraction;
            SavingsOpportunity {
                measure,
                savings_kwh,
                savings_cost: tariff.cost_of(savings_kwh),
                description: format!("{:.0}% {label}", fraction * 100.0),
            }
        })
        .collect()
    }

    pub fn opportunities_for(&self, summary: &AuditSummary, tariff: &TariffConfig) -> Vec<SavingsOpportunity> {
        self.opportunities(
            summary.total_monthly_kwh,
            summary.category_kwh(Category::Lighting),
            summary.category_kwh(Category::Hvac),
            tariff,
        )
    }

    pub fn environmental_impact(&self, total_monthly_kwh: f64) -> EnvironmentalImpact {
        let co2_kg = total_monthly_kwh * self.policy.co2_kg_per_kwh;
        let trees = if self.policy.kg_co2_per_tree > 0.0 {
            (co2_kg / self.policy.kg_co2_per_tree).round()
        } else {
            0.0
        };
        EnvironmentalImpact {
            co2_kg,
            // `as` saturates; NaN and negatives land on 0
            trees_equivalent: trees.max(0.0) as u64,
        }
    }

    pub fn savings_tiers(&self, total_monthly_cost: f64) -> SavingsTiers {
        SavingsTiers {
            conservative: total_monthly_cost * self.policy.conservative_tier_fraction,
            moderate: total_monthly_cost * self.policy.moderate_tier_fraction,
            aggressive: total_monthly_cost * self.policy.aggressive_tier_fraction,
        }
    }
}
