//! # Energy and cost calculation
//!
//! Pure functions over an equipment inventory and a tariff:
//!
//! - **energy**: per-item daily/monthly kWh and tariff cost
//! - **aggregate**: facility totals, category and room groups, ranked consumers
//! - **recommend**: savings heuristics and environmental impact
//! - **loads**: derive equipment records from lighting, AC, appliance and solar inputs
//! - **projection**: seasonal 12-month trend from the monthly total
//!
//! Nothing here rounds, logs per item, reads storage or returns an error.
//! Rounding belongs to presentation.

pub mod aggregate;
pub mod energy;
pub mod loads;
pub mod projection;
pub mod recommend;

pub use aggregate::{percentage_of, AuditSummary, GroupTotal, ItemEnergy};
pub use energy::{compute, EnergyCalculator, EnergyMetrics};
pub use loads::{
    AirConditionerInput, ApplianceInput, EquipmentForm, LightingInput, SolarEstimate, SolarInput,
};
pub use projection::{seasonal_projection, MonthlyProjection};
pub use recommend::{
    EnvironmentalImpact, RecommendationEngine, SavingsMeasure, SavingsOpportunity, SavingsTiers,
};

use serde::{Deserialize, Serialize};

/// Fixed 30-day month. Not calendar accurate, and kept that way.
pub const DAYS_PER_MONTH: f64 = 30.0;
/// Grid emission factor for Nigeria, kg CO₂ per kWh.
pub const CO2_KG_PER_KWH: f64 = 0.82;
/// CO₂ one tree absorbs per month, kg.
pub const KG_CO2_PER_TREE_MONTH: f64 = 21.0;

pub const LED_RETROFIT_FRACTION: f64 = 0.40;
pub const HVAC_OPTIMIZATION_FRACTION: f64 = 0.15;
pub const OCCUPANCY_SENSOR_FRACTION: f64 = 0.08;
pub const POWER_FACTOR_FRACTION: f64 = 0.05;

pub const CONSERVATIVE_TIER_FRACTION: f64 = 0.15;
pub const MODERATE_TIER_FRACTION: f64 = 0.25;
pub const AGGRESSIVE_TIER_FRACTION: f64 = 0.35;

/// Policy constants behind every estimate. Defaults are the named constants
/// above; deployments may override them through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcPolicy {
    pub days_per_month: f64,
    pub co2_kg_per_kwh: f64,
    pub kg_co2_per_tree: f64,
    pub led_retrofit_fraction: f64,
    pub hvac_optimization_fraction: f64,
    pub occupancy_sensor_fraction: f64,
    pub power_factor_fraction: f64,
    pub conservative_tier_fraction: f64,
    pub moderate_tier_fraction: f64,
    pub aggressive_tier_fraction: f64,
}

impl Default for CalcPolicy {
    fn default() -> Self {
        Self {
            days_per_month: DAYS_PER_MONTH,
            co2_kg_per_kwh: CO2_KG_PER_KWH,
            kg_co2_per_tree: KG_CO2_PER_TREE_MONTH,
            led_retrofit_fraction: LED_RETROFIT_FRACTION,
            hvac_optimization_fraction: HVAC_OPTIMIZATION_FRACTION,
            occupancy_sensor_fraction: OCCUPANCY_SENSOR_FRACTION,
            power_factor_fraction: POWER_FACTOR_FRACTION,
            conservative_tier_fraction: CONSERVATIVE_TIER_FRACTION,
            moderate_tier_fraction: MODERATE_TIER_FRACTION,
            aggressive_tier_fraction: AGGRESSIVE_TIER_FRACTION,
        }
    }
}
