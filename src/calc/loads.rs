//! Equipment records derived from the data-entry forms.
//!
//! Each form keeps the raw fields a user types (watts per fixture, AC
//! tonnage, ...) and turns them into an [`EquipmentRecord`] whose `power_kw`
//! is the rating of a single unit.

use serde::{Deserialize, Serialize};

use super::energy::{EnergyCalculator, EnergyMetrics};
use crate::domain::{sanitize_number, Category, EquipmentRecord, TariffConfig};
use crate::error::{AuditError, AuditResult};

/// Cooling output of one refrigeration ton, in kW.
pub const KW_PER_TON_COOLING: f64 = 3.517;

pub trait EquipmentForm {
    /// The name the record will carry.
    fn label(&self) -> &str;

    /// Record as currently filled in, not yet assigned to a room.
    fn draft(&self) -> EquipmentRecord;

    /// Live consumption and cost while the form is being edited.
    fn preview(&self, calculator: &EnergyCalculator, tariff: &TariffConfig) -> EnergyMetrics {
        calculator.compute(&self.draft().sanitized(), tariff)
    }

    /// Finished record for `room`. Both a name and a room are required.
    fn build(&self, room: &str) -> AuditResult<EquipmentRecord> {
        if self.label().trim().is_empty() || room.trim().is_empty() {
            return Err(AuditError::Validation(
                "please select a room and enter a name".to_string(),
            ));
        }
        Ok(self.draft().sanitized().with_room(room.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingInput {
    pub fixture_type: String,
    pub quantity: u32,
    pub wattage_w: f64,
    pub hours_per_day: f64,
}

impl Default for LightingInput {
    fn default() -> Self {
        Self { fixture_type: String::new(), quantity: 1, wattage_w: 40.0, hours_per_day: 8.0 }
    }
}

impl LightingInput {
    pub fn unit_power_kw(&self) -> f64 {
        self.wattage_w / 1000.0
    }
}

impl EquipmentForm for LightingInput {
    fn label(&self) -> &str {
        &self.fixture_type
    }

    fn draft(&self) -> EquipmentRecord {
        EquipmentRecord::new(
            self.fixture_type.trim(),
            Category::Lighting,
            self.unit_power_kw(),
            self.quantity,
            self.hours_per_day,
        )
    }
}

/// A single air conditioner sized by tonnage and efficiency ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirConditionerInput {
    pub name: String,
    pub tonnage: f64,
    pub eer: f64,
    pub hours_per_day: f64,
}

impl Default for AirConditionerInput {
    fn default() -> Self {
        Self { name: String::new(), tonnage: 1.5, eer: 10.0, hours_per_day: 8.0 }
    }
}

impl AirConditionerInput {
    /// Electrical draw: cooling output over EER. 0 when EER is unusable.
    pub fn power_kw(&self) -> f64 {
        if self.eer > 0.0 && self.eer.is_finite() {
            sanitize_number(self.tonnage) * KW_PER_TON_COOLING / self.eer
        } else {
            0.0
        }
    }
}

impl EquipmentForm for AirConditionerInput {
    fn label(&self) -> &str {
        &self.name
    }

    fn draft(&self) -> EquipmentRecord {
        EquipmentRecord::new(self.name.trim(), Category::Hvac, self.power_kw(), 1, self.hours_per_day)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplianceInput {
    pub name: String,
    pub power_kw: f64,
    pub qty: u32,
    pub hours_per_day: f64,
    pub category: Category,
}

impl Default for ApplianceInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            power_kw: 0.1,
            qty: 1,
            hours_per_day: 4.0,
            category: Category::PlugLoads,
        }
    }
}

impl EquipmentForm for ApplianceInput {
    fn label(&self) -> &str {
        &self.name
    }

    fn draft(&self) -> EquipmentRecord {
        EquipmentRecord::new(self.name.trim(), self.category, self.power_kw, self.qty, self.hours_per_day)
    }
}

/// Rooftop PV sizing. Generation offsets consumption; it is not logged as a load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarInput {
    pub system_size_kw: f64,
    pub sun_hours: f64,
    pub efficiency_percent: f64,
}

impl Default for SolarInput {
    fn default() -> Self {
        Self { system_size_kw: 5.0, sun_hours: 5.0, efficiency_percent: 85.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarEstimate {
    pub daily_generation_kwh: f64,
    pub monthly_generation_kwh: f64,
    /// Tariff cost avoided per month.
    pub potential_savings: f64,
}

impl SolarInput {
    pub fn estimate(&self, calculator: &EnergyCalculator, tariff: &TariffConfig) -> SolarEstimate {
        let daily_generation_kwh = sanitize_number(self.system_size_kw)
            * sanitize_number(self.sun_hours)
            * (sanitize_number(self.efficiency_percent) / 100.0);
        let monthly_generation_kwh = daily_generation_kwh * calculator.days_per_month();
        SolarEstimate {
            daily_generation_kwh,
            monthly_generation_kwh,
            potential_savings: tariff.cost_of(monthly_generation_kwh),
        }
    }
}
