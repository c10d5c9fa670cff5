//! Data tables behind an audit report. Rendering to a document is left to
//! the presentation layer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::calc::{
    seasonal_projection, AuditSummary, CalcPolicy, EnergyCalculator, EnvironmentalImpact,
    GroupTotal, ItemEnergy, MonthlyProjection, RecommendationEngine, SavingsOpportunity,
    SavingsTiers,
};
use crate::domain::{EquipmentRecord, Facility, TariffConfig};
use crate::error::AuditResult;

pub const REPORT_TOP_CONSUMERS: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub generated_at: DateTime<Utc>,
    pub facility: Facility,
    pub tariff: TariffConfig,
    pub items: Vec<ItemEnergy>,
    pub total_monthly_kwh: f64,
    pub total_cost: f64,
    /// Present only when the tariff has VAT enabled.
    pub total_cost_with_vat: Option<f64>,
    /// kWh/m²; `None` when the facility area is unknown.
    pub energy_intensity: Option<f64>,
    pub by_category: Vec<GroupTotal>,
    pub by_room: Vec<GroupTotal>,
    pub top_consumers: Vec<ItemEnergy>,
    pub savings: Vec<SavingsOpportunity>,
    pub savings_tiers: SavingsTiers,
    pub environmental_impact: EnvironmentalImpact,
    pub projection: Vec<MonthlyProjection>,
}

impl AuditReport {
    pub fn build(
        facility: &Facility,
        equipment: &[EquipmentRecord],
        tariff: &TariffConfig,
        policy: &CalcPolicy,
    ) -> Self {
        let calculator = EnergyCalculator::new(policy);
        let recommender = RecommendationEngine::new(*policy);
        let summary = AuditSummary::from_items(equipment, tariff, &calculator);

        let top_consumers = summary
            .top_consumers(REPORT_TOP_CONSUMERS)
            .into_iter()
            .cloned()
            .collect();
        let total_cost_with_vat = tariff
            .vat_enabled
            .then(|| tariff.apply_vat(summary.total_cost));

        Self {
            generated_at: Utc::now(),
            facility: facility.clone(),
            tariff: *tariff,
            total_cost_with_vat,
            energy_intensity: summary.energy_intensity(facility),
            top_consumers,
            savings: recommender.opportunities_for(&summary, tariff),
            savings_tiers: recommender.savings_tiers(summary.total_cost),
            environmental_impact: recommender.environmental_impact(summary.total_monthly_kwh),
            projection: seasonal_projection(summary.total_monthly_kwh),
            total_monthly_kwh: summary.total_monthly_kwh,
            total_cost: summary.total_cost,
            by_category: summary.by_category,
            by_room: summary.by_room,
            items: summary.items,
        }
    }

    pub fn to_json(&self) -> AuditResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
