//! Efficiency-standard compliance checks.
//!
//! Compares an appliance's rated efficiency against the minimum and
//! recommended values of the standard that applies to its category.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::domain::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum RatingUnit {
    #[strum(serialize = "EER")]
    Eer,
    #[strum(serialize = "lm/W")]
    LumensPerWatt,
    #[strum(serialize = "%")]
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
pub enum StandardKind {
    #[strum(serialize = "Air Conditioner")]
    AirConditioner,
    Refrigerator,
    #[strum(serialize = "LED Bulb")]
    LedBulb,
    #[strum(serialize = "Fluorescent Lamp")]
    FluorescentLamp,
    #[strum(serialize = "Electric Motor")]
    ElectricMotor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyStandard {
    pub kind: StandardKind,
    pub code: &'static str,
    pub minimum: f64,
    pub recommended: f64,
    pub unit: RatingUnit,
    pub description: &'static str,
}

pub static STANDARDS: [EfficiencyStandard; 5] = [
    EfficiencyStandard {
        kind: StandardKind::AirConditioner,
        code: "SON 428:2016",
        minimum: 2.9,
        recommended: 3.5,
        unit: RatingUnit::Eer,
        description: "Nigerian Standard for Air Conditioners",
    },
    EfficiencyStandard {
        kind: StandardKind::Refrigerator,
        code: "SON 455:2016",
        minimum: 1.8,
        recommended: 2.5,
        unit: RatingUnit::Eer,
        description: "Nigerian Standard for Refrigerators",
    },
    EfficiencyStandard {
        kind: StandardKind::LedBulb,
        code: "SON 521:2017",
        minimum: 80.0,
        recommended: 120.0,
        unit: RatingUnit::LumensPerWatt,
        description: "Nigerian Standard for LED Lamps",
    },
    EfficiencyStandard {
        kind: StandardKind::FluorescentLamp,
        code: "SON 178:2013",
        minimum: 60.0,
        recommended: 90.0,
        unit: RatingUnit::LumensPerWatt,
        description: "Nigerian Standard for Fluorescent Lamps",
    },
    EfficiencyStandard {
        kind: StandardKind::ElectricMotor,
        code: "IEC 60034-30-1",
        minimum: 85.0,
        recommended: 90.0,
        unit: RatingUnit::Percent,
        description: "International Standard for Electric Motors",
    },
];

impl StandardKind {
    pub fn standard(self) -> &'static EfficiencyStandard {
        match self {
            StandardKind::AirConditioner => &STANDARDS[0],
            StandardKind::Refrigerator => &STANDARDS[1],
            StandardKind::LedBulb => &STANDARDS[2],
            StandardKind::FluorescentLamp => &STANDARDS[3],
            StandardKind::ElectricMotor => &STANDARDS[4],
        }
    }

    /// Standard applicable to equipment of `category` named `name`.
    /// Lighting is judged as LED when the name says so, fluorescent otherwise.
    pub fn for_equipment(category: Category, name: &str) -> Option<Self> {
        match category {
            Category::Hvac => Some(StandardKind::AirConditioner),
            Category::Lighting if name.contains("LED") => Some(StandardKind::LedBulb),
            Category::Lighting => Some(StandardKind::FluorescentLamp),
            Category::Refrigeration => Some(StandardKind::Refrigerator),
            Category::Motors => Some(StandardKind::ElectricMotor),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStatus {
    Excellent,
    Compliant,
    NonCompliant,
}

impl ComplianceStatus {
    pub fn message(self) -> &'static str {
        match self {
            ComplianceStatus::Excellent => "Exceeds recommended standards",
            ComplianceStatus::Compliant => "Meets minimum standards",
            ComplianceStatus::NonCompliant => "Below minimum standards",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceResult {
    pub status: ComplianceStatus,
    pub message: &'static str,
    pub standard: &'static EfficiencyStandard,
    pub rating: f64,
}

/// Declared efficiency of an appliance: an EER for cooling equipment, a
/// lm/W or % figure for lamps and motors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplianceRating {
    pub eer: Option<f64>,
    pub efficiency: Option<f64>,
}

impl ApplianceRating {
    /// EER when given and non-zero, else the efficiency figure.
    pub fn value(&self) -> Option<f64> {
        self.eer
            .filter(|v| *v != 0.0)
            .or(self.efficiency)
            .filter(|v| v.is_finite())
    }
}

pub fn assess(standard: &EfficiencyStandard, rating: f64) -> ComplianceStatus {
    if rating >= standard.recommended {
        ComplianceStatus::Excellent
    } else if rating >= standard.minimum {
        ComplianceStatus::Compliant
    } else {
        ComplianceStatus::NonCompliant
    }
}

/// `None` when no standard covers the category or no rating is known.
pub fn check_compliance(
    category: Category,
    name: &str,
    rating: &ApplianceRating,
) -> Option<ComplianceResult> {
    let standard = StandardKind::for_equipment(category, name)?.standard();
    let value = rating.value()?;
    let status = assess(standard, value);
    Some(ComplianceResult {
        status,
        message: status.message(),
        standard,
        rating: value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    fn eer(v: f64) -> ApplianceRating {
        ApplianceRating { eer: Some(v), efficiency: None }
    }

    fn efficiency(v: f64) -> ApplianceRating {
        ApplianceRating { eer: None, efficiency: Some(v) }
    }

    #[test]
    fn test_every_kind_has_its_own_standard() {
        for kind in StandardKind::iter() {
            assert_eq!(kind.standard().kind, kind);
            assert!(kind.standard().minimum < kind.standard().recommended);
        }
    }

    #[rstest]
    #[case(Category::Hvac, "Split AC 1.5T Inverter", eer(3.8), ComplianceStatus::Excellent)]
    #[case(Category::Hvac, "Split AC 2.0T Standard", eer(2.7), ComplianceStatus::NonCompliant)]
    #[case(Category::Hvac, "Window AC", eer(3.0), ComplianceStatus::Compliant)]
    #[case(Category::Lighting, "LED Panel 40W", efficiency(125.0), ComplianceStatus::Excellent)]
    #[case(Category::Lighting, "CFL 23W", efficiency(65.0), ComplianceStatus::Compliant)]
    #[case(Category::Refrigeration, "Inverter Refrigerator 350L", eer(2.8), ComplianceStatus::Excellent)]
    #[case(Category::Refrigeration, "Standard Refrigerator 300L", eer(1.6), ComplianceStatus::NonCompliant)]
    #[case(Category::Motors, "IE3 Motor 5HP", efficiency(91.7), ComplianceStatus::Excellent)]
    #[case(Category::Motors, "IE1 Motor 5HP", efficiency(85.0), ComplianceStatus::Compliant)]
    fn test_reference_appliances(
        #[case] category: Category,
        #[case] name: &str,
        #[case] rating: ApplianceRating,
        #[case] expected: ComplianceStatus,
    ) {
        let result = check_compliance(category, name, &rating).expect("standard applies");
        assert_eq!(result.status, expected);
        assert_eq!(result.message, expected.message());
    }

    #[test]
    fn test_lighting_standard_depends_on_name() {
        let led = check_compliance(Category::Lighting, "LED Tube", &efficiency(70.0)).unwrap();
        assert_eq!(led.standard.kind, StandardKind::LedBulb);
        assert_eq!(led.status, ComplianceStatus::NonCompliant);

        let tube = check_compliance(Category::Lighting, "T8 Tube", &efficiency(70.0)).unwrap();
        assert_eq!(tube.standard.kind, StandardKind::FluorescentLamp);
        assert_eq!(tube.status, ComplianceStatus::Compliant);
    }

    #[test]
    fn test_not_assessable() {
        assert!(check_compliance(Category::Av, "Projector", &eer(3.0)).is_none());
        assert!(check_compliance(Category::Hvac, "Mystery AC", &ApplianceRating::default()).is_none());
    }

    #[test]
    fn test_zero_eer_falls_back_to_efficiency() {
        let rating = ApplianceRating { eer: Some(0.0), efficiency: Some(92.0) };
        assert_eq!(rating.value(), Some(92.0));
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&ComplianceStatus::NonCompliant).unwrap();
        assert_eq!(json, "\"non-compliant\"");
    }
}
