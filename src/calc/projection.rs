use serde::Serialize;

/// Month label and multiplier applied to the current monthly total.
/// Illustrative seasonal shape for trend charts, not a forecast.
pub const SEASONAL_FACTORS: [(&str, f64); 12] = [
    ("Jan", 0.95),
    ("Feb", 0.92),
    ("Mar", 0.98),
    ("Apr", 1.05),
    ("May", 1.10),
    ("Jun", 1.08),
    ("Jul", 1.12),
    ("Aug", 1.15),
    ("Sep", 1.10),
    ("Oct", 1.05),
    ("Nov", 1.00),
    ("Dec", 0.96),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyProjection {
    pub month: &'static str,
    pub consumption_kwh: f64,
}

pub fn seasonal_projection(total_monthly_kwh: f64) -> Vec<MonthlyProjection> {
    SEASONAL_FACTORS
        .iter()
        .map(|&(month, factor)| MonthlyProjection {
            month,
            consumption_kwh: total_monthly_kwh * factor,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_months_in_order() {
        let projection = seasonal_projection(1000.0);
        assert_eq!(projection.len(), 12);
        assert_eq!(projection[0].month, "Jan");
        assert_eq!(projection[11].month, "Dec");
        assert!((projection[7].consumption_kwh - 1150.0).abs() < 1e-9);
        assert_eq!(projection[10].consumption_kwh, 1000.0);
    }

    #[test]
    fn test_zero_total() {
        assert!(seasonal_projection(0.0).iter().all(|m| m.consumption_kwh == 0.0));
    }
}
