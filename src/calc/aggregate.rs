use itertools::Itertools;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use super::energy::{EnergyCalculator, EnergyMetrics};
use crate::domain::{Category, EquipmentRecord, Facility, RecordId, TariffConfig};

/// `value` as a percentage of `total`; 0 when the total is zero or not finite.
pub fn percentage_of(value: f64, total: f64) -> f64 {
    if total == 0.0 || !total.is_finite() {
        0.0
    } else {
        value / total * 100.0
    }
}

/// An equipment record together with its computed metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemEnergy {
    pub id: RecordId,
    pub name: String,
    pub category: Category,
    pub room: String,
    #[serde(flatten)]
    pub metrics: EnergyMetrics,
}

/// Monthly consumption and cost of one category or room.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotal {
    pub key: String,
    pub monthly_kwh: f64,
    pub cost: f64,
    /// Share of the facility's monthly kWh.
    pub percentage: f64,
}

/// Facility-wide fold of an equipment list.
///
/// Groups keep the order in which their key first appears in the input.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditSummary {
    pub total_monthly_kwh: f64,
    pub total_cost: f64,
    pub by_category: Vec<GroupTotal>,
    pub by_room: Vec<GroupTotal>,
    /// Per-item metrics in input order.
    pub items: Vec<ItemEnergy>,
    #[serde(skip)]
    ranked: Vec<usize>,
}

impl AuditSummary {
    pub fn from_items(
        items: &[EquipmentRecord],
        tariff: &TariffConfig,
        calculator: &EnergyCalculator,
    ) -> Self {
        let items: Vec<ItemEnergy> = items
            .iter()
            .map(|item| ItemEnergy {
                id: item.id.clone(),
                name: item.name.clone(),
                category: item.category(),
                room: item.room_label().to_string(),
                metrics: calculator.compute(item, tariff),
            })
            .collect();

        let total_monthly_kwh = items.iter().map(|i| i.metrics.monthly_kwh).sum::<f64>();
        let total_cost = items.iter().map(|i| i.metrics.cost).sum::<f64>();

        let by_category = group_totals(
            items.iter().map(|i| (i.category.to_string(), &i.metrics)),
            total_monthly_kwh,
        );
        let by_room = group_totals(
            items.iter().map(|i| (i.room.clone(), &i.metrics)),
            total_monthly_kwh,
        );

        // sorted_by is stable: equal consumers keep their input order
        let ranked = (0..items.len())
            .sorted_by(|&a, &b| {
                items[b]
                    .metrics
                    .monthly_kwh
                    .partial_cmp(&items[a].metrics.monthly_kwh)
                    .unwrap_or(Ordering::Equal)
            })
            .collect();

        tracing::trace!(
            items = items.len(),
            total_monthly_kwh,
            categories = by_category.len(),
            rooms = by_room.len(),
            "aggregated equipment"
        );

        Self {
            total_monthly_kwh,
            total_cost,
            by_category,
            by_room,
            items,
            ranked,
        }
    }

    pub fn percentage_of_total(&self, value: f64) -> f64 {
        percentage_of(value, self.total_monthly_kwh)
    }

    /// Monthly kWh of `category`, 0 if no item falls in it.
    pub fn category_kwh(&self, category: Category) -> f64 {
        let key = category.to_string();
        find_group(&self.by_category, &key)
    }

    pub fn room_kwh(&self, room: &str) -> f64 {
        find_group(&self.by_room, room)
    }

    /// The `n` largest monthly consumers, descending.
    pub fn top_consumers(&self, n: usize) -> Vec<&ItemEnergy> {
        self.ranked.iter().take(n).map(|&i| &self.items[i]).collect()
    }

    /// kWh per m² per month, or `None` when the facility has no usable area.
    pub fn energy_intensity(&self, facility: &Facility) -> Option<f64> {
        if facility.area > 0.0 && facility.area.is_finite() {
            Some(self.total_monthly_kwh / facility.area)
        } else {
            None
        }
    }
}

fn group_totals<'a>(
    entries: impl Iterator<Item = (String, &'a EnergyMetrics)>,
    total_monthly_kwh: f64,
) -> Vec<GroupTotal> {
    let mut groups: Vec<GroupTotal> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (key, metrics) in entries {
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(GroupTotal { key, monthly_kwh: 0.0, cost: 0.0, percentage: 0.0 });
            groups.len() - 1
        });
        groups[slot].monthly_kwh += metrics.monthly_kwh;
        groups[slot].cost += metrics.cost;
    }

    for group in &mut groups {
        group.percentage = percentage_of(group.monthly_kwh, total_monthly_kwh);
    }
    groups
}

fn find_group(groups: &[GroupTotal], key: &str) -> f64 {
    groups
        .iter()
        .find(|g| g.key == key)
        .map(|g| g.monthly_kwh)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tariff() -> TariffConfig {
        TariffConfig::with_rate(95.0)
    }

    fn reference_items() -> Vec<EquipmentRecord> {
        vec![
            EquipmentRecord::new("LED Panel 40W", Category::Lighting, 0.04, 12, 8.0)
                .with_id(1u64)
                .with_room("Training Hall"),
            EquipmentRecord::new("Split AC 2.0T", Category::Hvac, 2.0, 2, 6.0)
                .with_id(2u64)
                .with_room("Training Hall"),
        ]
    }

    fn summarize(items: &[EquipmentRecord]) -> AuditSummary {
        AuditSummary::from_items(items, &tariff(), &EnergyCalculator::default())
    }

    #[test]
    fn test_totals_and_intensity() {
        let summary = summarize(&reference_items());
        assert!((summary.total_monthly_kwh - 835.2).abs() < 1e-9);
        assert!((summary.total_cost - 79344.0).abs() < 1e-6);

        let intensity = summary.energy_intensity(&Facility::default()).unwrap();
        assert!((intensity - 6.96).abs() < 1e-9);
    }

    #[test]
    fn test_empty_list() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_monthly_kwh, 0.0);
        assert_eq!(summary.total_cost, 0.0);
        assert!(summary.by_category.is_empty());
        assert!(summary.by_room.is_empty());
        assert!(summary.top_consumers(5).is_empty());
        assert_eq!(summary.energy_intensity(&Facility::default()), Some(0.0));
        assert_eq!(summary.percentage_of_total(0.0), 0.0);
    }

    #[test]
    fn test_intensity_unavailable_without_area() {
        let summary = summarize(&reference_items());
        let mut facility = Facility::default();
        facility.area = 0.0;
        assert_eq!(summary.energy_intensity(&facility), None);
        facility.area = f64::NAN;
        assert_eq!(summary.energy_intensity(&facility), None);
    }

    #[test]
    fn test_zero_guarded_percentage() {
        assert_eq!(percentage_of(10.0, 0.0), 0.0);
        assert_eq!(percentage_of(0.0, 0.0), 0.0);
        assert_eq!(percentage_of(25.0, 100.0), 25.0);
    }

    #[test]
    fn test_category_groups_in_first_seen_order() {
        let mut items = reference_items();
        items.push(EquipmentRecord::new("Projector", Category::Av, 0.3, 1, 4.0));
        items.push(EquipmentRecord::new("Desk Lamp", Category::Lighting, 0.01, 4, 6.0));

        let summary = summarize(&items);
        let keys: Vec<&str> = summary.by_category.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Lighting", "HVAC", "AV"]);
        assert!((summary.category_kwh(Category::Lighting) - (115.2 + 7.2)).abs() < 1e-9);
        assert_eq!(summary.category_kwh(Category::Kitchen), 0.0);

        let hvac = &summary.by_category[1];
        assert!((hvac.percentage - 720.0 / summary.total_monthly_kwh * 100.0).abs() < 1e-9);
        assert!((hvac.cost - 68400.0).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_category_counts_as_other() {
        let mut odd = EquipmentRecord::new("Thing", Category::Other, 1.0, 1, 1.0);
        odd.category = "Xyz123".to_string();
        let summary = summarize(&[odd]);
        assert_eq!(summary.by_category.len(), 1);
        assert_eq!(summary.by_category[0].key, "Other");
        assert_eq!(summary.category_kwh(Category::Other), 30.0);
    }

    #[test]
    fn test_rooms_default_to_unassigned() {
        let mut items = reference_items();
        items.push(EquipmentRecord::new("Kettle", Category::Kitchen, 2.0, 1, 0.5));
        let summary = summarize(&items);
        let keys: Vec<&str> = summary.by_room.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Training Hall", "Unassigned"]);
        assert_eq!(summary.room_kwh("Unassigned"), 30.0);
        assert!((summary.by_room[1].cost - 2850.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_consumers_stable_on_ties() {
        let items = vec![
            EquipmentRecord::new("first", Category::Other, 1.0, 1, 1.0).with_id(1u64),
            EquipmentRecord::new("big", Category::Other, 5.0, 1, 1.0).with_id(2u64),
            EquipmentRecord::new("second", Category::Other, 1.0, 1, 1.0).with_id(3u64),
            EquipmentRecord::new("third", Category::Other, 0.5, 2, 1.0).with_id(4u64),
        ];
        let summary = summarize(&items);
        let names: Vec<&str> = summary.top_consumers(10).iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["big", "first", "second", "third"]);
        assert_eq!(summary.top_consumers(2).len(), 2);
        // input order is untouched
        assert_eq!(summary.items[0].name, "first");
    }

    fn arb_items() -> impl Strategy<Value = Vec<EquipmentRecord>> {
        let categories = ["Lighting", "HVAC", "AV", "Kitchen", "Plug Loads", "Xyz123", ""];
        prop::collection::vec(
            (0usize..categories.len(), 0.0f64..5.0, 0u32..20, 0.0f64..24.0, 0usize..3),
            0..30,
        )
        .prop_map(move |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(n, (c, p, q, h, room))| {
                    let mut item = EquipmentRecord::new(format!("item-{n}"), Category::Other, p, q, h)
                        .with_id(n as u64);
                    item.category = categories[c].to_string();
                    if room > 0 {
                        item.room = Some(format!("Room {room}"));
                    }
                    item
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_groups_conserve_total(items in arb_items()) {
            let summary = summarize(&items);
            let by_category: f64 = summary.by_category.iter().map(|g| g.monthly_kwh).sum();
            let by_room: f64 = summary.by_room.iter().map(|g| g.monthly_kwh).sum();
            let tolerance = 1e-9 * summary.total_monthly_kwh.max(1.0);
            prop_assert!((by_category - summary.total_monthly_kwh).abs() <= tolerance);
            prop_assert!((by_room - summary.total_monthly_kwh).abs() <= tolerance);
        }

        #[test]
        fn prop_top_consumers_sorted_and_stable(items in arb_items(), n in 0usize..40) {
            let summary = summarize(&items);
            let top = summary.top_consumers(n);
            prop_assert_eq!(top.len(), n.min(items.len()));
            for pair in top.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                prop_assert!(a.metrics.monthly_kwh >= b.metrics.monthly_kwh);
                if a.metrics.monthly_kwh == b.metrics.monthly_kwh {
                    let pos = |id: &RecordId| items.iter().position(|i| &i.id == id).unwrap();
                    prop_assert!(pos(&a.id) < pos(&b.id));
                }
            }
        }

        #[test]
        fn prop_percentages_are_finite(items in arb_items()) {
            let summary = summarize(&items);
            for group in summary.by_category.iter().chain(summary.by_room.iter()) {
                prop_assert!(group.percentage.is_finite());
            }
        }
    }
}
