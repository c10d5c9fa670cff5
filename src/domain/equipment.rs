use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::types::{lenient_count, lenient_number, sanitize_number, RecordId};

pub const UNASSIGNED_ROOM: &str = "Unassigned";

/// Equipment classification used for grouping.
///
/// Parsing is lenient: any label that is not recognised (or is empty) maps to
/// [`Category::Other`] instead of being rejected.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
    Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    Lighting,
    #[strum(serialize = "HVAC")]
    #[serde(rename = "HVAC")]
    Hvac,
    #[strum(serialize = "Plug Loads")]
    #[serde(rename = "Plug Loads")]
    PlugLoads,
    /// The appliance form stores this one as "AV Equipment".
    #[strum(to_string = "AV", serialize = "AV Equipment")]
    #[serde(rename = "AV", alias = "AV Equipment")]
    Av,
    Kitchen,
    Refrigeration,
    Motors,
    #[default]
    Other,
}

impl Category {
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().unwrap_or(Category::Other)
    }
}

/// One logged load. `power_kw` is the rating of a single unit.
///
/// Numeric fields read leniently: values the entry forms could have saved
/// (null, numeric text, fractional counts) load as numbers instead of
/// failing the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRecord {
    pub id: RecordId,
    pub name: String,
    /// Free text as entered; see [`EquipmentRecord::category`].
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub power_kw: f64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub qty: u32,
    #[serde(default, deserialize_with = "lenient_number")]
    pub hours_per_day: f64,
}

impl EquipmentRecord {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        power_kw: f64,
        qty: u32,
        hours_per_day: f64,
    ) -> Self {
        Self {
            id: RecordId::generate(),
            name: name.into(),
            category: category.to_string(),
            room: None,
            power_kw,
            qty,
            hours_per_day,
        }
    }

    pub fn with_id(mut self, id: impl Into<RecordId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    pub fn category(&self) -> Category {
        Category::from_label(&self.category)
    }

    /// Room grouping label; missing or blank rooms are "Unassigned".
    pub fn room_label(&self) -> &str {
        match self.room.as_deref().map(str::trim) {
            Some(room) if !room.is_empty() => room,
            _ => UNASSIGNED_ROOM,
        }
    }

    /// Copy with non-finite or negative numeric fields zeroed.
    pub fn sanitized(&self) -> Self {
        Self {
            power_kw: sanitize_number(self.power_kw),
            hours_per_day: sanitize_number(self.hours_per_day),
            ..self.clone()
        }
    }
}
