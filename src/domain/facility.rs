use serde::{Deserialize, Serialize};
use validator::Validate;

use super::types::RecordId;

/// The building under audit. `area` (m²) is only used for energy intensity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    #[validate(length(min = 1, message = "facility name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "area cannot be negative"))]
    pub area: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub building_type: String,
}

impl Default for Facility {
    fn default() -> Self {
        Self {
            name: "Main Training Room".to_string(),
            area: 120.0,
            location: "Lagos".to_string(),
            building_type: "Educational".to_string(),
        }
    }
}

/// A named space equipment can be associated with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Room {
    pub id: RecordId,
    #[validate(length(min = 1, message = "room name is required"))]
    pub name: String,
    /// Occupancy or use, e.g. "Office" or "Server Room".
    #[validate(length(min = 1, message = "room function is required"))]
    pub function: String,
}

impl Room {
    pub fn new(name: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            name: name.into(),
            function: function.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facility_validation() {
        assert!(Facility::default().validate().is_ok());

        let mut facility = Facility::default();
        facility.area = -5.0;
        assert!(facility.validate().is_err());

        facility.area = 0.0;
        facility.name.clear();
        assert!(facility.validate().is_err());
    }

    #[test]
    fn test_facility_camel_case() {
        let json = serde_json::to_value(Facility::default()).unwrap();
        assert_eq!(json["buildingType"], "Educational");
        assert_eq!(json["area"], 120.0);
    }

    #[test]
    fn test_room_requires_name_and_function() {
        assert!(Room::new("Training Hall", "Training Room").validate().is_ok());
        assert!(Room::new("", "Office").validate().is_err());
        assert!(Room::new("Lobby", "").validate().is_err());
    }
}
