//! Planning request types

use serde::{Deserialize, Serialize};

use super::{Coordinates, Stop};

/// Travel profile the matrix is costed with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelProfile {
    /// Fastest available driving route under current conditions
    #[default]
    Driving,
    Bicycle,
    Walking,
}

impl TravelProfile {
    /// Valhalla costing model identifier
    pub const fn as_costing(self) -> &'static str {
        match self {
            TravelProfile::Driving => "auto",
            TravelProfile::Bicycle => "bicycle",
            TravelProfile::Walking => "pedestrian",
        }
    }
}

/// Request to plan a ground route for one layover
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    /// Fixed start/end location (the airport)
    pub base: Coordinates,
    /// Unordered stops to sequence
    pub stops: Vec<Stop>,
    #[serde(default)]
    pub profile: TravelProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_costing_names() {
        assert_eq!(TravelProfile::Driving.as_costing(), "auto");
        assert_eq!(TravelProfile::Bicycle.as_costing(), "bicycle");
        assert_eq!(TravelProfile::Walking.as_costing(), "pedestrian");
    }

    #[test]
    fn test_profile_defaults_to_driving() {
        let json = r#"{"base":{"lat":35.2144,"lng":-80.9473},"stops":[]}"#;
        let request: PlanRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.profile, TravelProfile::Driving);
        assert!(request.stops.is_empty());
    }

    #[test]
    fn test_profile_serializes_snake_case() {
        let json = serde_json::to_string(&TravelProfile::Driving).unwrap();
        assert_eq!(json, "\"driving\"");
    }
}
