//! Route timeline types

use serde::{Deserialize, Serialize};

use super::Stop;

/// One directed hop between consecutive nodes of a realized route
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub duration_minutes: f64,
}

/// The final plan: stops in visiting order plus the per-leg breakdown.
///
/// Legs always form the cycle base → stop → … → stop → base, so
/// `legs.len() == stops.len() + 1` (zero legs for an empty route).
/// Aggregates are derived on demand, never stored alongside.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTimeline {
    pub stops: Vec<Stop>,
    pub legs: Vec<Leg>,
    /// Departure from the base, minutes since midnight. Zero when no stop is
    /// time-fixed. Can go negative when a fixed time is tighter than the
    /// travel needed to reach it from a midnight departure.
    pub base_offset_minutes: f64,
}

impl RouteTimeline {
    pub fn empty() -> Self {
        Self {
            stops: vec![],
            legs: vec![],
            base_offset_minutes: 0.0,
        }
    }

    /// Sum of leg durations, time behind the wheel only.
    pub fn total_driving_minutes(&self) -> f64 {
        self.legs.iter().map(|leg| leg.duration_minutes).sum()
    }

    /// Time spent at stops.
    pub fn total_service_minutes(&self) -> i32 {
        self.stops.iter().map(|stop| stop.service_minutes).sum()
    }

    /// Driving plus service.
    pub fn total_minutes(&self) -> f64 {
        self.total_driving_minutes() + self.total_service_minutes() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinates;

    #[test]
    fn test_empty_timeline() {
        let timeline = RouteTimeline::empty();
        assert!(timeline.stops.is_empty());
        assert!(timeline.legs.is_empty());
        assert_eq!(timeline.total_driving_minutes(), 0.0);
        assert_eq!(timeline.total_service_minutes(), 0);
        assert_eq!(timeline.total_minutes(), 0.0);
    }

    #[test]
    fn test_aggregates_are_derived() {
        let timeline = RouteTimeline {
            stops: vec![
                Stop::new("A", Coordinates { lat: 35.0, lng: -80.0 }, 30),
                Stop::new("B", Coordinates { lat: 35.1, lng: -80.1 }, 20),
            ],
            legs: vec![
                Leg { duration_minutes: 10.0 },
                Leg { duration_minutes: 12.0 },
                Leg { duration_minutes: 16.0 },
            ],
            base_offset_minutes: 0.0,
        };
        assert_eq!(timeline.total_driving_minutes(), 38.0);
        assert_eq!(timeline.total_service_minutes(), 50);
        assert_eq!(timeline.total_minutes(), 88.0);
    }
}
