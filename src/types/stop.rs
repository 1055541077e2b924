//! Ground stop types

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Coordinates;

/// A ground destination to visit between flights: a meeting, a meal,
/// an errand. Supplied unordered; the planner only reorders references.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    /// Correlation id; the planner reorders stops, callers match them back
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Display name ("Lunch with Maria", "FedEx dropoff")
    pub name: String,
    pub coordinates: Coordinates,
    /// Time spent at the stop, in whole minutes
    pub service_minutes: i32,
    /// Clock time the stop must start at, when the commitment is time-fixed
    #[serde(default)]
    pub fixed_start: Option<NaiveTime>,
}

impl Stop {
    pub fn new(name: impl Into<String>, coordinates: Coordinates, service_minutes: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            coordinates,
            service_minutes,
            fixed_start: None,
        }
    }

    pub fn with_fixed_start(mut self, fixed_start: NaiveTime) -> Self {
        self.fixed_start = Some(fixed_start);
        self
    }

    /// Fixed start as minutes since midnight, if the stop is time-fixed.
    pub fn fixed_start_minutes(&self) -> Option<i32> {
        self.fixed_start.map(time_to_minutes)
    }
}

/// Convert a clock time to minutes since midnight
pub fn time_to_minutes(time: NaiveTime) -> i32 {
    time.hour() as i32 * 60 + time.minute() as i32
}
