//! Geographic calculations backing the offline travel-time estimate

use crate::types::Coordinates;

/// Earth radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Road distance coefficient (straight line to road)
const ROAD_COEFFICIENT: f64 = 1.3;

/// Average driving speed in km/h for travel time estimation
const AVERAGE_SPEED_KMH: f64 = 40.0;

/// Haversine distance between two points in kilometers
pub fn haversine_distance(from: &Coordinates, to: &Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lng - from.lng).to_radians();

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Estimate road distance from straight-line distance
pub fn road_distance(from: &Coordinates, to: &Coordinates) -> f64 {
    haversine_distance(from, to) * ROAD_COEFFICIENT
}

/// Estimate driving time in minutes
pub fn travel_time_minutes(from: &Coordinates, to: &Coordinates) -> f64 {
    let distance = road_distance(from, to);
    (distance / AVERAGE_SPEED_KMH) * 60.0
}
