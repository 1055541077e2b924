//! Route timeline construction
//!
//! Given stops in an already-chosen visiting order plus the travel-time
//! matrix, walks the route and produces the per-leg breakdown and the
//! final timeline. No ordering decisions are made here.

use anyhow::{bail, Result};

use crate::services::matrix::TravelTimeMatrix;
use crate::types::{Leg, RouteTimeline, Stop};

/// Build the timeline for stops visited in the given order.
///
/// `order` holds indices into `stops`. Matrix node k+1 corresponds to stop k
/// in the caller's original order; node 0 is the base. The produced legs
/// form the full cycle base → first stop → … → last stop → base.
pub fn build_timeline(
    stops: &[Stop],
    order: &[usize],
    matrix: &TravelTimeMatrix,
    base_offset_minutes: f64,
) -> Result<RouteTimeline> {
    if matrix.size() != stops.len() + 1 {
        bail!(
            "matrix is {}x{} but {} stops need {} nodes",
            matrix.size(),
            matrix.size(),
            stops.len(),
            stops.len() + 1
        );
    }

    if order.is_empty() {
        return Ok(RouteTimeline::empty());
    }

    let mut legs = Vec::with_capacity(order.len() + 1);
    let mut visited = Vec::with_capacity(order.len());
    let mut prev_node = 0usize;

    for &stop_idx in order {
        let Some(stop) = stops.get(stop_idx) else {
            bail!("order references stop {} but only {} stops exist", stop_idx, stops.len());
        };
        let node = stop_idx + 1;
        legs.push(Leg { duration_minutes: matrix.duration(prev_node, node) });
        visited.push(stop.clone());
        prev_node = node;
    }

    // Closing leg back to the base
    legs.push(Leg { duration_minutes: matrix.duration(prev_node, 0) });

    Ok(RouteTimeline {
        stops: visited,
        legs,
        base_offset_minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinates;

    fn here() -> Coordinates {
        Coordinates { lat: 35.2144, lng: -80.9473 }
    }

    fn matrix(rows: Vec<Vec<f64>>) -> TravelTimeMatrix {
        TravelTimeMatrix::from_minutes(rows).unwrap()
    }

    #[test]
    fn test_empty_order_gives_empty_timeline() {
        let m = matrix(vec![vec![0.0]]);
        let timeline = build_timeline(&[], &[], &m, 0.0).unwrap();
        assert!(timeline.stops.is_empty());
        assert!(timeline.legs.is_empty());
        assert_eq!(timeline.total_minutes(), 0.0);
    }

    #[test]
    fn test_single_stop_two_legs() {
        // Base A, one stop B: A→B = 20, B→A = 25, service 30.
        let m = matrix(vec![vec![0.0, 20.0], vec![25.0, 0.0]]);
        let stops = vec![Stop::new("B", here(), 30)];

        let timeline = build_timeline(&stops, &[0], &m, 0.0).unwrap();

        assert_eq!(timeline.stops.len(), 1);
        assert_eq!(timeline.legs.len(), 2);
        assert_eq!(timeline.legs[0].duration_minutes, 20.0);
        assert_eq!(timeline.legs[1].duration_minutes, 25.0);
        assert_eq!(timeline.total_driving_minutes(), 45.0);
        assert_eq!(timeline.total_service_minutes(), 30);
        assert_eq!(timeline.total_minutes(), 75.0);
    }

    #[test]
    fn test_two_stops_follow_given_order() {
        // Nodes: 0=base, 1=X, 2=Y
        let m = matrix(vec![
            vec![0.0, 10.0, 15.0],
            vec![10.0, 0.0, 12.0],
            vec![16.0, 14.0, 0.0],
        ]);
        let stops = vec![Stop::new("X", here(), 30), Stop::new("Y", here(), 20)];

        // Visit Y first, then X. The builder must not reorder.
        let timeline = build_timeline(&stops, &[1, 0], &m, 0.0).unwrap();

        assert_eq!(timeline.stops[0].name, "Y");
        assert_eq!(timeline.stops[1].name, "X");
        assert_eq!(timeline.legs.len(), 3);
        assert_eq!(timeline.legs[0].duration_minutes, 15.0); // base→Y
        assert_eq!(timeline.legs[1].duration_minutes, 14.0); // Y→X
        assert_eq!(timeline.legs[2].duration_minutes, 10.0); // X→base
        assert_eq!(timeline.total_driving_minutes(), 39.0);
    }

    #[test]
    fn test_asymmetric_legs_read_directed_entries() {
        let m = matrix(vec![vec![0.0, 12.0], vec![10.0, 0.0]]);
        let stops = vec![Stop::new("Stop", here(), 0)];

        let timeline = build_timeline(&stops, &[0], &m, 0.0).unwrap();
        assert_eq!(timeline.legs[0].duration_minutes, 12.0);
        assert_eq!(timeline.legs[1].duration_minutes, 10.0);
    }

    #[test]
    fn test_base_offset_carried_through() {
        let m = matrix(vec![vec![0.0, 20.0], vec![25.0, 0.0]]);
        let stops = vec![Stop::new("B", here(), 30)];
        let timeline = build_timeline(&stops, &[0], &m, 580.0).unwrap();
        assert_eq!(timeline.base_offset_minutes, 580.0);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let m = matrix(vec![vec![0.0, 20.0], vec![25.0, 0.0]]);
        let stops = vec![
            Stop::new("B", here(), 30),
            Stop::new("C", here(), 30),
        ];
        assert!(build_timeline(&stops, &[0, 1], &m, 0.0).is_err());
    }

    #[test]
    fn test_order_index_out_of_bounds_rejected() {
        let m = matrix(vec![vec![0.0, 20.0], vec![25.0, 0.0]]);
        let stops = vec![Stop::new("B", here(), 30)];
        assert!(build_timeline(&stops, &[3], &m, 0.0).is_err());
    }
}
