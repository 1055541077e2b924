//! Planning pipeline
//!
//! Validates the request, fetches the travel-time matrix, runs the
//! sequencing search, and builds the final timeline. Each call is
//! independent: the planner keeps no state between requests, so any number
//! of plans can run concurrently.

use std::time::Duration;

use anyhow::anyhow;
use tracing::info;

use crate::config::Config;
use crate::error::PlanError;
use crate::services::matrix::{
    create_travel_time_service_with_fallback, TravelTimeMatrix, TravelTimeService,
};
use crate::services::sequencing::{self, SequenceSolution};
use crate::services::timeline;
use crate::types::{PlanRequest, RouteTimeline, Stop};

/// Same-day ground route planner
pub struct RoutePlanner {
    travel_time: Box<dyn TravelTimeService>,
    config: Config,
}

impl RoutePlanner {
    pub fn new(travel_time: Box<dyn TravelTimeService>, config: Config) -> Self {
        Self { travel_time, config }
    }

    /// Build a planner from environment configuration, probing Valhalla and
    /// falling back to haversine estimation when it is unavailable.
    pub async fn from_env() -> anyhow::Result<Self> {
        let config = Config::from_env()?;
        let travel_time =
            create_travel_time_service_with_fallback(config.valhalla_url.clone()).await;
        Ok(Self::new(travel_time, config))
    }

    /// Plan the route for one layover.
    ///
    /// Fetches the travel-time matrix once, then searches stop orderings for
    /// the cheapest one that honors every fixed start time. All-or-nothing:
    /// an error never carries a partial timeline.
    pub async fn plan(&self, request: &PlanRequest) -> Result<RouteTimeline, PlanError> {
        validate(request, self.config.max_sequenced_stops)?;

        // Nothing to drive to and nothing to fetch a matrix for.
        if request.stops.is_empty() {
            return Ok(RouteTimeline::empty());
        }

        let matrix = self.fetch_matrix(request).await?;
        if matrix.size() != request.stops.len() + 1 {
            return Err(PlanError::MatrixUnavailable(anyhow!(
                "provider returned a {}x{} matrix for {} locations",
                matrix.size(),
                matrix.size(),
                request.stops.len() + 1
            )));
        }

        let solution = if request.stops.len() == 1 {
            // Two legs, no ordering decision. Only the departure time and
            // reachability need deriving.
            single_stop_solution(&request.stops[0], &matrix)
        } else {
            sequencing::find_best_order(&request.stops, &matrix)
        }
        .ok_or(PlanError::NoFeasibleRoute)?;

        let timeline = timeline::build_timeline(
            &request.stops,
            &solution.order,
            &matrix,
            solution.base_offset_minutes,
        )
        .map_err(|e| PlanError::InvalidInput(e.to_string()))?;

        info!(
            stops = timeline.stops.len(),
            driving_minutes = timeline.total_driving_minutes(),
            base_offset_minutes = timeline.base_offset_minutes,
            "route planned"
        );

        Ok(timeline)
    }

    async fn fetch_matrix(&self, request: &PlanRequest) -> Result<TravelTimeMatrix, PlanError> {
        let mut locations = Vec::with_capacity(request.stops.len() + 1);
        locations.push(request.base);
        locations.extend(request.stops.iter().map(|s| s.coordinates));

        let fetch = self.travel_time.travel_time_matrix(&locations, request.profile);
        let timeout = Duration::from_secs(self.config.matrix_timeout_seconds);

        match tokio::time::timeout(timeout, fetch).await {
            Ok(Ok(matrix)) => Ok(matrix),
            Ok(Err(e)) => Err(PlanError::MatrixUnavailable(e)),
            Err(_) => Err(PlanError::MatrixUnavailable(anyhow!(
                "{} did not answer within {}s",
                self.travel_time.name(),
                self.config.matrix_timeout_seconds
            ))),
        }
    }
}

/// The degenerate one-stop route: out and back, departure capped by the
/// stop's fixed start when it has one.
fn single_stop_solution(stop: &Stop, matrix: &TravelTimeMatrix) -> Option<SequenceSolution> {
    let outbound = matrix.duration(0, 1);
    let inbound = matrix.duration(1, 0);
    if !outbound.is_finite() || !inbound.is_finite() {
        return None;
    }

    let base_offset_minutes = stop
        .fixed_start_minutes()
        .map(|fixed| fixed as f64 - outbound)
        .unwrap_or(0.0);

    Some(SequenceSolution {
        order: vec![0],
        base_offset_minutes,
        driving_minutes: outbound + inbound,
    })
}

fn validate(request: &PlanRequest, max_stops: usize) -> Result<(), PlanError> {
    if !request.base.is_valid() {
        return Err(PlanError::InvalidInput(
            "base coordinates are out of range".to_string(),
        ));
    }

    for stop in &request.stops {
        if !stop.coordinates.is_valid() {
            return Err(PlanError::InvalidInput(format!(
                "stop '{}' has coordinates out of range",
                stop.name
            )));
        }
        if stop.service_minutes < 0 {
            return Err(PlanError::InvalidInput(format!(
                "stop '{}' has a negative service duration",
                stop.name
            )));
        }
    }

    if request.stops.len() > max_stops {
        return Err(PlanError::InvalidInput(format!(
            "{} stops exceed the sequencing limit of {} (the search is factorial)",
            request.stops.len(),
            max_stops
        )));
    }

    Ok(())
}
