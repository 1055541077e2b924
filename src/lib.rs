//! Layover Planner: route sequencing for same-day ground trips
//!
//! A traveler lands in an unfamiliar city for a few hours with a handful of
//! ground stops to fit in: meetings, meals, errands. Some stops are pinned
//! to a clock time, the rest are flexible. Given the airport as the base
//! location and a matrix of pairwise travel durations, this crate finds the
//! visiting order that honors every time-fixed commitment while minimizing
//! total driving time, and lays it out as a leg-by-leg timeline.
//!
//! The search is exhaustive over stop orderings (O(n!·n)), which is fine at
//! the handful-of-stops scale it exists for and is bounded by
//! [`Config::max_sequenced_stops`].
//!
//! ```no_run
//! use layover_planner::{Coordinates, PlanRequest, RoutePlanner, Stop, TravelProfile};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let planner = RoutePlanner::from_env().await?;
//!
//! let request = PlanRequest {
//!     base: Coordinates { lat: 35.2144, lng: -80.9473 },
//!     stops: vec![
//!         Stop::new("Client meeting", Coordinates { lat: 35.2271, lng: -80.8431 }, 60),
//!         Stop::new("Lunch", Coordinates { lat: 35.2083, lng: -80.8622 }, 45),
//!     ],
//!     profile: TravelProfile::Driving,
//! };
//!
//! let timeline = planner.plan(&request).await?;
//! println!("{} minutes of driving", timeline.total_driving_minutes());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod services;
pub mod types;

pub use config::Config;
pub use error::PlanError;
pub use services::matrix::{
    create_travel_time_service_with_fallback, MockTravelTimeService, TravelTimeMatrix,
    TravelTimeService, ValhallaClient, ValhallaConfig, UNREACHABLE,
};
pub use services::planner::RoutePlanner;
pub use services::sequencing::{find_best_order, SequenceSolution};
pub use services::timeline::build_timeline;
pub use types::{Coordinates, Leg, PlanRequest, RouteTimeline, Stop, TravelProfile};
