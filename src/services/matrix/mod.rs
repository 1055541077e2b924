//! Travel-time matrix retrieval
//!
//! Valhalla for production, haversine estimation for tests and offline use.

mod valhalla;

pub use valhalla::{ValhallaClient, ValhallaConfig};

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::types::{Coordinates, TravelProfile};

/// Sentinel duration for pairs the provider cannot route between
pub const UNREACHABLE: f64 = f64::INFINITY;

/// Square, directed table of travel durations in minutes.
///
/// Node 0 is the base location; node k is the (k-1)-th stop in the caller's
/// original order. Not necessarily symmetric. Unroutable pairs hold
/// [`UNREACHABLE`], never zero.
#[derive(Debug, Clone)]
pub struct TravelTimeMatrix {
    durations: Vec<Vec<f64>>,
}

impl TravelTimeMatrix {
    /// Wrap a table of minute durations, checking that it is square.
    pub fn from_minutes(durations: Vec<Vec<f64>>) -> Result<Self> {
        let n = durations.len();
        for row in &durations {
            if row.len() != n {
                bail!("travel-time matrix must be square, got a row of {} in a {}x{} table", row.len(), n, n);
            }
        }
        Ok(Self { durations })
    }

    /// Number of nodes (base + stops) on each axis.
    pub fn size(&self) -> usize {
        self.durations.len()
    }

    /// Directed duration in minutes from node `from` to node `to`.
    pub fn duration(&self, from: usize, to: usize) -> f64 {
        self.durations[from][to]
    }

    /// False when the provider could not route this pair.
    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.durations[from][to].is_finite()
    }
}

/// Travel-time provider boundary (Valhalla, mock, etc.)
#[async_trait]
pub trait TravelTimeService: Send + Sync {
    /// Fetch pairwise travel durations for the given locations.
    /// The first location is the base; at least two locations are required.
    async fn travel_time_matrix(
        &self,
        locations: &[Coordinates],
        profile: TravelProfile,
    ) -> Result<TravelTimeMatrix>;

    /// Service name for logging
    fn name(&self) -> &str;
}

/// Mock travel-time service for tests and offline fallback.
/// Uses haversine distance × road coefficient for estimation.
pub struct MockTravelTimeService;

impl MockTravelTimeService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockTravelTimeService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TravelTimeService for MockTravelTimeService {
    async fn travel_time_matrix(
        &self,
        locations: &[Coordinates],
        _profile: TravelProfile,
    ) -> Result<TravelTimeMatrix> {
        use crate::services::geo::travel_time_minutes;

        if locations.len() < 2 {
            bail!("at least two locations are required for a travel-time matrix");
        }

        let n = locations.len();
        let mut durations = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    durations[i][j] = travel_time_minutes(&locations[i], &locations[j]);
                }
            }
        }

        TravelTimeMatrix::from_minutes(durations)
    }

    fn name(&self) -> &str {
        "MockTravelTime"
    }
}

/// Create a travel-time service with automatic Valhalla detection.
///
/// Tries Valhalla when a URL is provided and falls back to the haversine
/// mock when the server is unavailable or no URL is configured.
pub async fn create_travel_time_service_with_fallback(
    valhalla_url: Option<String>,
) -> Box<dyn TravelTimeService> {
    use tracing::{info, warn};

    if let Some(url) = valhalla_url {
        let client = ValhallaClient::new(ValhallaConfig::new(&url));

        match check_valhalla_health(&url).await {
            Ok(()) => {
                info!("Valhalla travel-time service available at {}", url);
                return Box::new(client);
            }
            Err(e) => {
                warn!("Valhalla not available at {}: {}. Falling back to haversine estimation.", url, e);
            }
        }
    }

    info!("Using mock travel-time service (Valhalla not configured or unavailable)");
    Box::new(MockTravelTimeService::new())
}

/// Check if Valhalla is healthy by making a simple status request
async fn check_valhalla_health(base_url: &str) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()?;

    let url = format!("{}/status", base_url);
    let response = client.get(&url).send().await?;

    if response.status().is_success() {
        Ok(())
    } else {
        bail!("Valhalla returned status {}", response.status())
    }
}
