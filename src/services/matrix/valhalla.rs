//! Valhalla travel-time matrix client
//!
//! Valhalla API documentation:
//! https://valhalla.github.io/valhalla/api/matrix/api-reference/

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{TravelTimeMatrix, TravelTimeService, UNREACHABLE};
use crate::types::{Coordinates, TravelProfile};

/// Valhalla client configuration
#[derive(Debug, Clone)]
pub struct ValhallaConfig {
    /// Base URL of Valhalla server (e.g., "http://localhost:8002")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ValhallaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8002".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl ValhallaConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Valhalla matrix client
pub struct ValhallaClient {
    client: Client,
    config: ValhallaConfig,
}

impl ValhallaClient {
    pub fn new(config: ValhallaConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Build the sources_to_targets request
    fn build_matrix_request(
        &self,
        locations: &[Coordinates],
        profile: TravelProfile,
    ) -> MatrixRequest {
        let locs: Vec<ValhallaLocation> = locations
            .iter()
            .map(|c| ValhallaLocation {
                lat: c.lat,
                lon: c.lng,
                // 500m snap radius: geocoded points can sit on a building
                // centroid rather than a road edge
                radius: Some(500),
            })
            .collect();

        MatrixRequest {
            sources: locs.clone(),
            targets: locs,
            costing: profile.as_costing().to_string(),
            units: "kilometers".to_string(),
        }
    }
}

#[async_trait]
impl TravelTimeService for ValhallaClient {
    async fn travel_time_matrix(
        &self,
        locations: &[Coordinates],
        profile: TravelProfile,
    ) -> Result<TravelTimeMatrix> {
        let n = locations.len();

        if n < 2 {
            bail!("at least two locations are required for a travel-time matrix");
        }

        let request = self.build_matrix_request(locations, profile);
        let url = format!("{}/sources_to_targets", self.config.base_url);

        debug!("Requesting travel-time matrix from Valhalla for {} locations", n);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Valhalla")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Valhalla returned error {}: {}", status, body);
        }

        let matrix_response: MatrixResponse = response
            .json()
            .await
            .context("Failed to parse Valhalla response")?;

        if matrix_response.sources_to_targets.len() != n {
            bail!(
                "Valhalla returned {} rows for {} locations",
                matrix_response.sources_to_targets.len(),
                n
            );
        }

        // Seconds to minutes; a missing cell means Valhalla found no route
        // between the pair and becomes the unreachable sentinel.
        let mut durations = vec![vec![0.0; n]; n];
        for (i, row) in matrix_response.sources_to_targets.iter().enumerate() {
            if row.len() != n {
                bail!("Valhalla returned a ragged matrix row ({} of {})", row.len(), n);
            }
            for (j, cell) in row.iter().enumerate() {
                durations[i][j] = cell.time.map(|t| t / 60.0).unwrap_or_else(|| {
                    warn!("No route from location {} to {}", i, j);
                    UNREACHABLE
                });
            }
        }

        debug!("Received travel-time matrix from Valhalla: {}x{}", n, n);

        TravelTimeMatrix::from_minutes(durations)
    }

    fn name(&self) -> &str {
        "Valhalla"
    }
}

// Valhalla API types

#[derive(Debug, Serialize)]
struct MatrixRequest {
    sources: Vec<ValhallaLocation>,
    targets: Vec<ValhallaLocation>,
    costing: String,
    units: String,
}

#[derive(Debug, Serialize, Clone)]
struct ValhallaLocation {
    lat: f64,
    lon: f64,
    /// Radius in meters for snapping to roads
    #[serde(skip_serializing_if = "Option::is_none")]
    radius: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    sources_to_targets: Vec<Vec<MatrixCell>>,
}

#[derive(Debug, Deserialize)]
struct MatrixCell {
    /// Time in seconds; absent when the pair cannot be routed
    time: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clt_airport() -> Coordinates {
        Coordinates { lat: 35.2144, lng: -80.9473 }
    }

    fn uptown() -> Coordinates {
        Coordinates { lat: 35.2271, lng: -80.8431 }
    }

    #[test]
    fn test_valhalla_config_default() {
        let config = ValhallaConfig::default();
        assert_eq!(config.base_url, "http://localhost:8002");
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_valhalla_config_custom() {
        let config = ValhallaConfig::new("http://valhalla:8002");
        assert_eq!(config.base_url, "http://valhalla:8002");
    }

    #[test]
    fn test_build_matrix_request() {
        let client = ValhallaClient::new(ValhallaConfig::default());

        let locations = vec![clt_airport(), uptown()];
        let request = client.build_matrix_request(&locations, TravelProfile::Driving);

        assert_eq!(request.sources.len(), 2);
        assert_eq!(request.targets.len(), 2);
        assert_eq!(request.costing, "auto");
        assert_eq!(request.units, "kilometers");

        assert!((request.sources[0].lat - 35.2144).abs() < 0.0001);
        assert!((request.sources[0].lon - (-80.9473)).abs() < 0.0001);
    }

    #[test]
    fn test_build_matrix_request_uses_profile_costing() {
        let client = ValhallaClient::new(ValhallaConfig::default());
        let locations = vec![clt_airport(), uptown()];

        let request = client.build_matrix_request(&locations, TravelProfile::Walking);
        assert_eq!(request.costing, "pedestrian");
    }

    #[test]
    fn test_missing_cell_parses_as_none() {
        let raw = r#"{"sources_to_targets":[[{"time":0},{"time":null}],[{"time":300.0},{"time":0}]]}"#;
        let parsed: MatrixResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.sources_to_targets[0][1].time.is_none());
        assert_eq!(parsed.sources_to_targets[1][0].time, Some(300.0));
    }

    #[test]
    fn test_valhalla_client_name() {
        let client = ValhallaClient::new(ValhallaConfig::default());
        assert_eq!(client.name(), "Valhalla");
    }

    #[tokio::test]
    #[ignore = "Requires running Valhalla server"]
    async fn test_valhalla_integration_airport_to_uptown() {
        let client = ValhallaClient::new(ValhallaConfig::new("http://localhost:8002"));

        let matrix = client
            .travel_time_matrix(&[clt_airport(), uptown()], TravelProfile::Driving)
            .await
            .unwrap();

        assert_eq!(matrix.size(), 2);

        // CLT to uptown is a 15-25 minute drive
        let minutes = matrix.duration(0, 1);
        assert!(minutes > 5.0 && minutes < 45.0, "got {} min", minutes);
    }
}
