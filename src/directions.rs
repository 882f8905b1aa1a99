//! Directions HTTP adapter.
//!
//! Talks to a Google-style directions API: one GET per origin and
//! destination pair, answered by a `{status, routes}` envelope whose
//! best route carries an encoded overview polyline. The geometry is
//! decoded here, so consumers only ever see [`RoutePath`] values.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::geo::GeoPoint;
use crate::polyline::{MalformedPolyline, RoutePath};
use crate::traits::DirectionsProvider;

/// Configuration for [`RouteClient`].
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// Base URL of the directions service.
    pub base_url: String,
    /// API key sent as the `key` query parameter. Empty by default;
    /// supply one via [`DirectionsConfig::from_env`] or directly.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.gomaps.pro".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

impl DirectionsConfig {
    /// Default configuration with `RIDE_MAP_DIRECTIONS_URL` and
    /// `RIDE_MAP_DIRECTIONS_KEY` environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("RIDE_MAP_DIRECTIONS_URL") {
            config.base_url = url;
        }
        if let Ok(key) = std::env::var("RIDE_MAP_DIRECTIONS_KEY") {
            config.api_key = key;
        }
        config
    }
}

/// Failure to obtain a decoded route.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Transport-level failure: DNS, connect, timeout, a non-success
    /// HTTP status, or a body that did not parse.
    #[error("directions request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered but produced no usable route. Carries the
    /// envelope status verbatim (`ZERO_RESULTS`, `REQUEST_DENIED`, ...).
    #[error("no route available (status {status})")]
    Unavailable { status: String },

    /// The route arrived but its geometry failed to decode.
    #[error("route geometry corrupted: {0}")]
    Malformed(#[from] MalformedPolyline),
}

/// HTTP client for the directions endpoint.
#[derive(Debug, Clone)]
pub struct RouteClient {
    config: DirectionsConfig,
    client: reqwest::Client,
}

impl RouteClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: DirectionsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl DirectionsProvider for RouteClient {
    async fn fetch_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<RoutePath, RouteError> {
        let url = format!("{}/maps/api/directions/json", self.config.base_url);
        let DirectionsEnvelope { status, routes } = self
            .client
            .get(url)
            .query(&[
                ("origin", origin.to_string()),
                ("destination", destination.to_string()),
                ("key", self.config.api_key.clone()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if status != "OK" {
            tracing::warn!(%status, "directions request rejected");
            return Err(RouteError::Unavailable { status });
        }

        // The service orders routes best-first; only the best one is
        // drawn.
        let Some(route) = routes.into_iter().next() else {
            tracing::warn!("directions response carried no routes");
            return Err(RouteError::Unavailable { status });
        };

        let path = RoutePath::from_encoded(&route.overview_polyline.points)?;
        tracing::debug!(points = path.len(), "route decoded");
        Ok(path)
    }
}

// Wire format of the directions endpoint. Only the fields we consume.

#[derive(Debug, Deserialize)]
struct DirectionsEnvelope {
    status: String,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    overview_polyline: OverviewPolyline,
}

#[derive(Debug, Deserialize)]
struct OverviewPolyline {
    points: String,
}
