//! Place-search HTTP adapter.
//!
//! Talks to a Foursquare-compatible places API and maps its response
//! envelope onto [`PlaceCandidate`] values. Implements
//! [`PlacesProvider`], so the rest of the crate never sees the wire
//! format.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::GeoPoint;
use crate::traits::PlacesProvider;

/// Configuration for [`PlaceSearchClient`].
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    /// Base URL of the places service.
    pub base_url: String,
    /// Credential sent in the `Authorization` header. Empty by default;
    /// supply one via [`PlacesConfig::from_env`] or directly.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.foursquare.com".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

impl PlacesConfig {
    /// Default configuration with `RIDE_MAP_PLACES_URL` and
    /// `RIDE_MAP_PLACES_KEY` environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("RIDE_MAP_PLACES_URL") {
            config.base_url = url;
        }
        if let Ok(key) = std::env::var("RIDE_MAP_PLACES_KEY") {
            config.api_key = key;
        }
        config
    }
}

/// A candidate destination returned by the search service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    /// Stable identifier assigned by the service.
    pub id: String,
    /// Human-readable place name.
    pub name: String,
    /// Best available address line; empty when the service gives none.
    pub address: String,
    pub location: GeoPoint,
}

/// Failure while searching for places.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Transport-level failure: DNS, connect, timeout, or a body that
    /// did not parse.
    #[error("places request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("places service rejected the search (HTTP {status})")]
    Service { status: u16 },
}

/// HTTP client for the places search endpoint.
#[derive(Debug, Clone)]
pub struct PlaceSearchClient {
    config: PlacesConfig,
    client: reqwest::Client,
}

impl PlaceSearchClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: PlacesConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl PlacesProvider for PlaceSearchClient {
    async fn search(
        &self,
        query: &str,
        near: GeoPoint,
        radius_m: u32,
    ) -> Result<Vec<PlaceCandidate>, SearchError> {
        let url = format!("{}/v3/places/search", self.config.base_url);
        let response = self
            .client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, self.config.api_key.as_str())
            .query(&[
                ("query", query.to_string()),
                ("ll", near.to_string()),
                ("radius", radius_m.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "places search rejected");
            return Err(SearchError::Service {
                status: status.as_u16(),
            });
        }

        let envelope = response.json::<SearchEnvelope>().await?;
        let candidates: Vec<PlaceCandidate> = envelope
            .results
            .into_iter()
            .map(PlaceResult::into_candidate)
            .collect();
        tracing::debug!(query, count = candidates.len(), "places search completed");
        Ok(candidates)
    }
}

// Wire format of the search endpoint. Only the fields we consume.

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    fsq_id: String,
    name: String,
    #[serde(default)]
    location: PlaceAddress,
    geocodes: Geocodes,
}

#[derive(Debug, Default, Deserialize)]
struct PlaceAddress {
    formatted_address: Option<String>,
    cross_street: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geocodes {
    main: GeocodePoint,
}

#[derive(Debug, Deserialize)]
struct GeocodePoint {
    latitude: f64,
    longitude: f64,
}

impl PlaceResult {
    fn into_candidate(self) -> PlaceCandidate {
        // Most complete address line the service offered.
        let address = self
            .location
            .formatted_address
            .or(self.location.cross_street)
            .or(self.location.country)
            .unwrap_or_default();

        PlaceCandidate {
            id: self.fsq_id,
            name: self.name,
            address,
            location: GeoPoint::new(self.geocodes.main.latitude, self.geocodes.main.longitude),
        }
    }
}
