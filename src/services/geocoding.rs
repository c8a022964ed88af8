//! Geocoding collaborator: free-text address -> coordinates.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::config;
use crate::database::models::Coordinates;

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("no location found for address: {0}")]
    NotFound(String),
    #[error("geocoding provider failure: {0}")]
    Provider(String),
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, address: &str) -> Result<Coordinates, GeocodeError>;
}

// --- Google geocoding API wire format ---

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

fn coordinates_from_response(
    address: &str,
    response: GeocodeResponse,
) -> Result<Coordinates, GeocodeError> {
    if response.status == "ZERO_RESULTS" {
        return Err(GeocodeError::NotFound(address.to_string()));
    }
    if response.status != "OK" {
        return Err(GeocodeError::Provider(format!("status {}", response.status)));
    }

    response
        .results
        .into_iter()
        .next()
        .map(|result| Coordinates {
            lat: result.geometry.location.lat,
            lng: result.geometry.location.lng,
        })
        .ok_or_else(|| GeocodeError::NotFound(address.to_string()))
}

/// Geocoder backed by the Google geocoding HTTP API.
pub struct GoogleGeocoder {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GoogleGeocoder {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self { client: reqwest::Client::new(), endpoint, api_key }
    }

    pub fn from_config() -> Self {
        let geo = &config().geocoding;
        Self::new(geo.endpoint.clone(), geo.api_key.clone())
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn resolve(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("address", address), ("key", &self.api_key)])
            .send()
            .await
            .map_err(|e| GeocodeError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeocodeError::Provider(format!("http {}", response.status())));
        }

        let body = response
            .json::<GeocodeResponse>()
            .await
            .map_err(|e| GeocodeError::Provider(e.to_string()))?;

        coordinates_from_response(address, body)
    }
}
