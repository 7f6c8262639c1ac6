use crate::domain::model::GeocodedAddress;
use crate::domain::ports::GeocodeBackend;
use crate::utils::error::{GeoError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Backend for JSON geocoding APIs in the Google Maps response shape:
/// `{status, results: [{formatted_address, geometry: {location: {lat, lng}}}]}`.
pub struct GoogleBackend {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GoogleBackend {
    pub fn new(client: Client, endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeEntry>,
}

#[derive(Debug, Deserialize)]
struct GeocodeEntry {
    formatted_address: String,
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

#[async_trait]
impl GeocodeBackend for GoogleBackend {
    async fn lookup(&self, address: &str) -> Result<GeocodedAddress> {
        let mut request = self.client.get(&self.endpoint).query(&[("address", address)]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::BackendStatusError {
                status: status.as_u16(),
            });
        }

        let body: GeocodeResponse = response.json().await?;
        if body.status != "OK" {
            return Err(GeoError::BackendError {
                message: format!("geocoding API returned status {}", body.status),
            });
        }

        let entry = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| GeoError::BackendError {
                message: "geocoding API returned no results".to_string(),
            })?;

        Ok(GeocodedAddress::new(
            entry.formatted_address,
            Some(entry.geometry.location.lat),
            Some(entry.geometry.location.lng),
        ))
    }
}
