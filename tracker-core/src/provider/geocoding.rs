use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::LocationError,
    model::Coordinates,
    provider::{join_url, truncate_body},
};

use super::Geocoder;

/// Open-Meteo geocoding search client.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    base_url: String,
    http: Client,
}

impl GeocodingClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http }
    }

    async fn search(&self, place_name: &str) -> Result<GeoSearchResponse, LocationError> {
        let url = join_url(&self.base_url, "/v1/search");
        debug!(%url, "sending geocoding request");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("name", place_name),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| LocationError::Transport(format!("failed to send request: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| LocationError::Transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(LocationError::Transport(format!(
                "status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| LocationError::Transport(format!("failed to parse geocoding JSON: {e}")))
    }
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    latitude: f64,
    longitude: f64,
    name: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeoSearchResponse {
    results: Option<Vec<GeoResult>>,
}

#[async_trait]
impl Geocoder for GeocodingClient {
    #[instrument(skip(self))]
    async fn resolve(&self, place_name: &str) -> Result<Coordinates, LocationError> {
        let parsed = self.search(place_name).await.inspect_err(|e| {
            warn!(error = %e, "geocoding failed");
        })?;

        let first = parsed
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| {
                warn!("no geocoding results");
                LocationError::NotFound(place_name.to_string())
            })?;

        info!(
            name = first.name.as_deref().unwrap_or("?"),
            country = first.country.as_deref().unwrap_or("?"),
            latitude = first.latitude,
            longitude = first.longitude,
            "resolved location"
        );

        Ok(Coordinates { latitude: first.latitude, longitude: first.longitude })
    }
}
