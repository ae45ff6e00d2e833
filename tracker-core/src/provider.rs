use crate::{
    Config, Coordinates, UnitPreference, WeatherSnapshot,
    error::{LocationError, WeatherError},
    provider::{forecast::WeatherClient, geocoding::GeocodingClient},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod forecast;
pub mod geocoding;

/// Resolves a free-text place name to a single coordinate pair.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, place_name: &str) -> Result<Coordinates, LocationError>;
}

/// Fetches current conditions for a coordinate pair.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_current(
        &self,
        coords: Coordinates,
        unit: UnitPreference,
    ) -> Result<WeatherSnapshot, WeatherError>;
}

/// Construct both Open-Meteo clients from config, sharing one HTTP client.
pub fn clients_from_config(config: &Config) -> anyhow::Result<(GeocodingClient, WeatherClient)> {
    let http = config.http_client()?;

    Ok((
        GeocodingClient::new(http.clone(), &config.geocoding_url),
        WeatherClient::new(http, &config.forecast_url),
    ))
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
