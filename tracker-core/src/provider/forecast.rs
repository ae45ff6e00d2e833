use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::WeatherError,
    model::{Coordinates, UnitPreference, WeatherSnapshot},
    provider::{join_url, truncate_body},
};

use super::WeatherSource;

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m,weather_code";

/// Open-Meteo `current` timestamps have minute precision and no offset.
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Open-Meteo forecast client, limited to current conditions.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: String,
    http: Client,
}

impl WeatherClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http }
    }

    async fn fetch_body(
        &self,
        coords: Coordinates,
        unit: UnitPreference,
    ) -> Result<String, WeatherError> {
        let url = join_url(&self.base_url, "/v1/forecast");
        debug!(%url, "sending forecast request");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("temperature_unit", unit.as_str().to_string()),
                ("wind_speed_unit", "mph".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Transport(format!("failed to send request: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::Transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(WeatherError::Transport(format!(
                "status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    time: Option<String>,
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    wind_speed_10m: Option<f64>,
    weather_code: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current: Option<OmCurrent>,
}

/// Turn a forecast body into a snapshot.
///
/// Bodies that are not JSON at all count as transport failures; JSON of the
/// wrong shape is an invalid payload.
fn parse_snapshot(body: &str) -> Result<WeatherSnapshot, WeatherError> {
    let parsed: OmForecastResponse = serde_json::from_str(body).map_err(|e| {
        if e.is_data() {
            WeatherError::InvalidPayload(e.to_string())
        } else {
            WeatherError::Transport(format!("failed to parse forecast JSON: {e}"))
        }
    })?;

    let current = parsed
        .current
        .ok_or_else(|| WeatherError::InvalidPayload("missing `current` object".to_string()))?;

    let missing = |field: &str| WeatherError::InvalidPayload(format!("missing `current.{field}`"));

    let observed_at = current
        .time
        .as_deref()
        .and_then(|t| NaiveDateTime::parse_from_str(t, TIME_FORMAT).ok());

    Ok(WeatherSnapshot {
        temperature: current.temperature_2m.ok_or_else(|| missing("temperature_2m"))?,
        humidity: current
            .relative_humidity_2m
            .ok_or_else(|| missing("relative_humidity_2m"))?,
        wind_speed_mph: current.wind_speed_10m.ok_or_else(|| missing("wind_speed_10m"))?,
        weather_code: current.weather_code.ok_or_else(|| missing("weather_code"))?,
        observed_at,
    })
}

#[async_trait]
impl WeatherSource for WeatherClient {
    #[instrument(skip(self))]
    async fn fetch_current(
        &self,
        coords: Coordinates,
        unit: UnitPreference,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let snapshot = self
            .fetch_body(coords, unit)
            .await
            .and_then(|body| parse_snapshot(&body))
            .inspect_err(|e| warn!(error = %e, "forecast fetch failed"))?;

        info!(
            temperature = snapshot.temperature,
            weather_code = snapshot.weather_code,
            "fetched current conditions"
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_complete_current_block() {
        let body = r#"{"current":{"time":"2024-01-15T12:00","temperature_2m":18.2,
            "relative_humidity_2m":60,"wind_speed_10m":5.3,"weather_code":3}}"#;

        let snapshot = parse_snapshot(body).expect("valid payload");

        assert_eq!(snapshot.temperature, 18.2);
        assert_eq!(snapshot.humidity, 60.0);
        assert_eq!(snapshot.wind_speed_mph, 5.3);
        assert_eq!(snapshot.weather_code, 3);
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap();
        assert_eq!(snapshot.observed_at, Some(expected));
    }

    #[test]
    fn missing_time_is_not_an_error() {
        let body = r#"{"current":{"temperature_2m":1.0,"relative_humidity_2m":2,
            "wind_speed_10m":3.0,"weather_code":0}}"#;

        let snapshot = parse_snapshot(body).expect("time is optional");
        assert_eq!(snapshot.observed_at, None);
    }

    #[test]
    fn missing_current_is_invalid_payload() {
        let err = parse_snapshot(r#"{"latitude":1.0}"#).unwrap_err();
        assert!(matches!(err, WeatherError::InvalidPayload(ref m) if m.contains("current")));
    }

    #[test]
    fn incomplete_current_names_the_field() {
        let body =
            r#"{"current":{"temperature_2m":1.0,"relative_humidity_2m":2,"weather_code":0}}"#;
        let err = parse_snapshot(body).unwrap_err();
        assert_eq!(
            err,
            WeatherError::InvalidPayload("missing `current.wind_speed_10m`".to_string())
        );
    }

    #[test]
    fn mistyped_field_is_invalid_payload() {
        let body = r#"{"current":{"temperature_2m":"warm"}}"#;
        assert!(matches!(parse_snapshot(body), Err(WeatherError::InvalidPayload(_))));
    }

    #[test]
    fn non_json_body_is_transport() {
        assert!(matches!(parse_snapshot("<html>"), Err(WeatherError::Transport(_))));
    }
}
