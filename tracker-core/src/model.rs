use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// A resolved point on Earth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One point-in-time observation of current conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed_mph: f64,
    pub weather_code: i32,
    /// Local time of the observation at the location, when the service reports one.
    pub observed_at: Option<NaiveDateTime>,
}

/// Temperature scale used to request and display readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitPreference {
    #[default]
    Celsius,
    Fahrenheit,
}

impl UnitPreference {
    /// Value of the forecast endpoint's `temperature_unit` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitPreference::Celsius => "celsius",
            UnitPreference::Fahrenheit => "fahrenheit",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnitPreference::Celsius => "°C",
            UnitPreference::Fahrenheit => "°F",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            UnitPreference::Celsius => UnitPreference::Fahrenheit,
            UnitPreference::Fahrenheit => UnitPreference::Celsius,
        }
    }

    pub const fn all() -> &'static [UnitPreference] {
        &[UnitPreference::Celsius, UnitPreference::Fahrenheit]
    }
}

impl fmt::Display for UnitPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown temperature unit '{0}'. Supported units: celsius, fahrenheit.")]
pub struct UnknownUnit(pub String);

impl FromStr for UnitPreference {
    type Err = UnknownUnit;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "celsius" | "c" => Ok(UnitPreference::Celsius),
            "fahrenheit" | "f" => Ok(UnitPreference::Fahrenheit),
            _ => Err(UnknownUnit(value.to_string())),
        }
    }
}

/// A snapshot together with the unit and place it was fetched for.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub snapshot: WeatherSnapshot,
    pub unit: UnitPreference,
    pub place: String,
}
