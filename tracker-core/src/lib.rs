//! Core library for the `weather-tracker` CLI.
//!
//! This crate defines:
//! - Domain models (coordinates, snapshots, unit preference)
//! - The weather-code label table
//! - Open-Meteo geocoding and forecast clients behind async traits
//! - The search session state machine that sequences them
//! - Configuration handling
//!
//! It is used by `tracker-cli`, but can also be driven by other front ends.

pub mod condition;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod session;

pub use condition::label_for;
pub use config::Config;
pub use error::{LocationError, SearchError, WeatherError};
pub use model::{Coordinates, Reading, UnitPreference, WeatherSnapshot};
pub use provider::{
    Geocoder, WeatherSource, clients_from_config, forecast::WeatherClient,
    geocoding::GeocodingClient,
};
pub use session::{Effect, Phase, Session, SessionState};
