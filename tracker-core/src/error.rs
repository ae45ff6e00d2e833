use thiserror::Error;

/// Failures while resolving a place name to coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("No location found for '{0}'")]
    NotFound(String),

    /// Network failure, non-2xx status or a body that is not JSON.
    #[error("Geocoding request failed: {0}")]
    Transport(String),
}

/// Failures while fetching current conditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// The body was JSON but `current` was missing, incomplete or mistyped.
    #[error("Invalid forecast payload: {0}")]
    InvalidPayload(String),

    #[error("Forecast request failed: {0}")]
    Transport(String),
}

/// What a search or unit toggle can end in.
///
/// `Display` yields the fixed user-facing message. The underlying cause stays
/// reachable through `source()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Please enter a city name")]
    EmptyQuery,

    #[error("Could not find location. Please try again.")]
    Location(#[from] LocationError),

    #[error("Failed to fetch weather data")]
    Weather(#[from] WeatherError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn user_messages_are_fixed_per_category() {
        assert_eq!(SearchError::EmptyQuery.to_string(), "Please enter a city name");
        assert_eq!(
            SearchError::from(LocationError::NotFound("x".into())).to_string(),
            "Could not find location. Please try again."
        );
        assert_eq!(
            SearchError::from(LocationError::Transport("boom".into())).to_string(),
            "Could not find location. Please try again."
        );
        assert_eq!(
            SearchError::from(WeatherError::InvalidPayload("no current".into())).to_string(),
            "Failed to fetch weather data"
        );
    }

    #[test]
    fn cause_is_kept_as_source() {
        let err = SearchError::from(WeatherError::Transport("connection refused".into()));
        let source = err.source().expect("weather errors carry a source");
        assert!(source.to_string().contains("connection refused"));
        assert!(SearchError::EmptyQuery.source().is_none());
    }
}
