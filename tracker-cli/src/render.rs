use tracker_core::{Reading, SessionState, UnitPreference, label_for};

/// Text shown for the current session state.
///
/// An error replaces the card; it is never shown alongside one.
pub fn render(state: &SessionState) -> String {
    if let Some(error) = state.error() {
        return error.to_string();
    }

    match state.reading() {
        Some(reading) => render_card(reading),
        None => String::new(),
    }
}

fn render_card(reading: &Reading) -> String {
    let snapshot = &reading.snapshot;
    let mut lines = vec![
        reading.place.clone(),
        format!("🌡️ {}{}", snapshot.temperature, reading.unit.symbol()),
        format!("💧 Humidity: {}%", snapshot.humidity),
        format!("💨 Wind Speed: {} mph", snapshot.wind_speed_mph),
        label_for(snapshot.weather_code).to_string(),
    ];

    if let Some(observed_at) = snapshot.observed_at {
        lines.push(format!("Observed at {} local time", observed_at.format("%Y-%m-%d %H:%M")));
    }

    lines.join("\n")
}

/// Label of the unit toggle: names the unit a toggle would switch to.
pub fn toggle_label(current: UnitPreference) -> String {
    format!("Switch to {}", current.toggled().symbol())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tracker_core::{Coordinates, LocationError, WeatherError, WeatherSnapshot};

    const PARIS: Coordinates = Coordinates { latitude: 48.85, longitude: 2.35 };

    fn paris_snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: 18.2,
            humidity: 60.0,
            wind_speed_mph: 5.3,
            weather_code: 3,
            observed_at: None,
        }
    }

    fn displaying(unit: UnitPreference, snapshot: WeatherSnapshot) -> SessionState {
        let (state, _) = SessionState::new(unit).submit("Paris");
        let (state, _) = state.location_resolved(1, Ok(PARIS));
        state.weather_fetched(1, unit, Ok(snapshot))
    }

    #[test]
    fn card_matches_layout() {
        let state = displaying(UnitPreference::Celsius, paris_snapshot());

        assert_eq!(
            render(&state),
            "Paris\n🌡️ 18.2°C\n💧 Humidity: 60%\n💨 Wind Speed: 5.3 mph\nOvercast ☁️"
        );
    }

    #[test]
    fn card_uses_unit_the_reading_was_fetched_in() {
        let state = displaying(UnitPreference::Fahrenheit, paris_snapshot());
        assert!(render(&state).contains("18.2°F"));
    }

    #[test]
    fn card_shows_observation_time_when_known() {
        let observed_at =
            NaiveDate::from_ymd_opt(2024, 5, 4).and_then(|d| d.and_hms_opt(14, 15, 0));
        let snapshot = WeatherSnapshot { observed_at, ..paris_snapshot() };
        let state = displaying(UnitPreference::Celsius, snapshot);

        assert!(render(&state).ends_with("Observed at 2024-05-04 14:15 local time"));
    }

    #[test]
    fn card_keeps_its_own_place_while_next_search_is_pending() {
        let state = displaying(UnitPreference::Celsius, paris_snapshot());
        let (state, _) = state.submit("Berlin");

        let output = render(&state);
        assert!(output.starts_with("Paris\n"), "unexpected card: {output}");
        assert!(!output.contains("Berlin"));
    }

    #[test]
    fn error_replaces_card() {
        let (state, _) = SessionState::default().submit("Nowhere123");
        let not_found = LocationError::NotFound("Nowhere123".into());
        let (state, _) = state.location_resolved(1, Err(not_found));

        assert_eq!(render(&state), "Could not find location. Please try again.");
    }

    #[test]
    fn weather_failure_renders_message_only() {
        let (state, _) = SessionState::default().submit("Paris");
        let (state, _) = state.location_resolved(1, Ok(PARIS));
        let state = state.weather_fetched(
            1,
            UnitPreference::Celsius,
            Err(WeatherError::Transport("timeout".into())),
        );

        assert_eq!(render(&state), "Failed to fetch weather data");
    }

    #[test]
    fn blank_query_prompts_for_city() {
        let (state, _) = SessionState::default().submit("  ");
        assert_eq!(render(&state), "Please enter a city name");
    }

    #[test]
    fn idle_renders_nothing() {
        assert_eq!(render(&SessionState::default()), "");
    }

    #[test]
    fn toggle_label_names_other_unit() {
        assert_eq!(toggle_label(UnitPreference::Celsius), "Switch to °F");
        assert_eq!(toggle_label(UnitPreference::Fahrenheit), "Switch to °C");
    }
}
