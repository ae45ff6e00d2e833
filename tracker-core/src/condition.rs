//! WMO weather interpretation codes mapped to display labels.
//! See: https://open-meteo.com/en/docs#weathervariables

/// Label returned for any code missing from [`CONDITIONS`].
pub const UNKNOWN_CONDITIONS: &str = "Unknown conditions 🌈";

/// Sorted by code so lookups can binary search.
const CONDITIONS: &[(i32, &str)] = &[
    (0, "Clear sky ☀️"),
    (1, "Mainly clear ⛅"),
    (2, "Partly cloudy 🌤️"),
    (3, "Overcast ☁️"),
    (45, "Foggy 🌫️"),
    (48, "Depositing rime fog 🌫️"),
    (51, "Light drizzle 🌧️"),
    (53, "Moderate drizzle 🌧️"),
    (55, "Dense drizzle 🌧️"),
    (61, "Slight rain 🌧️"),
    (63, "Moderate rain 🌧️"),
    (65, "Heavy rain 🌧️"),
    (71, "Slight snow fall ❄️"),
    (73, "Moderate snow fall ❄️"),
    (75, "Heavy snow fall ❄️"),
    (77, "Snow grains ❄️"),
    (80, "Slight rain showers 🌦️"),
    (81, "Moderate rain showers 🌦️"),
    (82, "Violent rain showers 🌊"),
    (95, "Thunderstorm ⛈️"),
    (96, "Thunderstorm with light hail ⛈️"),
    (99, "Thunderstorm with heavy hail ⛈️"),
];

/// Human-readable label for a weather code. Total over `i32`.
pub fn label_for(code: i32) -> &'static str {
    CONDITIONS
        .binary_search_by_key(&code, |(c, _)| *c)
        .map(|idx| CONDITIONS[idx].1)
        .unwrap_or(UNKNOWN_CONDITIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_and_complete() {
        assert_eq!(CONDITIONS.len(), 22);
        assert!(CONDITIONS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn documented_codes_map_exactly() {
        assert_eq!(label_for(0), "Clear sky ☀️");
        assert_eq!(label_for(2), "Partly cloudy 🌤️");
        assert_eq!(label_for(3), "Overcast ☁️");
        assert_eq!(label_for(48), "Depositing rime fog 🌫️");
        assert_eq!(label_for(82), "Violent rain showers 🌊");
        assert_eq!(label_for(99), "Thunderstorm with heavy hail ⛈️");
    }

    #[test]
    fn every_table_entry_is_reachable() {
        for (code, label) in CONDITIONS {
            assert_eq!(label_for(*code), *label);
        }
    }

    #[test]
    fn unmapped_codes_fall_back() {
        for code in [-1, 4, 56, 100, i32::MIN, i32::MAX] {
            assert_eq!(label_for(code), UNKNOWN_CONDITIONS);
        }
    }
}
