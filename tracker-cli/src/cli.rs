use std::fmt;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Select, Text};
use tracker_core::{
    Config, GeocodingClient, Session, UnitPreference, WeatherClient, clients_from_config,
};

use crate::render::{render, toggle_label};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-tracker", version, about = "Current weather for any city")]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the default unit and service URLs.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City or place name.
        city: String,

        /// Temperature unit: celsius or fahrenheit. Defaults to the configured unit.
        #[arg(long)]
        unit: Option<UnitPreference>,
    },

    /// Search and switch units from a prompt loop.
    Interactive {
        /// Unit to start in. Defaults to the configured unit.
        #[arg(long)]
        unit: Option<UnitPreference>,
    },
}

type OpenMeteoSession = Session<GeocodingClient, WeatherClient>;

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, unit } => {
                let mut session = open_session(unit)?;
                let state = session.search(&city).await;
                println!("{}", render(state));
                Ok(())
            }
            Command::Interactive { unit } => interactive(open_session(unit)?).await,
        }
    }
}

fn open_session(unit: Option<UnitPreference>) -> anyhow::Result<OpenMeteoSession> {
    let config = Config::load()?;
    let (geocoder, weather) = clients_from_config(&config)?;
    Ok(Session::new(geocoder, weather, unit.unwrap_or(config.default_unit)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    ToggleUnit(UnitPreference),
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Search => f.write_str("Search"),
            Action::ToggleUnit(current) => f.write_str(&toggle_label(*current)),
            Action::Quit => f.write_str("Quit"),
        }
    }
}

/// Esc and Ctrl-C end the loop instead of failing the command.
fn cancelled(err: &InquireError) -> bool {
    matches!(err, InquireError::OperationCanceled | InquireError::OperationInterrupted)
}

async fn interactive(mut session: OpenMeteoSession) -> anyhow::Result<()> {
    loop {
        let actions = vec![
            Action::Search,
            Action::ToggleUnit(session.state().unit()),
            Action::Quit,
        ];

        let action = match Select::new("Weather Tracker", actions).prompt() {
            Ok(action) => action,
            Err(e) if cancelled(&e) => return Ok(()),
            Err(e) => return Err(e).context("Failed to read menu selection"),
        };

        let state = match action {
            Action::Search => {
                let city = match Text::new("City:")
                    .with_placeholder("Enter city name")
                    .with_initial_value(session.state().query())
                    .prompt()
                {
                    Ok(city) => city,
                    Err(e) if cancelled(&e) => continue,
                    Err(e) => return Err(e).context("Failed to read city name"),
                };
                session.search(&city).await
            }
            Action::ToggleUnit(_) => session.toggle_unit().await,
            Action::Quit => return Ok(()),
        };

        let output = render(state);
        if !output.is_empty() {
            println!("\n{output}\n");
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let starting = UnitPreference::all()
        .iter()
        .position(|u| *u == config.default_unit)
        .unwrap_or(0);
    config.default_unit = Select::new("Default temperature unit:", UnitPreference::all().to_vec())
        .with_starting_cursor(starting)
        .prompt()
        .context("Failed to read default unit")?;

    config.geocoding_url = Text::new("Geocoding service URL:")
        .with_default(&config.geocoding_url)
        .prompt()
        .context("Failed to read geocoding URL")?;

    config.forecast_url = Text::new("Forecast service URL:")
        .with_default(&config.forecast_url)
        .prompt()
        .context("Failed to read forecast URL")?;

    let current_timeout = config.timeout_secs.map(|s| s.to_string()).unwrap_or_default();
    let timeout = Text::new("Request timeout in seconds (blank for none):")
        .with_initial_value(&current_timeout)
        .prompt()
        .context("Failed to read request timeout")?;
    config.timeout_secs = parse_timeout(&timeout)?;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

fn parse_timeout(input: &str) -> anyhow::Result<Option<u64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse()
        .map(Some)
        .with_context(|| format!("Invalid timeout '{trimmed}': expected a whole number of seconds"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_parses_city_and_unit() {
        let cli = Cli::try_parse_from(["weather-tracker", "show", "Paris", "--unit", "f"]).unwrap();
        match cli.command {
            Command::Show { city, unit } => {
                assert_eq!(city, "Paris");
                assert_eq!(unit, Some(UnitPreference::Fahrenheit));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let err = Cli::try_parse_from(["weather-tracker", "show", "Paris", "--unit", "kelvin"])
            .unwrap_err();
        assert!(err.to_string().contains("Unknown temperature unit"));
    }

    #[test]
    fn verbosity_counts_and_is_global() {
        let cli = Cli::try_parse_from(["weather-tracker", "interactive", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn menu_toggle_entry_names_other_unit() {
        assert_eq!(Action::ToggleUnit(UnitPreference::Celsius).to_string(), "Switch to °F");
    }

    #[test]
    fn timeout_blank_means_none() {
        assert_eq!(parse_timeout("  ").unwrap(), None);
        assert_eq!(parse_timeout("15").unwrap(), Some(15));
        assert!(parse_timeout("soon").is_err());
    }
}
