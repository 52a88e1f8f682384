use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use cityweather_core::{
    CitySearch, Config, Location, OpenWeatherGeocoder, OpenWeatherProvider, WeatherProvider,
    WeatherRequest,
};
use inquire::{Password, Select};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::render::{self, TemperatureUnit};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "City search and current weather")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure {
        /// Key to store; prompted for when omitted.
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Search for cities matching a name.
    Search {
        /// City name or part of it.
        query: String,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show current weather for a city.
    Show {
        /// City name or part of it.
        query: String,

        /// Temperature unit.
        #[arg(long, value_enum, default_value_t = TemperatureUnit::Celsius)]
        unit: TemperatureUnit,

        /// Choose among the matches instead of taking the best one.
        #[arg(long)]
        pick: bool,
    },
}

pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("cityweather_core={level},cityweather={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { api_key } => configure(api_key),
            Command::Search { query, json } => {
                let config = Config::load_with_env()?;
                let results = search(&config, &query).await?;

                if json {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&results)
                            .context("Failed to serialize search results")?
                    );
                } else {
                    render::print_locations(&results);
                }
                Ok(())
            }
            Command::Show { query, unit, pick } => {
                let config = Config::load_with_env()?;
                let results = search(&config, &query).await?;

                let Some(location) = choose(results, pick)? else {
                    render::print_no_results();
                    return Ok(());
                };

                let request = weather_request(&location)?;
                let provider = OpenWeatherProvider::from_config(&config)?;
                let weather = provider.get_weather(&request).await?;
                render::print_weather(&location, &weather, unit);
                Ok(())
            }
        }
    }
}

fn configure(api_key: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = match api_key {
        Some(key) => key,
        None => Password::new("OpenWeather API key:")
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?,
    };

    config.set_api_key(api_key);
    // Placeholder keys are rejected here rather than saved.
    config.api_key()?;
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn search(config: &Config, query: &str) -> anyhow::Result<Vec<Location>> {
    let geocoder = OpenWeatherGeocoder::from_config(config);
    let engine = CitySearch::new(Arc::new(geocoder));
    Ok(engine.search(query).await?)
}

/// Refuses locations whose coordinates were never backfilled.
fn weather_request(location: &Location) -> anyhow::Result<WeatherRequest> {
    debug!(location = %location.display_name(), "chosen location");

    if !location.has_coordinates() {
        bail!(
            "Could not determine coordinates for {}. Try a more specific name.",
            location.display_name()
        );
    }

    let request = WeatherRequest::from(location);
    debug!(lat = request.latitude, lon = request.longitude, "requesting current weather");
    Ok(request)
}

fn choose(mut results: Vec<Location>, pick: bool) -> anyhow::Result<Option<Location>> {
    if results.is_empty() {
        return Ok(None);
    }
    if !pick || results.len() == 1 {
        return Ok(Some(results.swap_remove(0)));
    }

    let labels: Vec<String> = results.iter().map(render::location_line).collect();
    let chosen = Select::new("Which city?", labels)
        .raw_prompt()
        .context("Failed to read selection")?;

    Ok(Some(results.swap_remove(chosen.index)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_request_uses_location_coordinates() {
        let location = Location::new("Nagpur", 21.15, 79.09, "IN", None);

        let request = weather_request(&location).unwrap();

        assert_eq!(request, WeatherRequest { latitude: 21.15, longitude: 79.09 });
    }

    #[test]
    fn weather_request_rejects_unresolved_location() {
        let err = weather_request(&Location::unresolved("Kanpur", "IN")).unwrap_err();
        assert!(err.to_string().contains("Could not determine coordinates for Kanpur, IN"));
    }

    #[test]
    fn choose_takes_best_match_without_prompting() {
        let results = vec![
            Location::new("Patna", 25.6, 85.1, "IN", None),
            Location::new("Patan", 23.8, 72.1, "IN", None),
        ];

        assert_eq!(choose(results, false).unwrap().unwrap().name, "Patna");
        assert!(choose(Vec::new(), true).unwrap().is_none());
    }
}
