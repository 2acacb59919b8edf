use anyhow::Context;
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use inquire::{Password, Select, Text};
use weatherdash_core::{
    Config, Coordinates, Dashboard, FixedLocator, GeocodingMode, LocateOutcome, WeatherClient,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "Weather dashboard in your terminal")]
pub struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key and defaults.
    Configure,

    /// Show weather for a city.
    Show {
        /// City or place name.
        city: String,

        /// Print the view-model as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show weather for the current position, falling back to the default city.
    Here {
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Print the view-model as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Switch between Celsius and Fahrenheit and remember the choice.
    Units,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json } => {
                let config = Config::load()?;
                let mut dash = dashboard(&config, None)?;
                dash.search(&city)
                    .await
                    .with_context(|| format!("Error fetching weather for {city}"))?;
                print_view(&dash, json)
            }
            Command::Here { lat, lon, json } => {
                let config = Config::load()?;
                let coords = match (lat, lon) {
                    (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)?),
                    _ => None,
                };
                let mut dash = dashboard(&config, coords)?;
                let outcome = dash.locate().await.context("Error fetching weather")?;
                if let LocateOutcome::Fallback { reason, city } = outcome {
                    eprintln!("Geolocation error: {reason}. Showing weather for {city}.");
                }
                print_view(&dash, json)
            }
            Command::Units => {
                let path = Config::config_file_path()?;
                let units = Config::load_from(&path)?.units().toggled();
                Config::store_units(&path, units)?;
                println!("Units set to {units:?} ({}).", units.toggle_label());
                Ok(())
            }
        }
    }
}

fn dashboard(config: &Config, coords: Option<Coordinates>) -> anyhow::Result<Dashboard<Local>> {
    let client = WeatherClient::from_config(config)?;
    Ok(
        Dashboard::new(client, Box::new(FixedLocator::new(coords)), Local, config.units())
            .with_default_city(config.default_city.clone())
            .with_units_file(Config::config_file_path()?),
    )
}

fn print_view(dash: &Dashboard<Local>, json: bool) -> anyhow::Result<()> {
    let Some(view) = dash.state().view_model() else {
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{}", render::render(view, dash.state().units(), Utc::now(), &Local)?);
    }
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("API key prompt aborted")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    let current_mode = config.geocoding_mode().unwrap_or_default();
    let modes = GeocodingMode::all().to_vec();
    let start = modes.iter().position(|m| *m == current_mode).unwrap_or(0);
    let mode = Select::new("Reverse geocoding:", modes)
        .with_starting_cursor(start)
        .prompt()
        .context("Geocoding prompt aborted")?;
    config.set_geocoding_mode(mode);

    let city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Default city prompt aborted")?;
    if !city.trim().is_empty() {
        config.default_city = city.trim().to_string();
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
