use std::sync::Arc;

use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, InquireError, Password, Select, Text};
use tracing::debug;
use weather_core::{
    Change, Config, Coordinates, ForecastStore, LocalClock, StoreSettings, WeatherProvider,
    provider::provider_from_config,
};

use crate::render::{self, Units};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather dashboard in your terminal")]
pub struct Cli {
    /// Show temperatures in Celsius instead of Fahrenheit.
    #[arg(long, global = true)]
    pub celsius: bool,

    /// Defaults to `interactive`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weatherapi.com API key and the default location.
    Configure,

    /// Show current conditions, the next hours and the daily forecast.
    Show {
        /// Latitude; the configured default location is used when absent.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Print the raw forecast and the hourly window as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List locations matching a name.
    Search {
        /// Part of a city name, e.g. "lond".
        query: String,
    },

    /// Search for cities and browse their forecasts until an empty answer.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let units = if self.celsius { Units::Celsius } else { Units::Fahrenheit };

        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Show { lat, lon, json } => {
                let at = lat.zip(lon).map(|(lat, lon)| Coordinates::new(lat, lon));
                show(at, json, units).await
            }
            Command::Search { query } => search(query).await,
            Command::Interactive => interactive(units).await,
        }
    }
}

fn build_store(config: &Config) -> anyhow::Result<ForecastStore> {
    let provider: Arc<dyn WeatherProvider> = Arc::from(provider_from_config(config)?);
    Ok(ForecastStore::new(provider, Arc::new(LocalClock), StoreSettings::from(config)))
}

/// Drive the store until `wanted` changes.
async fn wait_for(store: &mut ForecastStore, wanted: Change) -> anyhow::Result<()> {
    loop {
        match store.next_change().await {
            Some(change) if change == wanted => return Ok(()),
            Some(change) => debug!(?change, "ignoring unrelated change"),
            None => bail!("Weather store stopped unexpectedly"),
        }
    }
}

/// Run a blocking prompt on the blocking pool; the runtime thread keeps
/// driving timers and requests while it is open.
async fn prompt<T, F>(ask: F) -> anyhow::Result<Result<T, InquireError>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, InquireError> + Send + 'static,
{
    tokio::task::spawn_blocking(ask).await.context("Prompt task failed")
}

fn print_weather(store: &ForecastStore, units: Units) -> anyhow::Result<()> {
    let weather = store.weather().ok_or_else(|| {
        anyhow!(
            "No weather data available.\n\
             Hint: check your network connection and API key (`weather configure`)."
        )
    })?;

    println!("{}", render::forecast(weather, store.hourly_window(), units));
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("weatherapi.com API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let change_location = Confirm::new("Change the default location?")
        .with_default(false)
        .with_help_message(&format!("Currently {}", config.default_location))
        .prompt()?;

    if change_location {
        let lat = CustomType::<f64>::new("Latitude:")
            .with_default(config.default_location.lat)
            .prompt()?;
        let lon = CustomType::<f64>::new("Longitude:")
            .with_default(config.default_location.lon)
            .prompt()?;
        config.default_location = Coordinates::new(lat, lon);
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(at: Option<Coordinates>, json: bool, units: Units) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut store = build_store(&config)?;

    store.fetch_weather(at);
    wait_for(&mut store, Change::Weather).await?;

    if json {
        let out = serde_json::json!({
            "weather": store.weather(),
            "next_hours": store.hourly_window(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_weather(&store, units)
}

async fn search(query: String) -> anyhow::Result<()> {
    let query = query.trim().to_string();
    if query.is_empty() {
        bail!("Search text must not be empty");
    }

    let config = Config::load()?;
    let mut store = build_store(&config)?;

    store.set_query(query);
    wait_for(&mut store, Change::Suggestions).await?;

    println!("{}", render::suggestions(store.suggestions()));
    Ok(())
}

async fn interactive(units: Units) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut store = build_store(&config)?;

    store.start();
    wait_for(&mut store, Change::Weather).await?;
    if let Err(err) = print_weather(&store, units) {
        eprintln!("{err}");
    }

    loop {
        let text = match prompt(|| Text::new("City:").with_help_message("empty to quit").prompt())
            .await?
        {
            Ok(text) => text,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        let text = text.trim();
        if text.is_empty() {
            break;
        }

        store.show_suggestions();
        store.set_query(text);
        wait_for(&mut store, Change::Suggestions).await?;

        if store.suggestions().is_empty() {
            println!("No matching locations.");
            store.set_query("");
            continue;
        }

        let options = store.suggestions().to_vec();
        let pick = match prompt(move || Select::new("Location:", options).prompt()).await? {
            Ok(pick) => pick,
            Err(InquireError::OperationCanceled) => {
                store.set_query("");
                store.hide_suggestions();
                continue;
            }
            Err(InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        store.select_suggestion(&pick);
        wait_for(&mut store, Change::Weather).await?;
        if let Err(err) = print_weather(&store, units) {
            eprintln!("{err}");
        }
    }

    Ok(())
}
