use crate::{
    Config,
    model::{Coordinates, Suggestion, WeatherPayload},
    provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod weatherapi;

/// Why a call to the weather service produced no data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request never got a response (DNS, TLS, timeout, ...).
    #[error("Request to {endpoint} failed: {reason}")]
    Transport { endpoint: &'static str, reason: String },

    /// The service answered with a non-success status.
    #[error("{endpoint} request failed with status {status}: {body}")]
    Status { endpoint: &'static str, status: u16, body: String },

    /// The body did not match the expected shape.
    #[error("Failed to parse {endpoint} response: {reason}")]
    Decode { endpoint: &'static str, reason: String },
}

/// The two network calls behind the dashboard.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions plus the daily/hourly forecast for a location.
    async fn forecast(&self, at: Coordinates) -> Result<WeatherPayload, FetchError>;

    /// Locations whose name matches `query`.
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, FetchError>;
}

/// Construct the weatherapi.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = WeatherApiProvider::from_config(config)?;
    Ok(Box::new(provider))
}
