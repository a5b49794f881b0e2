use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    Config,
    model::{Coordinates, Suggestion, WeatherPayload},
};

use super::{FetchError, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com";

const FORECAST: &str = "forecast";
const SEARCH: &str = "search";

/// Client for weatherapi.com's `forecast.json` and `search.json`.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    forecast_days: u8,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            forecast_days: crate::config::DEFAULT_FORECAST_DAYS,
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.api_key().unwrap_or_else(|| {
            warn!("No weatherapi.com API key configured; requests will be rejected upstream");
            String::new()
        });

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            forecast_days: config.forecast_days,
            http,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_forecast_days(mut self, days: u8) -> Self {
        self.forecast_days = days;
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}/v1/{endpoint}.json", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Transport { endpoint, reason: e.to_string() })?;

        let body = read_success_body(endpoint, res).await?;

        serde_json::from_str(&body)
            .map_err(|e| FetchError::Decode { endpoint, reason: e.to_string() })
    }
}

async fn read_success_body(endpoint: &'static str, res: Response) -> Result<String, FetchError> {
    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| FetchError::Transport { endpoint, reason: e.to_string() })?;

    if !status.is_success() {
        return Err(FetchError::Status {
            endpoint,
            status: status.as_u16(),
            body: truncate_body(&body),
        });
    }

    Ok(body)
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self), fields(days = self.forecast_days))]
    async fn forecast(&self, at: Coordinates) -> Result<WeatherPayload, FetchError> {
        let q = at.to_query();
        let days = self.forecast_days.to_string();

        let payload: WeatherPayload = self
            .get_json(
                FORECAST,
                &[("q", q.as_str()), ("days", days.as_str()), ("aqi", "no"), ("alerts", "no")],
            )
            .await?;

        debug!(
            location = %payload.location.name,
            days = payload.forecast.forecastday.len(),
            "forecast received"
        );
        Ok(payload)
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, FetchError> {
        let suggestions: Vec<Suggestion> = self.get_json(SEARCH, &[("q", query)]).await?;
        debug!(count = suggestions.len(), "suggestions received");
        Ok(suggestions)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
