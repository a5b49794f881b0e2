//! State behind the dashboard: the typed query, location suggestions, the
//! fetched forecast and the upcoming-hours window derived from it.
//!
//! Network calls run in spawned tasks and report back over a channel;
//! [`ForecastStore::next_change`] drives the store by applying whichever of a
//! settled query or a finished request arrives first. Every request carries a
//! sequence number and only the newest one of each kind is applied.

use std::{sync::Arc, time::Duration};

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, warn};

use crate::{
    Config,
    clock::Clock,
    debounce::{DEFAULT_DELAY, Debouncer},
    model::{Coordinates, HourEntry, Suggestion, WeatherPayload},
    provider::{FetchError, WeatherProvider},
    window::{self, DEFAULT_WINDOW_HOURS, DayBoundary},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No forecast has arrived yet.
    Loading,
    Ready,
    /// The last forecast fetch failed; there is no data to show.
    Failed,
}

/// Which part of the state [`ForecastStore::next_change`] just replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Suggestions,
    Weather,
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub default_location: Coordinates,
    pub debounce: Duration,
    pub window_hours: usize,
    pub window_boundary: DayBoundary,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            default_location: Coordinates::default(),
            debounce: DEFAULT_DELAY,
            window_hours: DEFAULT_WINDOW_HOURS,
            window_boundary: DayBoundary::default(),
        }
    }
}

impl From<&Config> for StoreSettings {
    fn from(config: &Config) -> Self {
        Self {
            default_location: config.default_location,
            debounce: config.debounce_delay(),
            window_hours: config.window_hours,
            window_boundary: config.window_boundary,
        }
    }
}

#[derive(Debug)]
enum Completion {
    Forecast {
        request: u64,
        at: Coordinates,
        result: Result<WeatherPayload, FetchError>,
    },
    Search {
        request: u64,
        query: String,
        result: Result<Vec<Suggestion>, FetchError>,
    },
}

#[derive(Debug)]
pub struct ForecastStore {
    provider: Arc<dyn WeatherProvider>,
    clock: Arc<dyn Clock>,
    settings: StoreSettings,

    query: String,
    debouncer: Debouncer<String>,
    settled_query: watch::Receiver<String>,

    weather: Option<Arc<WeatherPayload>>,
    status: Status,
    hourly_window: Vec<HourEntry>,
    suggestions: Vec<Suggestion>,
    suggestions_visible: bool,

    last_search: u64,
    last_forecast: u64,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl ForecastStore {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        clock: Arc<dyn Clock>,
        settings: StoreSettings,
    ) -> Self {
        let debouncer = Debouncer::new(String::new(), settings.debounce);
        let settled_query = debouncer.subscribe();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Self {
            provider,
            clock,
            settings,
            query: String::new(),
            debouncer,
            settled_query,
            weather: None,
            status: Status::Loading,
            hourly_window: Vec::new(),
            suggestions: Vec::new(),
            suggestions_visible: false,
            last_search: 0,
            last_forecast: 0,
            completions_tx,
            completions_rx,
        }
    }

    /// Fetch the default location.
    pub fn start(&mut self) {
        self.fetch_weather(None);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Last query value that stayed unchanged for the debounce delay.
    pub fn settled_query(&self) -> String {
        self.debouncer.current()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn suggestions_visible(&self) -> bool {
        self.suggestions_visible
    }

    pub fn weather(&self) -> Option<&WeatherPayload> {
        self.weather.as_deref()
    }

    pub fn hourly_window(&self) -> &[HourEntry] {
        &self.hourly_window
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Replace the query. An empty query settles at once, drops the
    /// suggestions and turns every search still in flight stale; anything else
    /// is searched once it settles.
    pub fn set_query(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.query.clone_from(&text);

        if text.is_empty() {
            self.suggestions.clear();
            self.last_search += 1;
            // Retyping the previous text must settle as a new value.
            self.debouncer.reset(text);
        } else {
            self.debouncer.set(text);
        }
    }

    pub fn show_suggestions(&mut self) {
        self.suggestions_visible = true;
    }

    pub fn hide_suggestions(&mut self) {
        self.suggestions_visible = false;
    }

    /// Load the forecast for the picked location and reset the search box.
    pub fn select_suggestion(&mut self, suggestion: &Suggestion) {
        debug!(name = %suggestion.name, "suggestion selected");
        self.fetch_weather(Some(suggestion.coordinates()));
        self.set_query("");
        self.suggestions_visible = false;
    }

    /// Request the forecast for `at`, or for the default location.
    pub fn fetch_weather(&mut self, at: Option<Coordinates>) {
        let at = at.unwrap_or(self.settings.default_location);
        self.last_forecast += 1;
        let request = self.last_forecast;

        debug!(request, %at, "fetching forecast");

        let provider = Arc::clone(&self.provider);
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let result = provider.forecast(at).await;
            // Only fails once the store is gone.
            let _ = tx.send(Completion::Forecast { request, at, result });
        });
    }

    /// Wait for the next visible state change and apply it.
    ///
    /// Stale responses and settled queries are handled internally without
    /// returning. Cancel-safe.
    pub async fn next_change(&mut self) -> Option<Change> {
        loop {
            tokio::select! {
                changed = self.settled_query.changed() => {
                    if changed.is_err() {
                        return None;
                    }
                    let settled = self.settled_query.borrow_and_update().clone();
                    self.on_query_settled(settled);
                }
                Some(completion) = self.completions_rx.recv() => {
                    if let Some(change) = self.apply(completion) {
                        return Some(change);
                    }
                }
            }
        }
    }

    fn on_query_settled(&mut self, settled: String) {
        if settled.is_empty() || self.query.is_empty() {
            return;
        }

        self.last_search += 1;
        let request = self.last_search;

        debug!(request, query = %settled, "searching locations");

        let provider = Arc::clone(&self.provider);
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let result = provider.search(&settled).await;
            // Only fails once the store is gone.
            let _ = tx.send(Completion::Search { request, query: settled, result });
        });
    }

    fn apply(&mut self, completion: Completion) -> Option<Change> {
        match completion {
            Completion::Search { request, query, result } => {
                if request != self.last_search {
                    debug!(request, latest = self.last_search, %query, "discarding stale suggestions");
                    return None;
                }

                match result {
                    Ok(suggestions) => self.suggestions = suggestions,
                    Err(err) => {
                        warn!(%query, error = %err, "location search failed");
                        self.suggestions.clear();
                    }
                }
                Some(Change::Suggestions)
            }
            Completion::Forecast { request, at, result } => {
                if request != self.last_forecast {
                    debug!(request, latest = self.last_forecast, %at, "discarding stale forecast");
                    return None;
                }

                match result {
                    Ok(payload) => self.replace_weather(Some(Arc::new(payload))),
                    Err(err) => {
                        error!(%at, error = %err, "forecast fetch failed");
                        self.replace_weather(None);
                    }
                }
                Some(Change::Weather)
            }
        }
    }

    fn replace_weather(&mut self, payload: Option<Arc<WeatherPayload>>) {
        self.status = if payload.is_some() { Status::Ready } else { Status::Failed };
        self.hourly_window = window::next_hours(
            payload.as_deref(),
            self.clock.now(),
            self.settings.window_hours,
            self.settings.window_boundary,
        );
        self.weather = payload;
    }
}
