//! Core library for the `weather` dashboard.
//!
//! This crate defines:
//! - The forecast store (query, suggestions, forecast, upcoming-hours window)
//! - A debouncer for the location search box
//! - The weatherapi.com client behind the store
//! - Configuration & credentials handling
//!
//! It is used by `weather-cli`, but the store can be driven by any front end.

pub mod clock;
pub mod config;
pub mod debounce;
pub mod model;
pub mod provider;
pub mod store;
pub mod timefmt;
pub mod window;

#[cfg(test)]
mod testing;

pub use clock::{Clock, FixedClock, LocalClock};
pub use config::Config;
pub use debounce::Debouncer;
pub use model::{Coordinates, ForecastDay, HourEntry, Suggestion, WeatherPayload};
pub use provider::{FetchError, WeatherProvider, weatherapi::WeatherApiProvider};
pub use store::{Change, ForecastStore, Status, StoreSettings};
pub use timefmt::to_12_hour;
pub use window::{DayBoundary, next_8_hours, next_hours};
