use serde::{Deserialize, Serialize};

/// A point on the map, as accepted by the forecast endpoint (`q=lat,lon`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Value for the `q` query parameter.
    pub fn to_query(self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

/// New York City; used when no location was searched yet.
impl Default for Coordinates {
    fn default() -> Self {
        Self::new(40.73061, -73.935242)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// One candidate location returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Suggestion {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }

    /// "Name, Region, Country" with empty parts left out.
    pub fn label(&self) -> String {
        [self.name.as_str(), self.region.as_str(), self.country.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub code: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub region: String,
    pub country: String,
    /// Local time at the location, `YYYY-MM-DD HH:MM`.
    #[serde(default)]
    pub localtime: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Current {
    pub condition: Condition,
    pub temp_c: f64,
    pub temp_f: f64,
    #[serde(default)]
    pub feelslike_c: f64,
    #[serde(default)]
    pub feelslike_f: f64,
    pub humidity: u8,
    pub wind_mph: f64,
    #[serde(default)]
    pub wind_kph: f64,
    pub wind_dir: String,
}

/// Aggregates for one forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub maxtemp_c: f64,
    pub maxtemp_f: f64,
    pub mintemp_c: f64,
    pub mintemp_f: f64,
    #[serde(default)]
    pub avgtemp_c: f64,
    #[serde(default)]
    pub avgtemp_f: f64,
    pub condition: Condition,
    #[serde(default)]
    pub daily_chance_of_rain: u8,
    #[serde(default)]
    pub daily_chance_of_snow: u8,
    #[serde(default)]
    pub maxwind_mph: f64,
    #[serde(default)]
    pub maxwind_kph: f64,
    #[serde(default)]
    pub uv: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourEntry {
    /// `YYYY-MM-DD HH:MM`, in the location's local time.
    pub time: String,
    pub temp_c: f64,
    pub temp_f: f64,
    pub condition: Condition,
    pub humidity: u8,
    #[serde(default)]
    pub wind_mph: f64,
    #[serde(default)]
    pub wind_kph: f64,
    #[serde(default)]
    pub feelslike_c: f64,
    #[serde(default)]
    pub feelslike_f: f64,
}

impl HourEntry {
    /// The `HH:MM` part of [`HourEntry::time`].
    pub fn clock_time(&self) -> &str {
        self.time.rsplit(' ').next().unwrap_or(&self.time)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub day: DaySummary,
    pub hour: Vec<HourEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

/// Full response of the forecast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    pub location: Location,
    pub current: Current,
    pub forecast: Forecast,
}

impl WeatherPayload {
    pub fn today(&self) -> Option<&ForecastDay> {
        self.forecast.forecastday.first()
    }
}
