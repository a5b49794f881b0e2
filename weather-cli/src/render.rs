//! Plain-text rendering of the store's state.

use chrono::NaiveDate;
use weather_core::{ForecastDay, HourEntry, Suggestion, WeatherPayload, to_12_hour};

const MISSING: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Fahrenheit,
    Celsius,
}

impl Units {
    fn temp(self, celsius: f64, fahrenheit: f64) -> String {
        match self {
            Units::Celsius => format!("{celsius:.0}°C"),
            Units::Fahrenheit => format!("{fahrenheit:.0}°F"),
        }
    }
}

pub fn forecast(weather: &WeatherPayload, next_hours: &[HourEntry], units: Units) -> String {
    let mut out = String::new();
    let current = &weather.current;

    out.push_str(&format!("{}, {}\n", weather.location.name, weather.location.country));
    out.push_str(&format!(
        "  {}, {} (feels like {})\n",
        current.condition.text,
        units.temp(current.temp_c, current.temp_f),
        units.temp(current.feelslike_c, current.feelslike_f),
    ));
    out.push_str(&format!(
        "  Humidity {}%   Wind {:.1} mph {}\n",
        current.humidity, current.wind_mph, current.wind_dir
    ));

    out.push_str("\nNext hours\n");
    if next_hours.is_empty() {
        out.push_str(&format!("  {MISSING}\n"));
    }
    for hour in next_hours {
        out.push_str(&hour_line(hour, units));
    }

    out.push_str("\nForecast\n");
    for day in &weather.forecast.forecastday {
        out.push_str(&day_line(day, units));
    }

    out.trim_end().to_string()
}

fn hour_line(hour: &HourEntry, units: Units) -> String {
    let label = to_12_hour(hour.clock_time()).unwrap_or_else(|_| hour.time.clone());
    format!(
        "  {label:>8}  {:>5}  {:>3}%  {}\n",
        units.temp(hour.temp_c, hour.temp_f),
        hour.humidity,
        hour.condition.text,
    )
}

fn day_line(day: &ForecastDay, units: Units) -> String {
    let date = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d")
        .map(|d| d.format("%a %b %-d").to_string())
        .unwrap_or_else(|_| day.date.clone());
    let summary = &day.day;

    format!(
        "  {date:<10}  {:>5} / {:<5}  rain {:>3}%  snow {:>3}%  {}\n",
        units.temp(summary.maxtemp_c, summary.maxtemp_f),
        units.temp(summary.mintemp_c, summary.mintemp_f),
        summary.daily_chance_of_rain,
        summary.daily_chance_of_snow,
        summary.condition.text,
    )
}

pub fn suggestions(suggestions: &[Suggestion]) -> String {
    if suggestions.is_empty() {
        return "No matching locations.".to_string();
    }

    suggestions
        .iter()
        .map(|s| format!("{}  ({})", s.label(), s.coordinates()))
        .collect::<Vec<_>>()
        .join("\n")
}
