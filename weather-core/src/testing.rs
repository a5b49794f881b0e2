//! Payload builders shared by unit tests.

use crate::model::{
    Condition, Current, DaySummary, Forecast, ForecastDay, HourEntry, Location, WeatherPayload,
};

pub(crate) fn condition(text: &str) -> Condition {
    Condition { text: text.to_string(), icon: String::new(), code: 1000 }
}

pub(crate) fn hour(time: &str, temp_c: f64) -> HourEntry {
    HourEntry {
        time: time.to_string(),
        temp_c,
        temp_f: temp_c * 9.0 / 5.0 + 32.0,
        condition: condition("Sunny"),
        humidity: 50,
        wind_mph: 5.0,
        wind_kph: 8.0,
        feelslike_c: temp_c,
        feelslike_f: temp_c * 9.0 / 5.0 + 32.0,
    }
}

/// A forecast day for `date` (`YYYY-MM-DD`) with `hours` hourly entries from 00:00.
pub(crate) fn day(date: &str, hours: usize) -> ForecastDay {
    ForecastDay {
        date: date.to_string(),
        day: DaySummary {
            maxtemp_c: 20.0,
            maxtemp_f: 68.0,
            mintemp_c: 10.0,
            mintemp_f: 50.0,
            avgtemp_c: 15.0,
            avgtemp_f: 59.0,
            condition: condition("Sunny"),
            daily_chance_of_rain: 10,
            daily_chance_of_snow: 0,
            maxwind_mph: 10.0,
            maxwind_kph: 16.1,
            uv: 3.0,
        },
        hour: (0..hours)
            .map(|h| hour(&format!("{date} {h:02}:00"), h as f64))
            .collect(),
    }
}

pub(crate) fn payload(name: &str, dates: &[&str]) -> WeatherPayload {
    WeatherPayload {
        location: Location {
            name: name.to_string(),
            region: String::new(),
            country: "Testland".to_string(),
            localtime: None,
        },
        current: Current {
            condition: condition("Sunny"),
            temp_c: 15.0,
            temp_f: 59.0,
            feelslike_c: 14.0,
            feelslike_f: 57.2,
            humidity: 40,
            wind_mph: 6.0,
            wind_kph: 9.7,
            wind_dir: "NW".to_string(),
        },
        forecast: Forecast { forecastday: dates.iter().map(|d| day(d, 24)).collect() },
    }
}
