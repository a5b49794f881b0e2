//! JSON bodies shaped like weatherapi.com responses.

#![allow(dead_code)]

fn hour(time: &str, temp_c: f64) -> serde_json::Value {
    serde_json::json!({
        "time_epoch": 1735743600,
        "time": time,
        "temp_c": temp_c,
        "temp_f": temp_c * 9.0 / 5.0 + 32.0,
        "is_day": 1,
        "condition": { "text": "Partly cloudy", "icon": "//cdn.weatherapi.com/weather/64x64/day/116.png", "code": 1003 },
        "wind_mph": 8.1,
        "wind_kph": 13.0,
        "wind_dir": "WSW",
        "humidity": 71,
        "feelslike_c": temp_c - 2.0,
        "feelslike_f": (temp_c - 2.0) * 9.0 / 5.0 + 32.0,
        "chance_of_rain": 0
    })
}

pub fn sample_forecast_response() -> serde_json::Value {
    let hours: Vec<_> = (0..24)
        .map(|h| hour(&format!("2025-01-01 {h:02}:00"), 3.0 + f64::from(h) / 4.0))
        .collect();

    serde_json::json!({
        "location": {
            "name": "London",
            "region": "City of London, Greater London",
            "country": "United Kingdom",
            "lat": 51.52,
            "lon": -0.11,
            "tz_id": "Europe/London",
            "localtime_epoch": 1735740300,
            "localtime": "2025-01-01 14:05"
        },
        "current": {
            "last_updated": "2025-01-01 14:00",
            "temp_c": 6.2,
            "temp_f": 43.2,
            "is_day": 1,
            "condition": { "text": "Overcast", "icon": "//cdn.weatherapi.com/weather/64x64/day/122.png", "code": 1009 },
            "wind_mph": 9.4,
            "wind_kph": 15.1,
            "wind_degree": 250,
            "wind_dir": "WSW",
            "pressure_mb": 1012.0,
            "humidity": 81,
            "cloud": 100,
            "feelslike_c": 3.4,
            "feelslike_f": 38.1,
            "uv": 0.4
        },
        "forecast": {
            "forecastday": [{
                "date": "2025-01-01",
                "date_epoch": 1735689600,
                "day": {
                    "maxtemp_c": 8.9,
                    "maxtemp_f": 48.0,
                    "mintemp_c": 2.1,
                    "mintemp_f": 35.8,
                    "avgtemp_c": 5.6,
                    "avgtemp_f": 42.1,
                    "maxwind_mph": 14.1,
                    "maxwind_kph": 22.7,
                    "avghumidity": 80,
                    "daily_will_it_rain": 1,
                    "daily_chance_of_rain": 86,
                    "daily_will_it_snow": 0,
                    "daily_chance_of_snow": 0,
                    "condition": { "text": "Patchy rain nearby", "icon": "//cdn.weatherapi.com/weather/64x64/day/176.png", "code": 1063 },
                    "uv": 0.3
                },
                "astro": { "sunrise": "08:06 AM", "sunset": "04:02 PM" },
                "hour": hours
            }]
        }
    })
}

pub fn sample_search_response() -> serde_json::Value {
    serde_json::json!([
        {
            "id": 2801268,
            "name": "London",
            "region": "City of London, Greater London",
            "country": "United Kingdom",
            "lat": 51.52,
            "lon": -0.11,
            "url": "london-city-of-london-greater-london-united-kingdom"
        },
        {
            "id": 315398,
            "name": "London",
            "region": "Ontario",
            "country": "Canada",
            "lat": 42.98,
            "lon": -81.25,
            "url": "london-ontario-canada"
        }
    ])
}
