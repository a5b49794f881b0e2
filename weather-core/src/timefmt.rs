use chrono::NaiveTime;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid time '{input}': expected HH:MM in 24-hour format")]
pub struct TimeFormatError {
    pub input: String,
}

/// Convert `HH:MM` (24-hour) to `H:MM AM/PM`, e.g. `"14:05"` -> `"2:05 PM"`.
pub fn to_12_hour(time: &str) -> Result<String, TimeFormatError> {
    let parsed = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|_| TimeFormatError { input: time.to_string() })?;

    Ok(parsed.format("%-I:%M %p").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn afternoon() {
        assert_eq!(to_12_hour("14:05").unwrap(), "2:05 PM");
        assert_eq!(to_12_hour("23:59").unwrap(), "11:59 PM");
    }

    #[test]
    fn midnight_and_noon_are_twelve() {
        assert_eq!(to_12_hour("00:15").unwrap(), "12:15 AM");
        assert_eq!(to_12_hour("12:00").unwrap(), "12:00 PM");
    }

    #[test]
    fn morning_has_no_leading_zero() {
        assert_eq!(to_12_hour("07:30").unwrap(), "7:30 AM");
    }

    #[test]
    fn rejects_garbage() {
        let err = to_12_hour("25:00").unwrap_err();
        assert!(err.to_string().contains("Invalid time '25:00'"));
        assert!(to_12_hour("noon").is_err());
    }
}
