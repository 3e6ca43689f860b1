//! Core data model for the ClimaCare backend

use serde::{Deserialize, Serialize};

/// Normalized snapshot of current weather conditions.
///
/// Produced by the weather client from a provider response; every field is
/// required. Temperatures are already rounded to the nearest integer.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeatherReading {
    /// Air temperature in degrees Celsius
    pub temperature: i32,
    /// Perceived temperature in degrees Celsius
    pub feels_like: i32,
    /// Primary condition label (e.g. "Rain", "Clouds")
    pub condition: String,
    /// Longer condition description
    pub description: String,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Resolved location name
    pub location: String,
}

/// Weather data as supplied by callers of the prompt endpoints.
///
/// Every field is optional at the wire level; which fields must actually be
/// present depends on the endpoint (the citizen and hospital builders
/// require most of them, the chat builder defaults absentees to "N/A").
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct WeatherPayload {
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    pub condition: Option<String>,
    pub description: Option<String>,
    pub humidity: Option<u8>,
    pub location: Option<String>,
}

/// Citizen profile passed through verbatim into the citizen prompt
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CitizenProfile {
    pub age: u32,
    pub gender: String,
    pub food_preference: String,
    pub allergies: String,
    pub conditions: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_payload_deserializes_partial_input() {
        let payload: WeatherPayload =
            serde_json::from_str(r#"{"temperature": 30.4, "humidity": 60}"#).unwrap();
        assert_eq!(payload.temperature, Some(30.4));
        assert_eq!(payload.humidity, Some(60));
        assert!(payload.condition.is_none());
        assert!(payload.location.is_none());
    }

    #[test]
    fn test_weather_reading_serializes_all_fields() {
        let reading = WeatherReading {
            temperature: 31,
            feels_like: 34,
            condition: "Haze".to_string(),
            description: "haze".to_string(),
            humidity: 74,
            location: "Delhi".to_string(),
        };

        let value = serde_json::to_value(&reading).unwrap();
        assert_eq!(value["temperature"], 31);
        assert_eq!(value["feels_like"], 34);
        assert_eq!(value["condition"], "Haze");
        assert_eq!(value["humidity"], 74);
        assert_eq!(value["location"], "Delhi");
    }
}
