//! OpenWeatherMap client
//!
//! Wraps a single outbound GET to the current-weather endpoint and
//! reshapes the provider response into a [`WeatherReading`]. One attempt,
//! no caching; the only policy applied is the configured request timeout.

use crate::config::WeatherConfig;
use crate::models::WeatherReading;
use crate::{ClimaCareError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Weather API client for OpenWeatherMap
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    config: WeatherConfig,
}

impl WeatherClient {
    /// Create a new weather API client
    pub fn new(config: WeatherConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent("ClimaCare/0.1.0")
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch current weather for the given coordinates.
    ///
    /// Fails with `Config` when no API key is set, `Upstream` on a
    /// non-success provider status and `MalformedResponse` when the
    /// expected fields are absent.
    pub async fn fetch_weather(&self, lat: f64, lon: f64) -> Result<WeatherReading> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ClimaCareError::config("Weather API key not configured"))?;

        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.config.base_url, lat, lon, api_key
        );

        debug!("Requesting current weather for {:.4}, {:.4}", lat, lon);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClimaCareError::upstream(format!("Weather request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Weather provider answered with status {}", status);
            return Err(ClimaCareError::upstream("Failed to fetch weather data"));
        }

        let provider_response: openweathermap::CurrentWeatherResponse = response
            .json()
            .await
            .map_err(|e| ClimaCareError::malformed(format!("Invalid weather response: {e}")))?;

        let reading = openweathermap::to_reading(provider_response)?;
        info!(
            "Fetched weather for {}: {}°C, {}",
            reading.location, reading.temperature, reading.condition
        );

        Ok(reading)
    }
}

/// OpenWeatherMap API response structures and conversion utilities
mod openweathermap {
    use super::{ClimaCareError, Result, WeatherReading};
    use serde::Deserialize;

    /// Current weather response from OpenWeatherMap
    #[derive(Debug, Deserialize)]
    pub struct CurrentWeatherResponse {
        pub main: Option<MainData>,
        #[serde(default)]
        pub weather: Vec<ConditionData>,
        pub name: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct MainData {
        pub temp: Option<f64>,
        pub feels_like: Option<f64>,
        pub humidity: Option<u8>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ConditionData {
        pub main: Option<String>,
        pub description: Option<String>,
    }

    /// Reshape the provider response into a normalized reading
    pub fn to_reading(response: CurrentWeatherResponse) -> Result<WeatherReading> {
        let main = response
            .main
            .ok_or_else(|| ClimaCareError::malformed("missing main block"))?;
        let temp = main
            .temp
            .ok_or_else(|| ClimaCareError::malformed("missing main.temp"))?;
        let feels_like = main
            .feels_like
            .ok_or_else(|| ClimaCareError::malformed("missing main.feels_like"))?;
        let humidity = main
            .humidity
            .ok_or_else(|| ClimaCareError::malformed("missing main.humidity"))?;

        let condition = response
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| ClimaCareError::malformed("missing weather conditions"))?;

        Ok(WeatherReading {
            temperature: temp.round() as i32,
            feels_like: feels_like.round() as i32,
            condition: condition
                .main
                .ok_or_else(|| ClimaCareError::malformed("missing weather.main"))?,
            description: condition
                .description
                .ok_or_else(|| ClimaCareError::malformed("missing weather.description"))?,
            humidity,
            location: response
                .name
                .ok_or_else(|| ClimaCareError::malformed("missing location name"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::openweathermap::{CurrentWeatherResponse, to_reading};
    use super::*;

    fn parse(json: &str) -> CurrentWeatherResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_reading_from_full_response() {
        let response = parse(
            r#"{
                "main": {"temp": 30.42, "feels_like": 33.61, "humidity": 74},
                "weather": [{"main": "Haze", "description": "haze"}],
                "name": "Delhi"
            }"#,
        );

        let reading = to_reading(response).unwrap();
        assert_eq!(reading.temperature, 30);
        assert_eq!(reading.feels_like, 34);
        assert_eq!(reading.condition, "Haze");
        assert_eq!(reading.description, "haze");
        assert_eq!(reading.humidity, 74);
        assert_eq!(reading.location, "Delhi");
    }

    #[test]
    fn test_missing_temp_is_malformed() {
        let response = parse(
            r#"{
                "main": {"feels_like": 33.61, "humidity": 74},
                "weather": [{"main": "Haze", "description": "haze"}],
                "name": "Delhi"
            }"#,
        );

        let err = to_reading(response).unwrap_err();
        assert!(matches!(err, ClimaCareError::MalformedResponse { .. }));
        assert!(err.to_string().contains("main.temp"));
    }

    #[test]
    fn test_missing_main_block_is_malformed() {
        let response = parse(r#"{"weather": [], "name": "Delhi"}"#);
        assert!(matches!(
            to_reading(response),
            Err(ClimaCareError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_empty_conditions_is_malformed() {
        let response = parse(
            r#"{
                "main": {"temp": 20.0, "feels_like": 19.0, "humidity": 40},
                "weather": [],
                "name": "Delhi"
            }"#,
        );
        assert!(matches!(
            to_reading(response),
            Err(ClimaCareError::MalformedResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_config_error() {
        let client = WeatherClient::new(WeatherConfig::default()).unwrap();
        let err = client.fetch_weather(28.61, 77.21).await.unwrap_err();
        assert!(matches!(err, ClimaCareError::Config { .. }));
        assert!(err.to_string().contains("Weather API key not configured"));
    }
}
