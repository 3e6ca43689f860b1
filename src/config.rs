//! Configuration management for the ClimaCare backend
//!
//! Handles loading configuration from an optional TOML file and
//! environment variables, and validates all settings before startup.

use crate::ClimaCareError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the ClimaCare backend
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClimaCareConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Gemini text-generation configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// OpenWeatherMap configuration
    #[serde(default)]
    pub weather: WeatherConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to bind on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Gemini text-generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Google API key; generation is unavailable without one
    pub api_key: Option<String>,
    /// Model identifier
    #[serde(default = "default_gemini_model")]
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_gemini_temperature")]
    pub temperature: f32,
}

/// OpenWeatherMap settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key; the /weather endpoint fails without one
    pub api_key: Option<String>,
    /// Base URL for the current-weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

// Default value functions
fn default_port() -> u16 {
    8000
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_gemini_temperature() -> f32 {
    0.7
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
            temperature: default_gemini_temperature(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl ClimaCareConfig {
    /// Load configuration from `config.toml` (if present) and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides: CLIMACARE_GEMINI__API_KEY, CLIMACARE_SERVER__PORT, ...
        builder = builder.add_source(
            Environment::with_prefix("CLIMACARE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: ClimaCareConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if let Some(api_key) = &self.gemini.api_key {
            if api_key.is_empty() {
                return Err(ClimaCareError::config(
                    "Gemini API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }
        }

        if let Some(api_key) = &self.weather.api_key {
            if api_key.is_empty() {
                return Err(ClimaCareError::config(
                    "Weather API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }
        }

        if !(0.0..=2.0).contains(&self.gemini.temperature) {
            return Err(ClimaCareError::config(
                "Gemini sampling temperature must be between 0.0 and 2.0",
            )
            .into());
        }

        if self.gemini.model.is_empty() {
            return Err(ClimaCareError::config("Gemini model identifier cannot be empty").into());
        }

        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(ClimaCareError::config(
                "Weather API timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(ClimaCareError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClimaCareConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(config.gemini.temperature, 0.7);
        assert_eq!(
            config.weather.base_url,
            "https://api.openweathermap.org/data/2.5"
        );
        assert!(config.gemini.api_key.is_none());
        assert!(config.weather.api_key.is_none());
    }

    #[test]
    fn test_default_config_is_valid() {
        // Missing keys are allowed at startup; only the dependent calls fail.
        let config = ClimaCareConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_api_key() {
        let mut config = ClimaCareConfig::default();
        config.gemini.api_key = Some(String::new());
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_validation_rejects_bad_temperature() {
        let mut config = ClimaCareConfig::default();
        config.gemini.temperature = 5.0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("temperature"));
    }

    #[test]
    fn test_validation_rejects_bad_base_url() {
        let mut config = ClimaCareConfig::default();
        config.weather.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = ClimaCareConfig::default();
        config.weather.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}
