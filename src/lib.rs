//! ClimaCare backend
//!
//! This library provides the HTTP backend for the ClimaCare assistant:
//! a login check, weather lookup via OpenWeatherMap and three Gemini-backed
//! generation endpoints fed by fixed prompt templates.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod genai;
pub mod models;
pub mod prompt;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use auth::{CredentialStore, Role};
pub use config::ClimaCareConfig;
pub use error::ClimaCareError;
pub use genai::{GeminiClient, TextGenerator};
pub use models::{CitizenProfile, WeatherPayload, WeatherReading};
pub use weather::WeatherClient;

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ClimaCareError>;
