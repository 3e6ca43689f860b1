//! Prompt builders for the three generation endpoints
//!
//! Three pure functions mapping structured input to fixed instruction
//! templates. The citizen and hospital builders require their weather
//! fields to be present (no defaulting); the chat builder is deliberately
//! looser and substitutes "N/A" for anything missing. That asymmetry
//! mirrors the contracts of the endpoints that call them.

use crate::models::{CitizenProfile, WeatherPayload};
use crate::{ClimaCareError, Result};

fn require<'a, T>(value: &'a Option<T>, field: &'static str) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or(ClimaCareError::MissingField { field })
}

/// Round a temperature to the nearest whole degree before interpolation
fn round_temp(value: f64) -> i64 {
    value.round() as i64
}

/// Build the citizen health-guidance prompt.
///
/// Requires temperature, feels_like, condition, humidity and location;
/// profile fields are embedded verbatim.
pub fn citizen_prompt(weather: &WeatherPayload, profile: &CitizenProfile) -> Result<String> {
    let temperature = round_temp(*require(&weather.temperature, "temperature")?);
    let feels_like = round_temp(*require(&weather.feels_like, "feels_like")?);
    let condition = require(&weather.condition, "condition")?;
    let humidity = require(&weather.humidity, "humidity")?;
    let location = require(&weather.location, "location")?;

    Ok(format!(
        "You are ClimaCare AI. Generate weather-based health guidance for a citizen.\n\
         \n\
         Weather: {temperature}°C, {condition}, {humidity}% humidity in {location}\n\
         Profile: Age {age}, {gender}, {food_preference}, Allergies: {allergies}, Conditions: {conditions}\n\
         \n\
         Format response EXACTLY as:\n\
         \n\
         ### 🌦️ Weather Summary\n\
         - Location: {location}\n\
         - Temp: {temperature}°C (feels like {feels_like}°C)\n\
         - Condition: {condition}\n\
         - Humidity: {humidity}%\n\
         \n\
         ### 🩺 Health Tips\n\
         - [Weather-based health tip 1]\n\
         - [Weather-based health tip 2]\n\
         - [Weather-based health tip 3]\n\
         \n\
         ### 🌿 Ayurvedic Tips\n\
         - [Mild ayurvedic suggestion 1]\n\
         - [Mild ayurvedic suggestion 2]\n\
         \n\
         ### 🍽️ Today's Diet Plan\n\
         - [Diet recommendation based on weather and profile]\n\
         - [Food to avoid based on weather]\n\
         - [Hydration advice]\n\
         \n\
         ### ⚠️ Allergy & Weather Alerts\n\
         - [Alert based on weather and user conditions]\n\
         \n\
         Keep all advice safe, no medicines or diagnoses.",
        age = profile.age,
        gender = profile.gender,
        food_preference = profile.food_preference,
        allergies = profile.allergies,
        conditions = profile.conditions,
    ))
}

/// Build the hospital operational-forecast prompt.
///
/// Requires temperature, condition, humidity and location.
pub fn hospital_prompt(weather: &WeatherPayload) -> Result<String> {
    let temperature = round_temp(*require(&weather.temperature, "temperature")?);
    let condition = require(&weather.condition, "condition")?;
    let humidity = require(&weather.humidity, "humidity")?;
    let location = require(&weather.location, "location")?;

    Ok(format!(
        "You are ClimaCare AI for hospitals. Generate operational guidance based on weather.\n\
         \n\
         Weather: {temperature}°C, {condition}, {humidity}% humidity in {location}\n\
         \n\
         Format response EXACTLY as:\n\
         \n\
         ### ⚕️ Weather Risk Overview\n\
         Severity: [Low/Moderate/High/Critical]\n\
         \n\
         ### 🧪 Predicted Patient Surges\n\
         - Respiratory cases: [prediction]\n\
         - Viral fever: [prediction]\n\
         - Heatstroke: [prediction]\n\
         - Accidents: [prediction]\n\
         \n\
         ### 🧑‍⚕️ Staff Planning\n\
         - Doctors needed: [number]\n\
         - Specialist departments: [departments]\n\
         - Nurses required: [number]\n\
         - Emergency team: [readiness level]\n\
         \n\
         ### 💊 Medicine & Supply Recommendations\n\
         - ORS: [quantity level]\n\
         - Masks: [quantity level]\n\
         - Nebulizers: [quantity level]\n\
         - IV fluids: [quantity level]\n\
         \n\
         ### 🛏️ ICU & Bed Forecast\n\
         - Predicted occupancy: [percentage]\n\
         - Extra beds needed: [number]\n\
         \n\
         ### 🚑 Emergency Readiness\n\
         - Ambulance standby: [level]\n\
         - Respiratory equipment: [status]\n\
         - Power backup: [status]\n\
         \n\
         Base all predictions strictly on weather conditions.",
    ))
}

const CHAT_BASE_PROMPT: &str = "You are ClimaCare AI 🌡️, a weather-aware health assistant. Provide personalized health guidance.\n\
    \n\
    Rules:\n\
    - Maximum 4-5 sentences\n\
    - Use relevant emojis (🌡️☀️🌧️❄️💧🌬️💪🥗🧘♀️)\n\
    - Include mild Ayurvedic suggestions (warm water, ginger, turmeric, kadha)\n\
    - NO medicines or diagnoses\n\
    - Be friendly and professional\n\
    - End with: \"Stay healthy! 🌟\"";

fn temp_or_na(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |t| round_temp(t).to_string())
}

/// Build the free-form chat prompt.
///
/// Weather context is appended only when both a payload and a location are
/// supplied; any missing sub-field inside the payload becomes "N/A".
pub fn chat_prompt(
    user_input: &str,
    weather: Option<&WeatherPayload>,
    location: Option<&str>,
) -> String {
    if let (Some(weather), Some(location)) = (weather, location) {
        let temp = temp_or_na(weather.temperature);
        let feels_like = temp_or_na(weather.feels_like);
        let condition = weather.condition.as_deref().unwrap_or("N/A");
        let humidity = weather
            .humidity
            .map_or_else(|| "N/A".to_string(), |h| h.to_string());

        format!(
            "{CHAT_BASE_PROMPT}\n\
             \n\
             Current weather in {location}:\n\
             - Temperature: {temp}°C (feels like {feels_like}°C)\n\
             - Condition: {condition}\n\
             - Humidity: {humidity}%\n\
             \n\
             Consider this weather data in your health advice.\n\
             \n\
             Question: {user_input}\n\
             \n\
             Personalized advice:"
        )
    } else {
        format!("{CHAT_BASE_PROMPT}\n\nQuestion: {user_input}\n\nHealth advice:")
    }
}
