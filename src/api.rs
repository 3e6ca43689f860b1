//! HTTP API: the five ClimaCare endpoints
//!
//! Each handler is a thin composition over the credential store, the
//! prompt builders and the upstream clients. Failure surfacing differs by
//! endpoint on purpose: login answers 401, the generation and weather
//! endpoints answer 4xx/5xx with the error text as `detail`, and chat
//! always answers 200 with the error folded into the bot text. Unifying
//! these would change the external contract.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};
use serde::{Deserialize, Serialize};

use crate::auth::{CredentialStore, Role};
use crate::genai::TextGenerator;
use crate::models::{CitizenProfile, WeatherPayload, WeatherReading};
use crate::weather::WeatherClient;
use crate::{ClimaCareError, prompt};

/// Read-only dependencies shared by all handlers
pub struct AppState {
    pub credentials: CredentialStore,
    /// Unset when no Gemini key was configured at startup
    pub generator: Option<Arc<dyn TextGenerator>>,
    pub weather: WeatherClient,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub role: Role,
    pub success: bool,
}

#[derive(Deserialize)]
pub struct CitizenAiRequest {
    pub weather: WeatherPayload,
    pub profile: CitizenProfile,
}

#[derive(Deserialize)]
pub struct HospitalAiRequest {
    pub weather: WeatherPayload,
}

#[derive(Deserialize)]
pub struct WeatherRequest {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub user_input: String,
    pub weather: Option<WeatherPayload>,
    pub location: Option<String>,
}

#[derive(Serialize)]
pub struct GenerationResponse {
    pub response: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub bot: String,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

type ApiError = (StatusCode, Json<ErrorDetail>);

fn error_response(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorDetail {
            detail: detail.into(),
        }),
    )
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/citizen/ai", post(citizen_ai))
        .route("/hospital/ai", post(hospital_ai))
        .route("/weather", post(get_weather))
        .route("/chat", post(chat))
        .with_state(state)
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let role = state
        .credentials
        .authenticate(&request.username, &request.password)
        .map_err(|e| error_response(StatusCode::UNAUTHORIZED, e.to_string()))?;

    Ok(Json(LoginResponse {
        role,
        success: true,
    }))
}

/// Run a prompt through the configured generator
async fn generate(state: &AppState, prompt: &str) -> Result<String, ClimaCareError> {
    let generator = state
        .generator
        .as_ref()
        .ok_or_else(|| ClimaCareError::config("Gemini API key not configured"))?;
    generator.generate(prompt).await
}

async fn citizen_ai(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CitizenAiRequest>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let prompt = prompt::citizen_prompt(&request.weather, &request.profile)
        .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let response = generate(&state, &prompt)
        .await
        .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(GenerationResponse { response }))
}

async fn hospital_ai(
    State(state): State<Arc<AppState>>,
    Json(request): Json<HospitalAiRequest>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let prompt = prompt::hospital_prompt(&request.weather)
        .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let response = generate(&state, &prompt)
        .await
        .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(GenerationResponse { response }))
}

async fn get_weather(
    State(state): State<Arc<AppState>>,
    Json(request): Json<WeatherRequest>,
) -> Result<Json<WeatherReading>, ApiError> {
    let reading = state
        .weather
        .fetch_weather(request.lat, request.lon)
        .await
        .map_err(|e| {
            // Upstream refusals map to 400, everything else stays a 500.
            let status = match e {
                ClimaCareError::Upstream { .. } => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            error_response(status, e.to_string())
        })?;

    Ok(Json(reading))
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let prompt = prompt::chat_prompt(
        &request.user_input,
        request.weather.as_ref(),
        request.location.as_deref(),
    );

    // Chat never surfaces an HTTP error; failures become bot text.
    let bot = match generate(&state, &prompt).await {
        Ok(text) if text.is_empty() => {
            "I'm having trouble generating a response. Please try again.".to_string()
        }
        Ok(text) => text,
        Err(e) => {
            tracing::error!("Chat generation failed: {e}");
            format!("Error: {e}")
        }
    };

    Json(ChatResponse { bot })
}
