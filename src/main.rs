use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use climacare::api::AppState;
use climacare::auth::CredentialStore;
use climacare::config::ClimaCareConfig;
use climacare::genai::{GeminiClient, TextGenerator};
use climacare::weather::WeatherClient;
use climacare::{ClimaCareError, web};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ClimaCareConfig::load()?;

    // A missing Gemini key is not fatal; generation endpoints answer with a
    // configuration error until a key is provided.
    let generator: Option<Arc<dyn TextGenerator>> = match GeminiClient::new(config.gemini.clone()) {
        Ok(client) => Some(Arc::new(client)),
        Err(e @ ClimaCareError::Config { .. }) => {
            tracing::warn!("Text generation unavailable: {e}");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let state = Arc::new(AppState {
        credentials: CredentialStore::default(),
        generator,
        weather: WeatherClient::new(config.weather.clone())?,
    });

    web::run(state, config.server.port).await
}
