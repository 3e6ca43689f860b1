use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{self, AppState};

pub async fn run(state: Arc<AppState>, port: u16) -> Result<()> {
    // Wide-open CORS; not suitable for production.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(state).layer(cors);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("ClimaCare backend running at http://localhost:{}", port);
    axum::serve(listener, app)
        .await
        .context("Server terminated")?;
    Ok(())
}
