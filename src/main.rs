use std::sync::Arc;

use anyhow::Context;
use google_login::{config::Config, handlers};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present, matching the Cloud Console client settings
    dotenvy::dotenv().ok();
    // Log settings
    tracing_subscriber::fmt::init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    // Credentials may be empty here; the failure then surfaces at token
    // exchange, not at startup
    let config = Config::from_env(&port);

    let app_state = Arc::new(handlers::AppState::new(config));
    let app = handlers::router(app_state);

    // Binding listener; failure here is the only process-fatal condition
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .context("failed to bind tcp listener")?;

    info!("server running on port: {}", port);

    axum::serve(listener, app)
        .await
        .context("failed to start http server")?;
    Ok(())
}
