use config::{
    cors::init_cors, logger::initialize_logger, session::init_session, settings::Settings,
    startup::AppState,
};
use tracing::info;

mod app;
mod config;
mod controllers;
mod dtos;
mod error;
mod middleware;
mod models;
mod repositories;
mod routes;
mod utils;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    initialize_logger()?;

    info!("🚀 Server starting initialization...");

    let settings = Settings::from_env();
    let addr = settings.server_addr;
    let session_layer = init_session(&settings);
    let cors = init_cors(&settings.cors_origin);

    // Initialize App State
    let app_state = AppState::new(settings);

    let app = app::create_app(app_state, session_layer, cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Server started successfully at {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
