use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod db;
mod engine;
mod knowledge;
mod model;
mod service;

use app::AppState;
use model::config::CorsConfig;
use model::Config;

fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default().allow_any_method().allow_any_header();
    if config.allows_any_origin() {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }
    cors
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    let state = AppState::new(&config)
        .await
        .expect("Failed to initialize application state");
    let state = web::Data::new(state);

    let cors_config = config.cors.clone();

    tracing::info!("Starting helpdesk triage server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&cors_config))
            .app_data(state.clone())
            .configure(api::classify::configure)
            .configure(api::queries::configure)
            .configure(api::feedback::configure)
            .configure(api::symptoms::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
