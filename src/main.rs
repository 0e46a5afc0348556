use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use flightdesk::config::AppConfig;
use flightdesk::db;
use flightdesk::handlers;
use flightdesk::services::llm::openai::OpenAiProvider;
use flightdesk::services::llm::CompletionProvider;
use flightdesk::services::reservations::HttpReservationBackend;
use flightdesk::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let llm: Option<Box<dyn CompletionProvider>> = match config.llm_provider.as_str() {
        "openai" => {
            anyhow::ensure!(
                !config.openai_api_key.is_empty(),
                "OPENAI_API_KEY must be set when LLM_PROVIDER=openai"
            );
            tracing::info!("using OpenAI completion provider (model: {})", config.openai_model);
            Some(Box::new(OpenAiProvider::new(
                config.openai_api_key.clone(),
                config.openai_model.clone(),
                Duration::from_secs(config.llm_timeout_secs),
            )))
        }
        _ => {
            tracing::info!("no completion provider configured, using keyword rules only");
            None
        }
    };

    let reservations = HttpReservationBackend::new(
        config.backend_url.clone(),
        Duration::from_secs(config.backend_timeout_secs),
    );

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        llm,
        reservations: Box::new(reservations),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/handle-message", post(handlers::chat::handle_message))
        .route(
            "/flight-reservation/book-flight",
            post(handlers::reservations::book_flight),
        )
        .route(
            "/flight-reservation/cancel-flight",
            post(handlers::reservations::cancel_flight),
        )
        .route(
            "/flight-reservation/reschedule-flight",
            post(handlers::reservations::reschedule_flight),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
