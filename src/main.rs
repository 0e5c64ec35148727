use std::sync::{Arc, Mutex};

use axum::routing::{get, post};
use axum::Router;
use tokio::sync::{broadcast, mpsc, watch};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use voicebook::config::AppConfig;
use voicebook::handlers;
use voicebook::models::{Lexicon, Session};
use voicebook::services::engine::DialogueEngine;
use voicebook::services::speech::console::ConsoleSpeechActor;
use voicebook::services::speech::SpeechActor;
use voicebook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    let lexicon = Lexicon::default_table()?;

    let (speech_tx, speech_rx) = mpsc::channel(64);
    let (advance_tx, advance_rx) = mpsc::channel(8);
    let (snapshot_tx, snapshot_rx) = watch::channel(Session::new().snapshot());
    let (events_tx, _) = broadcast::channel(256);
    let bookings = Arc::new(Mutex::new(Vec::new()));

    // The console actor stands in for the external speech actor; its
    // recognition input comes from the dev injection endpoint.
    let (actor, inject_tx) = ConsoleSpeechActor::new(speech_tx);
    let actor: Arc<dyn SpeechActor> = Arc::new(actor);
    tracing::info!(
        region = %config.azure_region,
        voice = %config.tts_voice,
        "using console speech actor"
    );

    let engine = DialogueEngine::new(
        lexicon,
        actor,
        config.clone(),
        speech_rx,
        advance_rx,
        snapshot_tx,
        events_tx.clone(),
        Arc::clone(&bookings),
    );
    tokio::spawn(engine.run());

    let state = Arc::new(AppState {
        config: config.clone(),
        advance_tx,
        snapshot_rx,
        events_tx,
        bookings,
        inject_tx: Some(inject_tx),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/session", get(handlers::session::get_session))
        .route("/api/session/advance", post(handlers::session::advance))
        .route("/api/session/events", get(handlers::session::events_stream))
        .route("/api/bookings", get(handlers::session::get_bookings))
        .route("/api/dev/utterance", post(handlers::dev::inject_utterance))
        .route("/api/dev/config", get(handlers::dev::dev_config))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
