//! Lingofly API server entry point.

use std::error::Error;
use std::sync::Arc;

use lingofly_core::clock::SystemClock;
use lingofly_script::scenarios::los_alamitos_departure;
use lingofly_sequencer::domain::sequencer::Sequencer;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use lingofly_api::audio::AssetAudioService;
use lingofly_api::config::ApiConfig;
use lingofly_api::host::{ShutdownHost, session_ended};
use lingofly_api::routes;
use lingofly_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Lingofly API server");

    let config = ApiConfig::from_env()?;
    let scenario = los_alamitos_departure()?;
    let session_id = Uuid::new_v4();
    let sequencer = Sequencer::new(session_id, scenario.script.clone(), scenario.initial_pose)
        .with_audio_timeout(config.audio_timeout);
    tracing::info!(%session_id, scenario = scenario.title, "session created");

    let (host, ended) = ShutdownHost::new();
    let app_state = AppState::new(
        Arc::new(scenario),
        sequencer,
        Arc::new(SystemClock),
        Arc::new(AssetAudioService::new(&config.asset_dir)),
        Arc::new(host),
    );

    let ticker = tokio::spawn(run_ticker(app_state.clone(), config.tick_interval));
    let app = routes::app(app_state, &config.asset_dir);

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(ended))
        .await?;

    ticker.abort();
    tracing::info!("Lingofly API server stopped");

    Ok(())
}

/// Pumps the sequencer clock so actions fire and the audio watchdog runs
/// between requests.
async fn run_ticker(state: AppState, period: std::time::Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        if !state.tick() {
            break;
        }
    }
}

/// Resolves when the session ends or the process receives Ctrl-C.
async fn shutdown_signal(ended: watch::Receiver<bool>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            // Only the end of the session can stop the server now.
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = session_ended(ended) => tracing::info!("session over"),
        () = ctrl_c => tracing::info!("received Ctrl-C"),
    }
}
