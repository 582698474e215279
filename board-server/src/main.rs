use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use board_server::config::BoardConfig;
use board_server::digitransit::{DepartureSource, DigitransitClient, FixtureClient};
use board_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("board_server=info,tower_http=info")),
        )
        .init();

    let config = match BoardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Use a saved response when one is configured, else the live API
    let source: DepartureSource = match &config.fixture {
        Some(path) => match FixtureClient::new(path) {
            Ok(fixture) => fixture.into(),
            Err(e) => {
                error!("failed to load fixture: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => match DigitransitClient::new(config.digitransit.clone()) {
            Ok(client) => client.into(),
            Err(e) => {
                error!("failed to create Digitransit client: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let addr = config.bind_addr;
    info!(
        source = %source.describe(),
        stops = ?config.stop_ids,
        max_departures = config.max_departures,
        start_offset_secs = config.start_offset_secs,
        "starting departure board"
    );

    let app = create_router(AppState::new(source, config));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {addr}: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("departure board listening on http://{addr}");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
