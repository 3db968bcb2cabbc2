use log::*;
use service::{config::Config, init_store, logging::Logger, AppState};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::new();

    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to initialize logger: {e}");
        return ExitCode::FAILURE;
    }

    info!("Starting up crm_connect ({})", config.runtime_env());

    if config.hubspot_client_id().is_none() || config.hubspot_client_secret().is_none() {
        warn!("HubSpot client ID or secret is not set; the connect flow will fail until both are configured");
    }

    // The sweeper runs for the life of the process.
    let (store, _sweeper) = init_store(&config);
    let app_state = AppState::new(config, store);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server stopped: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
