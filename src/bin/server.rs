//! Diagnostic service binary

use triage_bench::logging;
use triage_bench::service;
use triage_bench::storage::settings::load_settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let settings = load_settings();
    tracing::info!(
        "Starting diagnostic service on {} (model: {}, backend: {})",
        settings.server.bind_addr,
        settings.server.model_name,
        settings.server.backend_url
    );

    service::serve(&settings.server).await
}
