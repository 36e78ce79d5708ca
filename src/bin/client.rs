//! Interactive case runner
//!
//! Sends every catalog case to the diagnostic service, one at a time, and
//! writes the timings and answers to a CSV report.

use std::io;

use triage_bench::catalog;
use triage_bench::client::console::{prompt_model_label, ConsoleObserver, ConsolePrompt};
use triage_bench::client::{run_all, DiagnosticClient};
use triage_bench::logging;
use triage_bench::report::ReportWriter;
use triage_bench::storage::settings::load_settings;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let settings = load_settings().client;
    let client = DiagnosticClient::from_settings(&settings)?;

    match client.health().await {
        Ok(health) => tracing::info!("Service online at {} (model: {})", client.api_url(), health.modelo),
        Err(e) => tracing::warn!("Health check against {} failed: {}", client.api_url(), e),
    }

    let model_label = prompt_model_label(&mut io::stdin().lock(), &mut io::stdout())?;
    let cases = catalog::cases();
    println!(
        "Iniciando teste com {} casos para o modelo {}...",
        cases.len(),
        model_label
    );

    let mut policy = ConsolePrompt::stdio();
    let mut observer = ConsoleObserver::stdout();
    let run = run_all(&client, &cases, &model_label, &mut policy, &mut observer).await;

    let path = ReportWriter::new(&settings.results_dir).write(&run, &model_label)?;
    println!("Resultados salvos em {}", path.display());
    Ok(())
}
