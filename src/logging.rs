//! Tracing subscriber setup shared by both binaries.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "triage_bench=info,triage_client=info,triage_server=info";

/// Install the global fmt subscriber. `RUST_LOG` takes precedence over the default filter.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
