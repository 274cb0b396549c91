use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber.
/// JSON output unless `RUST_LOG_FORMAT` is set to something other than `json`.
pub fn init_tracing() {
    let use_json = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(true);
    let filter = EnvFilter::from_default_env().add_directive(Level::INFO.into());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().flatten_event(true))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}
