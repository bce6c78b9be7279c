use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
///
/// - `RUST_LOG` wins; otherwise `default_filter` (e.g. `"info"`) is used.
/// - `json` selects structured JSON lines (with the active span stack) over the compact format.
/// - Bridges `log` records into `tracing` so `log::info!` etc. are correlated.
///
/// Fails if a global subscriber is already installed.
pub fn init_telemetry(default_filter: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init()?;
    }

    // Ignore errors if a logger was already set (e.g., tests).
    let _ = tracing_log::LogTracer::init();

    Ok(())
}
