pub mod metrics;
pub mod telemetry;

pub use metrics::{Metrics, Outcome};
pub use telemetry::init_telemetry;

/// Render a registry in the Prometheus text format, for a host's `/metrics` route.
pub fn encode_prometheus_text(
    registry: &prometheus::Registry,
) -> Result<Vec<u8>, prometheus::Error> {
    use prometheus::Encoder;

    let mut buffer = Vec::new();
    prometheus::TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    Ok(buffer)
}
