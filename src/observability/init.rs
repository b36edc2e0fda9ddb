//! Tracing subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the trace file inside the state directory.
pub const TRACE_FILE_NAME: &str = "licensemap-otlp.json";

/// Installs the global subscriber: `EnvFilter` from `trace_level` (default
/// `info`) feeding an OpenTelemetry layer that exports to
/// `/host/.local/share/zellij/licensemap/licensemap-otlp.json`.
///
/// Tracing is optional: if the state directory cannot be created nothing is
/// installed. Only the first call in a process takes effect.
///
/// # Example
///
/// ```rust
/// use licensemap::observability::init_tracing;
/// use licensemap::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let state_dir = crate::infrastructure::get_state_dir();
    if std::fs::create_dir_all(&state_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", "licensemap")]);
    let provider = exporter::create_tracer_provider(state_dir.join(TRACE_FILE_NAME), resource);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(provider.tracer("licensemap")));

    let _ = subscriber.try_init();
}
