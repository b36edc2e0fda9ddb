//! Worker thread implementation for dataset loading.
//!
//! Implements the Zellij worker interface so file reads and GeoJSON decoding
//! never block the plugin's render loop. Each request is answered with exactly
//! one response.

use crate::domain::error::Result;
use crate::store::{DatasetSource, FsSource, OverlaySpec};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
///
/// Runs on a thread spawned by Zellij. The source is created lazily on the
/// first message and defaults to the sandbox filesystem.
#[derive(Serialize, Deserialize, Default)]
pub struct LicenseMapWorker {
    #[serde(skip)]
    source: Option<Box<dyn DatasetSource>>,
}

impl LicenseMapWorker {
    /// Creates a worker reading through `source`.
    #[must_use]
    pub fn new(source: Box<dyn DatasetSource>) -> Self {
        Self { source: Some(source) }
    }

    fn source(&mut self) -> &dyn DatasetSource {
        &**self.source.get_or_insert_with(|| Box::new(FsSource::new()))
    }

    /// Turns a load result into a response with consistent logging.
    fn handle_load_result<T, F, E>(operation: &str, result: Result<T>, on_success: F, on_error: E) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
        E: FnOnce(String) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "load successful");
                on_success(value)
            }
            Err(e) => {
                tracing::error!(operation = operation, error = %e, "load failed");
                on_error(format!("{operation}: {e}"))
            }
        }
    }

    fn handle_load_dataset(&mut self, path: &str) -> WorkerResponse {
        Self::handle_load_result(
            "load dataset",
            self.source().load_records(path),
            |records| {
                tracing::info!(record_count = records.len(), path = %path, "dataset loaded");
                WorkerResponse::DatasetLoaded { records }
            },
            |message| WorkerResponse::DatasetFailed { message },
        )
    }

    fn handle_load_overlay(&mut self, slot: usize, spec: &OverlaySpec) -> WorkerResponse {
        let name = spec.name.clone();
        Self::handle_load_result(
            "load overlay",
            self.source().load_overlay(spec),
            |overlay| WorkerResponse::OverlayLoaded { slot, overlay },
            |message| WorkerResponse::OverlayFailed { slot, name, message },
        )
    }

    /// Attaches the parent trace context carried by `message` to this thread.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes one request and returns its response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadDataset { path, .. } => self.handle_load_dataset(&path),
            WorkerMessage::LoadOverlay { slot, spec, .. } => self.handle_load_overlay(slot, &spec),
        }
    }
}

/// Tracks whether worker tracing has been initialized.
static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for LicenseMapWorker {
    /// Entry point for messages from the plugin thread.
    ///
    /// `message` names the response route; `payload` is a JSON
    /// [`WorkerMessage`].
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            crate::observability::init_tracing(&crate::Config::default());
        }

        let worker_message = match WorkerMessage::from_json(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::error!(error = %e, "dropping worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);

        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::error!(error = %e, "failed to serialize worker response"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DATASET: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"processo":"000.123-4/2024","status":"Aprovado"},
         "geometry":{"type":"Point","coordinates":[-49.25,-16.68]}},
        {"type":"Feature","properties":{"processo":"555.001-0/2023"},
         "geometry":{"type":"Point","coordinates":[-49.30,-16.70]}}
    ]}"#;

    fn worker_in(dir: &TempDir) -> LicenseMapWorker {
        LicenseMapWorker::new(Box::new(FsSource::with_root(dir.path())))
    }

    #[test]
    fn dataset_load_answers_with_records() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("pedidos.geojson"), DATASET).unwrap();

        let mut worker = worker_in(&dir);
        let response = worker.handle_message(WorkerMessage::load_dataset("pedidos.geojson".to_string()));
        match response {
            WorkerResponse::DatasetLoaded { records } => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[1].process.as_deref(), Some("555.001-0/2023"));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn default_worker_reads_absolute_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pedidos.geojson");
        fs::write(&path, DATASET).unwrap();

        let mut worker = LicenseMapWorker::default();
        let path = path.to_string_lossy().into_owned();
        let response = worker.handle_message(WorkerMessage::load_dataset(path.clone()));
        assert!(matches!(response, WorkerResponse::DatasetLoaded { ref records } if records.len() == 2));

        // the lazily created source is reused
        let response = worker.handle_message(WorkerMessage::load_dataset(path));
        assert!(matches!(response, WorkerResponse::DatasetLoaded { .. }));
    }

    #[test]
    fn broken_dataset_fails_without_panicking() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("pedidos.geojson"), "{ not geojson").unwrap();

        let mut worker = worker_in(&dir);
        let response = worker.handle_message(WorkerMessage::load_dataset("pedidos.geojson".to_string()));
        assert!(matches!(response, WorkerResponse::DatasetFailed { .. }));

        let response = worker.handle_message(WorkerMessage::load_dataset("ausente.geojson".to_string()));
        assert!(matches!(response, WorkerResponse::DatasetFailed { .. }));
    }

    #[test]
    fn overlay_failures_are_per_overlay() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("limite.geojson"),
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{},"geometry":{"type":"Polygon",
                 "coordinates":[[[-49.4,-16.8],[-49.1,-16.8],[-49.1,-16.5],[-49.4,-16.8]]]}}
            ]}"#,
        )
        .unwrap();

        let mut worker = worker_in(&dir);
        let ok = OverlaySpec::parse("Limite Municipal|limite.geojson|#000000|on").unwrap();
        let missing = OverlaySpec::parse("Bairros|bairros.geojson|#FFA500|off").unwrap();

        let first = worker.handle_message(WorkerMessage::load_overlay(0, missing));
        assert!(matches!(
            first,
            WorkerResponse::OverlayFailed { slot: 0, ref name, .. } if name == "Bairros"
        ));

        match worker.handle_message(WorkerMessage::load_overlay(1, ok)) {
            WorkerResponse::OverlayLoaded { slot, overlay } => {
                assert_eq!(slot, 1);
                assert_eq!(overlay.name, "Limite Municipal");
                assert_eq!(overlay.paths.len(), 1);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }
}
