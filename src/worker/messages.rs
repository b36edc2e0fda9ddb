//! Worker thread message types for cross-thread communication.
//!
//! Defines the request and response protocol between the plugin thread and the
//! background worker that reads and decodes GeoJSON. Requests carry the
//! tracing context so worker spans join the plugin's trace.

use crate::domain::error::{LicenseMapError, Result};
use crate::domain::Record;
use crate::store::{Overlay, OverlaySpec};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            let trace_id = format!("{:032x}", span_context.trace_id());
            let parent_span_id = format!("{:016x}", span_context.span_id());

            tracing::debug!(
                trace_id = %trace_id,
                parent_span_id = %parent_span_id,
                "capturing trace context"
            );

            Some(Self {
                trace_id,
                parent_span_id,
            })
        } else {
            None
        }
    }
}

/// Generates builder methods for `WorkerMessage` variants that attach the
/// current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_dataset(LoadDataset { path: String }),
    load_overlay(LoadOverlay { slot: usize, spec: OverlaySpec }),
}

/// Messages sent from the plugin thread to the worker.
///
/// Every load is independent: a failed overlay never affects the dataset or
/// another overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read and decode the primary point dataset.
    LoadDataset {
        /// Resolved path of the GeoJSON file.
        path: String,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Read and decode one overlay.
    LoadOverlay {
        /// Position of the overlay in the configuration; echoed back so
        /// overlays sharing a name stay apart.
        slot: usize,

        /// Overlay description with a resolved path.
        spec: OverlaySpec,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Decodes a request posted by the plugin thread.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseMapError::Worker`] if `payload` is not a request.
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload)
            .map_err(|e| LicenseMapError::Worker(format!("invalid worker request: {e}")))
    }

    pub(crate) const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadDataset { trace_context, .. } | Self::LoadOverlay { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Responses sent from the worker back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The primary dataset was decoded.
    DatasetLoaded {
        /// Records in document order.
        records: Vec<Record>,
    },

    /// The primary dataset could not be read or decoded.
    DatasetFailed {
        message: String,
    },

    /// An overlay was decoded.
    OverlayLoaded {
        slot: usize,
        overlay: Overlay,
    },

    /// An overlay could not be read or decoded.
    OverlayFailed {
        slot: usize,
        /// Name of the failed overlay.
        name: String,
        message: String,
    },
}

impl WorkerResponse {
    /// Decodes a response posted by the worker.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseMapError::Worker`] if `payload` is not a response.
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload)
            .map_err(|e| LicenseMapError::Worker(format!("invalid worker response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeoPoint;

    #[test]
    fn builders_fill_fields() {
        let message = WorkerMessage::load_dataset("/host/dados/pedidos.geojson".to_string());
        match message {
            WorkerMessage::LoadDataset { path, .. } => assert_eq!(path, "/host/dados/pedidos.geojson"),
            WorkerMessage::LoadOverlay { .. } => panic!("wrong variant"),
        }
    }

    #[test]
    fn messages_cross_the_thread_boundary_as_json() {
        let spec = OverlaySpec::parse("Bairros|/host/dados/bairros.geojson|#FFA500|off").unwrap();
        let message = WorkerMessage::LoadOverlay {
            slot: 2,
            spec: spec.clone(),
            trace_context: None,
        };
        let json = serde_json::to_string(&message).unwrap();
        assert!(!json.contains("trace_context"));
        assert_eq!(WorkerMessage::from_json(&json).unwrap(), message);

        let mut record = Record::at(GeoPoint::new(-16.6, -49.2));
        record.status = Some("Aprovado".to_string());
        let response = WorkerResponse::DatasetLoaded { records: vec![record] };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(WorkerResponse::from_json(&json).unwrap(), response);
    }

    #[test]
    fn garbled_payloads_are_worker_errors() {
        let err = WorkerMessage::from_json("{\"LoadNothing\":{}}").unwrap_err();
        assert!(matches!(err, LicenseMapError::Worker(_)));
        assert!(err.to_string().starts_with("Worker communication error: invalid worker request"));

        let err = WorkerResponse::from_json("not json").unwrap_err();
        assert!(matches!(err, LicenseMapError::Worker(ref m) if m.starts_with("invalid worker response")));
    }
}
