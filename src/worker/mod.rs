//! Background worker for dataset and overlay loading.
//!
//! File reads and GeoJSON decoding run on a Zellij worker thread so the
//! plugin's render loop never blocks on I/O.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::LicenseMapWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
