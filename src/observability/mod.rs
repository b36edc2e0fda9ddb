//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK tracer → FileSpanExporter → rotating JSON file
//! ```
//!
//! The level comes from the `trace_level` option (default `"info"`). Output is
//! one OTLP/JSON document per line, rotated at 10 MiB with three backups.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - `exporter`: Span exporter and OTLP/JSON formatting
//! - `rotating`: Size-rotated trace file

mod exporter;
pub mod init;
mod rotating;

pub use init::init_tracing;
