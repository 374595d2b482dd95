//! Observability for copybench.
//!
//! Structured logging through `tracing`. User-facing progress is printed
//! separately on stdout by the application layer.

pub mod logging;

pub use logging::init_tracing;
