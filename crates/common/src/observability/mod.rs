//! Observability primitives
//!
//! Library crates only emit `tracing` events; binaries call
//! [`init_tracing`] once at startup to decide where those events go.

pub mod logging;

pub use logging::{init_tracing, ObservabilityError};
