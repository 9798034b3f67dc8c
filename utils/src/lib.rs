//! Shared utilities for the Quorum governance engine.

pub mod logging;

pub use logging::{init_logging, init_tracing, LogFormat, LoggingError};
