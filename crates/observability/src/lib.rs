//! Tracing setup shared by everything that embeds roleproxy.

/// Initialize process-wide tracing from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::{init_with, LogFormat, ParseLogFormatError, TracingConfig};
