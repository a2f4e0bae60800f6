//! Tracing, logging, call monitoring (shared setup).

/// Initialize process-wide logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Repository call monitoring.
pub mod metrics;

pub use metrics::{CallMonitor, MonitorConfig};
