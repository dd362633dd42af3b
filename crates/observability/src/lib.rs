//! Tracing/logging setup shared by the binaries.

/// Tracing configuration (filters, formats).
pub mod tracing;

pub use crate::tracing::LogFormat;

/// Initialize process-wide logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format, "info");
}

/// Like [`init`], with a custom default filter used when `RUST_LOG` is unset.
pub fn init_with_default(format: LogFormat, default_filter: &str) {
    tracing::init(format, default_filter);
}
