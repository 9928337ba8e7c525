//! Process-wide logging setup shared by the binaries.

/// Tracing subscriber configuration (filter, output format).
pub mod tracing;

pub use tracing::LogFormat;

/// Initialize process-wide tracing with the format chosen by
/// `STOCKROOM_LOG_FORMAT`.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::from_env());
}
