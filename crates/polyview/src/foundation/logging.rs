//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Binaries call this once at startup; the library itself only emits
/// through the `log` facade. Respects `RUST_LOG`.
pub fn init() {
    env_logger::init();
}

/// Initialize logging at a fixed level, for binaries that want output
/// without requiring `RUST_LOG`.
pub fn init_with_level(level: log::LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
