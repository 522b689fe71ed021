//! Logging bootstrap
//!
//! Thin wrapper over `env_logger` so binaries and tests initialize the log
//! facade the same way. The library itself only ever logs through the `log`
//! macros and never touches the global logger.

use env_logger::Builder;
use log::LevelFilter;

/// Initialize `env_logger` with an info-level default, overridable through
/// `RUST_LOG`. Safe to call more than once; later calls are no-ops.
pub fn init_env_logger() {
    let _ = Builder::from_env(env_logger::Env::default())
        .filter(None, LevelFilter::Info)
        .try_init();
}
