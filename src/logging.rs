//! Diagnostic logging setup.
//!
//! Diagnostics go through the `log` facade and are written to stderr by
//! `env_logger`, never to stdout. `RUST_LOG` wins when set; otherwise
//! `AFTERCARE_DEBUG` raises the default level from `warn` to `debug`.

use crate::context::debug_enabled;

/// Initialize the global logger. Safe to call more than once.
pub fn init() {
    let default_level = if debug_enabled() { "debug" } else { "warn" };

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    builder
        .format_timestamp(None)
        .format_target(false)
        .target(env_logger::Target::Stderr);

    // A second init (e.g. from tests) is harmless.
    let _ = builder.try_init();
}

