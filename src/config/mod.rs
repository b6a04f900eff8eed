//! Configuration model for aftercare.
//!
//! This module defines the Config struct that represents `.aftercare/config.yaml`.
//! The file has a `validation` section and a `cleanup` section. Parsing is
//! forward-compatible (unknown fields are ignored) and every missing field falls
//! back to its own default, so a partial file overrides only what it names.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::{CleanupConfig, Config, ValidationConfig};
pub use types::{LogLevel, ProjectDescriptor};
