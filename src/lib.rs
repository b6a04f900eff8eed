//! Aftercare: post-session validation and dead-file pruning for TypeScript
//! workspaces.
//!
//! After an automated coding session, aftercare works out which sub-projects
//! the session touched, lint/format/type-checks them, and, when everything is
//! clean after a backend session, removes dead files from the backend source
//! tree using a static import graph.

pub mod cleanup;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod matcher;
pub mod pipeline;
pub mod projects;
pub mod report;
pub mod transcript;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;
