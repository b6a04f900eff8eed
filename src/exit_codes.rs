//! Exit code constants for the aftercare CLI.
//!
//! - 0: Success (nothing to do, all validations passed, or any cleanup outcome)
//! - 1: Remediation required (a type-check failed and remediation triggering is on)
//! - 2: User error (bad arguments to a direct subcommand)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// At least one affected project failed type-checking and the host should follow up.
pub const REMEDIATION_REQUIRED: i32 = 1;

/// User error: bad arguments or an unusable path given to a direct subcommand.
pub const USER_ERROR: i32 = 2;
