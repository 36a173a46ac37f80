//! Unified exit codes for the feint tools.
//! Argument parse errors keep clap's own exit code (2).

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1; // Domain failure: malformed token, undersized file, missing header
