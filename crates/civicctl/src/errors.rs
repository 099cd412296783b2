//! Exit codes for civicctl

use civic_common::{CivicError, LoginError};

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when the citizen ID is rejected
pub const EXIT_LOGIN_FAILED: i32 = 2;

/// Map an error chain to a process exit code
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<LoginError>().is_some() {
        return EXIT_LOGIN_FAILED;
    }
    match err.downcast_ref::<CivicError>() {
        Some(civic) => civic.exit_code(),
        None => EXIT_GENERAL_ERROR,
    }
}
