//! CLI command implementations
//!
//! Commands return the process exit code: 0 success, 2 configuration error,
//! 3 anonymization error. Unexpected failures surface as `Err` and map to 5.

pub mod anonymize;
pub mod init;
pub mod validate;
