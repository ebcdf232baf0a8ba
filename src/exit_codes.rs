//! Process exit codes

/// Success, including a skipped event
pub const SUCCESS: i32 = 0;

/// Guard failure, version error or backend error
pub const ERROR: i32 = 1;

/// Invalid flags, environment or configuration file
pub const CONFIG_ERROR: i32 = 2;
