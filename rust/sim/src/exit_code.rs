//! Process exit codes for `cardroom-sim`.

/// Every requested simulation finished, or the operator quit.
pub const SUCCESS: i32 = 0;

/// Bad arguments or configuration, or a scripted run had failed games.
pub const ERROR: i32 = 2;
