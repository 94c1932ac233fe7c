/// Exit codes for the patched-lsp binary.
///
/// These let CI and editor wrappers distinguish between different kinds of
/// failures.
/// Success
pub const SUCCESS: i32 = 0;

/// The lint engine executable could not be located
pub const UNAVAILABLE: i32 = 1;

/// Tool error - bad invocation or internal error
pub const TOOL_ERROR: i32 = 2;
