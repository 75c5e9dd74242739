//! Stable exit codes for the entrypoint binary.

/// Startup succeeded and the child exited cleanly.
pub const OK: i32 = 0;
/// Validation, seeding, or spawn failure, or a signal-killed child.
/// A child that exits on its own keeps its verbatim exit code instead.
pub const FAILURE: i32 = 1;
