//! Pure validation logic: layout confinement and command checks.
//!
//! Nothing here touches the filesystem or the process table; everything is
//! decided from the values passed in, so the fatal-on-misconfiguration
//! paths are testable without fixtures.

pub mod command;
pub mod layout;
