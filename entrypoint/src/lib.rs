//! Container entrypoint glue for the site image.
//!
//! The entrypoint has exactly two jobs, run in strict order:
//!
//! - **Seed**: populate the persistent public volume from the read-only
//!   defaults bundled into the image, at most once, never destructively.
//! - **Supervise**: spawn the real server command as a child, forward
//!   SIGINT/SIGTERM to it, and exit with the child's own status.
//!
//! The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure validation logic (layout confinement, command
//!   validation). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (volume seeding, child process
//!   supervision). Isolated so tests can drive them against temp dirs and
//!   injected signal channels.
//!
//! Restart policy deliberately does not exist here: one child, one exit.
//! The container orchestrator owns restarts.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
