//! Side-effecting operations: volume seeding and child process supervision.

pub mod seed;
pub mod supervise;
