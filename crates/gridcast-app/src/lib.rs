// Library root: re-exports all modules so integration tests and the binary
// share the same code.

pub mod cli;
pub mod config;
pub mod delivery;
pub mod report;
