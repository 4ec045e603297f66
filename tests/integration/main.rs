//! HTTP integration tests
//!
//! Each test spawns the full router on an ephemeral port, backed by its own
//! in-memory SQLite database.

mod common;
mod loans;
mod security;
