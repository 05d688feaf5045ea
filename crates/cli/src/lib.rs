//! Claimflow CLI - command implementations
//!
//! The binary in `main.rs` only parses arguments; everything it runs lives here
//! so it can be tested without a process boundary.

pub mod commands;
pub mod context;

pub use context::AppContext;
