//! # Cadence CLI
//!
//! Command-line front-end for Cadence Desk.
//!
//! ## Commands
//!
//! - `calls` / `mailings` - `list`, `count`, `stats`, `send`, `create`
//! - `contacts` - `list --cadence`, `actions`, `set-status`, `remove`
//! - `cadences` - `show`, `update`
//! - `users` - `list`
//!

pub mod args;
pub mod commands;
pub mod output;

pub use args::Cli;
pub use commands::{preview_actions, resolve_config, run};

// Re-export dependencies for use in main.rs
pub use cadence_client;
pub use cadence_core;
pub use cadence_ui;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = "cadence-desk";
