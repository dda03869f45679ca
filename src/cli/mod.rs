//! CLI module
//!
//! Command-line interface for the demo server and cursor tooling.
//!
//! # Commands
//!
//! - `serve` - Start the demo HTTP server
//! - `cursor encode` / `cursor decode` - Convert between cursor JSON and tokens
//! - `config` - Print the effective middleware configuration

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, CursorCommand};
pub use runner::Runner;
pub use server::{app, demo_state, serve, AppState, Item, ServerConfig};
