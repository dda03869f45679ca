//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pagination middleware toolkit
#[derive(Parser, Debug)]
#[command(name = "pagify")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Middleware configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the demo HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Number of demo items to serve
        #[arg(long, default_value = "100")]
        items: u64,
    },

    /// Encode or decode cursor tokens
    Cursor {
        #[command(subcommand)]
        command: CursorCommand,
    },

    /// Print the effective middleware configuration
    Config,
}

/// Cursor token subcommands
#[derive(Subcommand, Debug)]
pub enum CursorCommand {
    /// Encode a JSON object into a cursor token
    Encode {
        /// Cursor JSON, e.g. '{"last": 20, "limit": 10}'
        json: String,
    },

    /// Decode a cursor token into JSON
    Decode {
        /// Base64 cursor token
        token: String,
    },
}
