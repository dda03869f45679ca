//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, CursorCommand};
use crate::cli::server::{self, ServerConfig};
use crate::config::{load_config, CursorConfig, OffsetConfig, PagifyConfig};
use crate::error::{Error, Result};
use crate::pagination::{decode_cursor, encode_cursor};
use crate::types::JsonValue;
use serde::Serialize;

/// Merged configuration of both middlewares, as printed by `config`
#[derive(Serialize)]
struct EffectiveConfig {
    offset: OffsetConfig,
    cursor: CursorConfig,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Serve { port, items } => {
                let config = ServerConfig {
                    options: self.load_options()?,
                    items: *items,
                };
                server::serve(config, *port).await
            }
            Commands::Cursor { command } => match command {
                CursorCommand::Encode { json } => self.encode(json),
                CursorCommand::Decode { token } => self.decode(token),
            },
            Commands::Config => self.print_config(),
        }
    }

    /// Load middleware options from `--config`, or defaults
    fn load_options(&self) -> Result<PagifyConfig> {
        match &self.cli.config {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                load_config(path)
            }
            None => Ok(PagifyConfig::default()),
        }
    }

    fn encode(&self, json: &str) -> Result<()> {
        let value: JsonValue = serde_json::from_str(json)?;
        let JsonValue::Object(cursor) = value else {
            return Err(Error::config("Cursor must be a JSON object"));
        };
        println!("{}", encode_cursor(&cursor)?);
        Ok(())
    }

    fn decode(&self, token: &str) -> Result<()> {
        let cursor = decode_cursor(token)?;
        println!("{}", serde_json::to_string_pretty(&cursor)?);
        Ok(())
    }

    fn print_config(&self) -> Result<()> {
        let options = self.load_options()?;
        let effective = EffectiveConfig {
            offset: OffsetConfig::build(options.offset),
            cursor: CursorConfig::build(options.cursor),
        };
        println!("{}", serde_json::to_string_pretty(&effective)?);
        Ok(())
    }
}
