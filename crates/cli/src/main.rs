//! Fleetkey CLI
//!
//! A command-line tool for building and reading the composite keys that
//! identify containers and images across a fleet of hosts.

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{decode, dedup, encode, inspect};
use fleetkey_lib::LogFormat;
use std::path::PathBuf;
use tracing::debug;

/// Fleetkey CLI
#[derive(Parser)]
#[command(name = "fleetkey")]
#[command(author, version, about = "Composite keys for containers and images across hosts", long_about = None)]
pub struct Cli {
    /// Output format (falls back to the config file, then table)
    #[arg(long, short, env = "FLEETKEY_FORMAT", global = true)]
    pub format: Option<output::OutputFormat>,

    /// Path to a config file (defaults to ~/.config/fleetkey/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a composite key
    #[command(subcommand)]
    Encode(EncodeCommands),

    /// Split a composite key into host and resource parts
    Decode {
        /// Composite key
        key: String,

        /// Fail on keys missing a host or resource part
        #[arg(long)]
        strict: bool,
    },

    /// Classify a container ID and show its short form
    Inspect {
        /// Container ID
        id: String,
    },

    /// Deduplicate an inventory of resources gathered from many hosts
    Dedup {
        /// Inventory JSON file
        file: PathBuf,

        /// Only list resources on this host
        #[arg(long)]
        host: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum EncodeCommands {
    /// Key for a container (ID is shortened to 12 characters)
    Container {
        /// Container ID, long or short form
        id: String,

        /// Host ID (falls back to the config file)
        #[arg(long, env = "FLEETKEY_HOST")]
        host: Option<String>,

        /// Reject IDs that are not 12 or 64 hex characters
        #[arg(long)]
        check: bool,
    },

    /// Key for an image (ID is kept verbatim)
    Image {
        /// Image ID
        id: String,

        /// Host ID (falls back to the config file)
        #[arg(long, env = "FLEETKEY_HOST")]
        host: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    fleetkey_lib::init_logging(log_format, cli.verbose)?;

    let config = match &cli.config {
        Some(path) => config::Config::load_from(Some(path))?,
        None => config::Config::load()?,
    };
    debug!(?config, "Configuration loaded");

    let format = match cli.format {
        Some(format) => format,
        None => config.output_format()?.unwrap_or_default(),
    };

    let resolve_host = |host: Option<String>| -> Result<String> {
        host.or_else(|| config.default_host.clone())
            .context("No host given: pass --host, set FLEETKEY_HOST, or set default_host in the config file")
    };

    match cli.command {
        Commands::Encode(encode_cmd) => match encode_cmd {
            EncodeCommands::Container { id, host, check } => {
                encode::encode_container(&resolve_host(host)?, &id, check, format)?;
            }
            EncodeCommands::Image { id, host } => {
                encode::encode_image(&resolve_host(host)?, &id, format)?;
            }
        },
        Commands::Decode { key, strict } => {
            decode::decode_key(&key, strict, format)?;
        }
        Commands::Inspect { id } => {
            inspect::inspect_id(&id, format)?;
        }
        Commands::Dedup { file, host } => {
            dedup::dedup_inventory(&file, host.as_deref(), format)?;
        }
    }

    Ok(())
}
