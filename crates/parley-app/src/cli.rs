//! CLI argument definitions for the Parley binary.
//!
//! Uses `clap` with derive macros. Priority resolution: CLI args > config
//! file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use parley_core::config::default_config_path;

/// Parley — session core for a voice-agent application.
#[derive(Parser, Debug)]
#[command(name = "parley", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the available agent personas.
    Agents,
    /// Print the resolved configuration.
    Config,
    /// Run a scripted conversation against a mock transport.
    Simulate {
        /// Agent to converse with (name or backend id).
        #[arg(short = 'a', long = "agent", default_value = "Support Agent")]
        agent: String,
        /// Fail the first connection attempt to exercise the transport
        /// fallback.
        #[arg(long = "fail-first")]
        fail_first: bool,
    },
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > platform default (~/.parley/config.toml).
    pub fn resolve_config_path(&self) -> PathBuf {
        match &self.config {
            Some(path) => path.clone(),
            None => default_config_path(),
        }
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}
