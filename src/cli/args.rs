//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

use crate::domain::recording::Duration;

/// Voicepost - record a short voice note and post it for transcription
#[derive(Parser, Debug)]
#[command(name = "voicepost")]
#[command(version)]
#[command(about = "Record a short voice note and post it to a transcription service")]
#[command(long_about = None)]
pub struct Cli {
    /// Longest allowed recording time (e.g., 5s, 1m, 1m30s)
    #[arg(short = 'm', long, value_name = "TIME")]
    pub max_duration: Option<String>,

    /// Transcription service base URL
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Client identifier sent with every request
    #[arg(long, value_name = "ID")]
    pub user_id: Option<String>,

    /// Show desktop notifications
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed options for a recording attempt
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub max_duration: Duration,
    pub endpoint: String,
    pub user_id: String,
    pub notify: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["endpoint", "max_duration", "user_id", "notify"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
