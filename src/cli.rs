use clap::{Args, Parser, Subcommand};
use reqlog_dash::config::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reqlog-dash", version, about = "Request log dashboard")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the interactive chart dashboard (default)
    Dashboard(SourceArgs),

    /// Fetch once and print the grouped series
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format (text, json)
        #[arg(short = 'f', long, default_value = "text")]
        format: String,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

/// Overrides for the `[source]` configuration section
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Log endpoint URL (defaults to the configured endpoint)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Surface fetch errors instead of falling back to sample data
    #[arg(long)]
    pub strict: bool,
}

impl SourceArgs {
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(url) = &self.url {
            cfg.source.endpoint = url.clone();
        }
        if self.strict {
            cfg.source.fallback_on_error = false;
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Dashboard if none provided
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Dashboard(SourceArgs::default()))
    }
}
