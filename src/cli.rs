use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use assistant_cost::config::DEFAULT_CONFIG_FILE;

#[derive(Parser, Debug)]
#[command(
    name = "assistant-cost",
    version,
    about = "Monthly cost model for a per-user AI assistant"
)]
pub struct Cli {
    /// Scenario file path (TOML; missing file falls back to built-in defaults)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Estimate the monthly cost of the configured scenario (default)
    Estimate {
        /// Show per-modality unit costs and tier splits
        #[arg(short, long)]
        detailed: bool,

        /// Print the report as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Run a parameter sweep over one calculator
    Sweep {
        #[arg(value_enum, default_value = "all")]
        target: SweepTarget,
    },

    /// Preview the placeholder transcript for a history window
    History {
        /// User+assistant pairs kept in the window
        #[arg(short, long, default_value = "25")]
        pairs: u32,

        /// Average tokens per message
        #[arg(short, long, default_value = "100")]
        tokens: usize,

        /// Current user message appended at the end
        #[arg(short, long, default_value = "What does this document say?")]
        input: String,

        /// Characters of the transcript to print
        #[arg(long, default_value = "500")]
        preview: usize,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Validate the configuration
    Validate,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepTarget {
    Messages,
    Documents,
    Images,
    Videos,
    All,
}

impl Cli {
    /// Get the command to execute, defaulting to Estimate if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Estimate {
            detailed: false,
            json: false,
        })
    }
}
