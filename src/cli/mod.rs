//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ccfilter",
    version,
    author = "neur0map",
    about = "Repetition-aware filter and classifier for device communication logs",
    long_about = "ccfilter reads the status lines produced by a device communication layer, \
                  categorizes them by prefix, and collapses repeated lines and short repeating \
                  groups of lines into periodic summaries."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/ccfilter/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter log lines from a file or stdin
    Filter {
        /// Input file (defaults to stdin)
        input: Option<PathBuf>,

        /// Emit one JSON record per line with decision, category and color
        #[arg(long)]
        json: bool,

        /// Print processing statistics to stderr when done
        #[arg(long)]
        stats: bool,
    },

    /// Show the category and display color of lines
    Classify {
        /// Lines to classify
        #[arg(required = true)]
        lines: Vec<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
