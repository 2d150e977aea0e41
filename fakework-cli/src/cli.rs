//! CLI argument parsing definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the /fake_work endpoint
    Serve {
        /// Address to bind to
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,

        /// Port to listen on
        #[arg(long, value_name = "PORT")]
        port: Option<u16>,

        /// Cap for the response_chars parameter
        #[arg(long, value_name = "CHARS")]
        max_response_chars: Option<u64>,
    },

    /// Deploy each variant and ramp siege concurrency against it
    Siege {
        /// Target application name (overrides HEROKU_APP)
        #[arg(long, value_name = "NAME")]
        app: Option<String>,

        /// Base URL of the deployment, instead of the one derived from the app name
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,

        /// Query string appended to /fake_work (overrides QUERY)
        #[arg(long, value_name = "QUERY")]
        query: Option<String>,

        /// Shared siege log file (overrides LOG)
        #[arg(long, value_name = "PATH")]
        log_file: Option<PathBuf>,

        /// Highest concurrency level (overrides MAX_CONC)
        #[arg(long, value_name = "N")]
        max_concurrency: Option<u32>,

        /// Comma separated variant names, in run order
        #[arg(long, value_name = "LIST", value_delimiter = ',')]
        variants: Option<Vec<String>>,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        config_cmd: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        #[arg(long, value_name = "PATH")]
        config_file: PathBuf,
    },

    /// Write a sample configuration file
    Generate {
        /// Output file path
        #[arg(long, value_name = "PATH")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the configuration in effect
    Show {
        /// Output format: yaml, json
        #[arg(long, value_name = "FORMAT", default_value = "yaml")]
        format: String,
    },
}
