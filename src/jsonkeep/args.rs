use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jsonkeep", version)]
#[command(about = "Crash-safe JSON document files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Create missing parent directories when saving
    #[arg(long, global = true)]
    pub create_dirs: bool,

    /// Skip fsync on save
    #[arg(long, global = true)]
    pub no_sync: bool,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a document in canonical form
    #[command(alias = "cat")]
    Show { file: PathBuf },

    /// Print the value at a dotted key path
    Get { file: PathBuf, key: String },

    /// Set the value at a dotted key path (JSON, or a plain string)
    Set {
        file: PathBuf,
        key: String,
        value: String,
    },

    /// Remove the value at a dotted key path
    #[command(alias = "rm")]
    Unset { file: PathBuf, key: String },

    /// Deep-merge a JSON object into a document
    Merge { file: PathBuf, patch: String },

    /// Slugify text
    Slug {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Print this host's outbound address, or check whether ADDRESS is local
    Ip { address: Option<String> },

    /// Get or set configuration
    Config {
        /// Configuration key (create-dirs, sync)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
