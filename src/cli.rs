//! Command-line interface definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "tscat", version, about = "Inspect, check and query Qt Linguist translation catalogs")]
pub struct Cli {
    /// Use this config file instead of the default one
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Minimum log level (debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Echo log messages to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up one message in a catalog file
    Lookup {
        file: PathBuf,
        context: String,
        source: String,
        /// Disambiguating comment
        #[arg(long)]
        comment: Option<String>,
        /// Treat the message as numerus and pick the form for this count
        #[arg(long)]
        count: Option<u64>,
        /// Values for %1, %2, ...
        args: Vec<String>,
    },

    /// Translate through the configured catalog directory
    Tr {
        context: String,
        source: String,
        /// Language to use instead of the configured one
        #[arg(long)]
        lang: Option<String>,
        /// Values for %1, %2, ...
        args: Vec<String>,
    },

    /// Check catalogs for placeholder, duplicate and consistency problems
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Print findings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show translation coverage
    Stats {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite a catalog in canonical layout
    Normalize {
        file: PathBuf,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Only report whether the file is already canonical
        #[arg(long, conflicts_with = "output")]
        check: bool,
    },

    /// List contexts with message counts
    Contexts { file: PathBuf },

    /// List languages available in the catalog directory
    Languages {
        /// Catalog directory (defaults to the configured one)
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Catalog file prefix (defaults to the configured one)
        #[arg(long)]
        prefix: Option<String>,
    },
}
