//! CLI definitions for Playlist Pruner.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pruner_core::Request;

/// Playlist Pruner CLI.
#[derive(Debug, Parser)]
#[command(name = "pruner")]
#[command(about = "Find and remove repeated tracks in a YouTube Music playlist")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    /// Chrome remote debugging endpoint (overrides the config file)
    #[arg(long, env = "PRUNER_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Target id of the tab to drive (default: first playlist tab)
    #[arg(long, global = true)]
    pub tab: Option<String>,

    /// Print the raw response envelope as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against an in-memory page loaded from a JSON fixture
    #[arg(long, global = true, conflicts_with = "tab")]
    pub fixture: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Load the whole playlist and list repeated tracks
    Scan,

    /// Remove every repeated track, keeping the first occurrence
    Delete,

    /// Accept commands over HTTP
    Serve {
        /// Server host (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Commands {
    /// The one-shot request this command sends, if any.
    pub fn request(&self) -> Option<Request> {
        match self {
            Commands::Scan => Some(Request::ScanDuplicates),
            Commands::Delete => Some(Request::DeleteDuplicates),
            Commands::Serve { .. } => None,
        }
    }
}
