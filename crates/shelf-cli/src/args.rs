//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;

/// Work with artifacts, metadata and search on a Shelf deployment.
///
/// Paths are absolute URIs, or paths relative to `--host`
/// (e.g. `test/artifact/builds/app.tar.gz`).
#[derive(Debug, Parser)]
#[command(name = "shelf", version)]
pub struct Cli {
    /// Shelf host that relative paths resolve against.
    #[arg(long, env = "SHELF_HOST", global = true)]
    pub host: Option<Url>,

    /// Shelf token. Overrides the config file.
    #[arg(
        long = "shelf-token",
        env = "SHELF_AUTH_TOKEN",
        global = true,
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// JSON config file with `host`, `token` and `transport` settings.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download an artifact to stdout or a file.
    Get {
        path: String,
        /// Write the artifact here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the links of an artifact path.
    List { path: String },

    /// Upload a local file as an artifact.
    Upload { path: String, file: PathBuf },

    /// Search beneath a path.
    Search {
        path: String,
        /// Filter expression, e.g. `artifactName=app.tar.gz`. Repeatable.
        #[arg(long = "filter")]
        filters: Vec<String>,
        /// Sort key, e.g. `version, VERSION, DESC`. Repeatable.
        #[arg(long = "sort")]
        sorts: Vec<String>,
        /// Maximum number of results.
        #[arg(long, default_value_t = 0)]
        limit: u32,
    },

    /// Show all metadata, or one property.
    Meta {
        path: String,
        property: Option<String>,
    },

    /// Set one metadata property.
    SetMeta {
        path: String,
        name: String,
        value: String,
        /// Mark the property immutable.
        #[arg(long)]
        immutable: bool,
        /// Create the property; fails if it already exists.
        #[arg(long)]
        create: bool,
    },
}
