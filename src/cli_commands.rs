use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Initialize a quotes directory (.quotes) with default config and seed quotes
    Init(InitArgs),

    /// Add a quote
    Add(AddArgs),

    /// List quotes (defaults to the saved category filter)
    List(ListArgs),

    /// List category options
    Categories,

    /// Show a random quote
    Random(RandomArgs),

    /// Show or set the saved category filter ("all" disables it)
    Filter(FilterArgs),

    /// Merge the remote feed into the local list once
    Sync(SyncArgs),

    /// Show last sync time and feed settings
    Status,

    /// Write all quotes to a JSON file
    Export(ExportArgs),

    /// Append quotes from a JSON array file
    Import(ImportArgs),

    /// Interactive session with periodic background sync
    Shell(ShellArgs),
}

#[derive(Args)]
pub(crate) struct InitArgs {
    /// Re-initialize if .quotes already exists (resets quotes to the seed set)
    #[arg(long)]
    pub(crate) force: bool,
    /// Path to initialize (defaults to current directory)
    #[arg(long)]
    pub(crate) path: Option<PathBuf>,
    /// Feed read endpoint to store in config.json
    #[arg(long)]
    pub(crate) feed_url: Option<String>,
}

#[derive(Args)]
pub(crate) struct AddArgs {
    pub(crate) text: String,
    #[arg(short, long)]
    pub(crate) category: String,
}

#[derive(Args)]
pub(crate) struct ListArgs {
    #[arg(short, long)]
    pub(crate) category: Option<String>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct RandomArgs {
    #[arg(short, long)]
    pub(crate) category: Option<String>,
}

#[derive(Args)]
pub(crate) struct FilterArgs {
    pub(crate) category: Option<String>,
}

#[derive(Args)]
pub(crate) struct SyncArgs {
    /// Emit the sync report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct ExportArgs {
    pub(crate) path: PathBuf,
}

#[derive(Args)]
pub(crate) struct ImportArgs {
    pub(crate) path: PathBuf,
}

#[derive(Args)]
pub(crate) struct ShellArgs {
    /// Override the configured sync interval (seconds)
    #[arg(long)]
    pub(crate) interval: Option<u64>,
}
