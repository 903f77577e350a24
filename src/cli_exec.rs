use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use quotes::remote::RemoteClient;
use quotes::session::Session;
use quotes::sync::SyncEngine;
use quotes::workspace::Workspace;

use crate::Commands;
use crate::cli_runtime::require_workspace;

mod local;
mod shell;
mod sync;

pub(crate) fn handle_command(data_dir: Option<PathBuf>, command: Commands) -> Result<()> {
    let ws = || require_workspace(data_dir.as_ref());
    match command {
        Commands::Init(args) => local::handle_init_command(data_dir.as_ref(), args),
        Commands::Add(args) => local::handle_add_command(&ws()?, args),
        Commands::List(args) => local::handle_list_command(&ws()?, args),
        Commands::Categories => local::handle_categories_command(&ws()?),
        Commands::Random(args) => local::handle_random_command(&ws()?, args),
        Commands::Filter(args) => local::handle_filter_command(&ws()?, args),
        Commands::Status => local::handle_status_command(&ws()?),
        Commands::Export(args) => local::handle_export_command(&ws()?, args),
        Commands::Import(args) => local::handle_import_command(&ws()?, args),
        Commands::Sync(args) => sync::handle_sync_command(&ws()?, args),
        Commands::Shell(args) => shell::handle_shell_command(&ws()?, args),
    }
}

/// Session plus the sync engine wired to the configured feed.
fn build_engine(ws: &Workspace) -> Result<Arc<SyncEngine<RemoteClient>>> {
    let cfg = ws.read_config()?;
    let timeout = cfg.feed.timeout();
    let client = RemoteClient::new(cfg.feed.clone())?;
    let session = Session::open(ws.persistence(), cfg).context("open quote session")?;
    Ok(Arc::new(SyncEngine::new(
        Arc::new(tokio::sync::Mutex::new(session)),
        Arc::new(client),
        timeout,
    )))
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start tokio runtime")
}
