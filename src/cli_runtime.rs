use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use quotes::workspace::Workspace;

use crate::Commands;

#[derive(Parser)]
#[command(name = "quotes")]
#[command(about = "Quote book with a synced remote feed", long_about = None)]
pub(crate) struct Cli {
    /// Quotes data directory (defaults to $QUOTES_DIR, then the nearest .quotes)
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

pub(crate) fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let data_dir = cli
        .data_dir
        .or_else(|| env::var_os("QUOTES_DIR").map(PathBuf::from));
    crate::cli_exec::handle_command(data_dir, cli.command)
}

/// Explicit directory if given, otherwise the nearest `.quotes` above the current directory.
pub(crate) fn require_workspace(data_dir: Option<&PathBuf>) -> Result<Workspace> {
    match data_dir {
        Some(dir) => Workspace::open(dir),
        None => Workspace::discover(&env::current_dir().context("get current dir")?),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("QUOTES_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "quotes=debug,info"
        } else {
            "quotes=info,warn"
        })
    });

    let format = env::var("QUOTES_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}
