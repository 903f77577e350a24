use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use quotes::model::QuoteId;
use quotes::present::{
    last_sync_line, no_quotes_message, render_conflict, render_quote, render_quote_line,
    render_report, render_status,
};
use quotes::remote::RemoteClient;
use quotes::sync::{SyncEngine, SyncOutcome, spawn_periodic};
use quotes::workspace::Workspace;

use crate::cli_commands::ShellArgs;

type Engine = Arc<SyncEngine<RemoteClient>>;

const HELP: &str = "\
commands:
  random [category]       show a random quote
  list                    list quotes under the current filter
  categories              list category options
  filter [category]       show or set the filter (\"all\" for none)
  add <category> <text>   add a quote
  sync                    sync with the feed now
  conflicts               list conflicts from the last sync
  keep-local <id>         undo a server-wins update
  last                    show the last viewed quote
  help                    this text
  quit                    leave the session";

enum Flow {
    Continue,
    Quit,
}

/// Runs the interactive session. The shell keeps the quote list in memory and writes it
/// back on every change, so it owns the data directory while it runs: one-shot commands
/// against the same directory in the meantime are overwritten by its next save.
pub(super) fn handle_shell_command(ws: &Workspace, args: ShellArgs) -> Result<()> {
    let cfg = ws.read_config()?;
    let interval = args
        .interval
        .map(|s| Duration::from_secs(s.max(1)))
        .unwrap_or_else(|| cfg.sync_interval());
    let engine = super::build_engine(ws)?;
    super::runtime()?.block_on(run_shell(engine, interval))
}

async fn run_shell(engine: Engine, interval: Duration) -> Result<()> {
    {
        let session = engine.session().lock().await;
        if let Some(ms) = session.last_sync_at() {
            println!("{}", last_sync_line(ms));
        }
        match session.show_random(None)? {
            Some(q) => println!("{}", render_quote(&q)),
            None => println!("{}", no_quotes_message(&session.selected_category())),
        }
    }
    println!("type `help` for commands");

    let handle = spawn_periodic(engine.clone(), interval);
    let mut status = handle.status();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = status.borrow_and_update().clone();
                for line in render_status(&current) {
                    println!("{}", line);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("read stdin")? else {
                    break;
                };
                match run_line(&engine, line.trim()).await {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => break,
                    Err(err) => println!("error: {:#}", err),
                }
            }
        }
    }

    handle.cancel().await;
    Ok(())
}

async fn run_line(engine: &Engine, line: &str) -> Result<Flow> {
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match cmd {
        "" => {}
        "help" => println!("{}", HELP),
        "quit" | "exit" => return Ok(Flow::Quit),
        "random" => {
            let session = engine.session().lock().await;
            let category = (!rest.is_empty()).then_some(rest);
            match session.show_random(category)? {
                Some(q) => println!("{}", render_quote(&q)),
                None => println!(
                    "{}",
                    no_quotes_message(category.unwrap_or(&session.selected_category()))
                ),
            }
        }
        "list" => {
            let session = engine.session().lock().await;
            for q in session.visible_quotes() {
                println!("{}", render_quote_line(&q));
            }
        }
        "categories" => {
            let session = engine.session().lock().await;
            println!("{}", session.category_options().join(", "));
        }
        "filter" => {
            let mut session = engine.session().lock().await;
            if !rest.is_empty() {
                session.set_selected_category(rest)?;
            }
            println!("filter: {}", session.selected_category());
        }
        "add" => {
            let (category, text) = rest
                .split_once(char::is_whitespace)
                .unwrap_or((rest, ""));
            let quote = engine.add_quote(text, category).await?;
            println!("added {}", quote.id);
        }
        "sync" => match engine.sync_once().await {
            SyncOutcome::Completed(report) => {
                for line in render_report(&report) {
                    println!("{}", line);
                }
            }
            SyncOutcome::Skipped => println!("Sync already in progress."),
            SyncOutcome::Failed(msg) => println!("{}", msg),
        },
        "conflicts" => {
            let session = engine.session().lock().await;
            let pending = session.pending_conflicts();
            if pending.is_empty() {
                println!("No pending conflicts.");
            }
            for c in pending.records() {
                println!("{}", render_conflict(c));
            }
        }
        "keep-local" => {
            let mut session = engine.session().lock().await;
            match session.keep_local(&QuoteId::from(rest))? {
                Some(q) => println!("Kept local version: {}", render_quote_line(&q)),
                None => println!("No pending conflict for {}.", rest),
            }
        }
        "last" => {
            let session = engine.session().lock().await;
            match session.last_viewed() {
                Some(q) => println!("{}", render_quote(&q)),
                None => println!("Nothing viewed yet in this session."),
            }
        }
        other => println!("unknown command `{}` (try `help`)", other),
    }
    Ok(Flow::Continue)
}
