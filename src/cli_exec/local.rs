use std::path::PathBuf;

use anyhow::{Context, Result};

use quotes::model::FeedConfig;
use quotes::present::{last_sync_line, no_quotes_message, render_quote, render_quote_line};
use quotes::remote::{QuoteFeed, RemoteClient};
use quotes::workspace::Workspace;

use crate::cli_commands::{
    AddArgs, ExportArgs, FilterArgs, ImportArgs, InitArgs, ListArgs, RandomArgs,
};

pub(super) fn handle_init_command(data_dir: Option<&PathBuf>, args: InitArgs) -> Result<()> {
    let ws = match data_dir {
        Some(dir) => Workspace::init_at(dir, args.force)?,
        None => {
            let root = match args.path {
                Some(path) => path,
                None => std::env::current_dir().context("get current dir")?,
            };
            Workspace::init(&root, args.force)?
        }
    };

    if let Some(url) = args.feed_url {
        let mut cfg = ws.read_config()?;
        cfg.feed = FeedConfig {
            fetch_url: url,
            ..cfg.feed
        };
        ws.write_config(&cfg)?;
    }

    println!("Initialized quotes at {}", ws.dir.display());
    Ok(())
}

pub(super) fn handle_add_command(ws: &Workspace, args: AddArgs) -> Result<()> {
    let mut session = ws.open_session()?;
    let quote = session.add_quote(&args.text, &args.category)?;
    println!("{}", quote.id);

    if session.config().post_new_quotes {
        let client = RemoteClient::new(session.config().feed.clone())?;
        super::runtime()?.block_on(async {
            if let Err(err) = client.post_quote(&quote).await {
                tracing::warn!(id = %quote.id, "failed to post quote: {}", err);
            }
        });
    }
    Ok(())
}

pub(super) fn handle_list_command(ws: &Workspace, args: ListArgs) -> Result<()> {
    let session = ws.open_session()?;
    let category = args
        .category
        .unwrap_or_else(|| session.selected_category());
    let quotes = session.store().by_category(&category);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&quotes).context("serialize quotes json")?
        );
    } else if quotes.is_empty() {
        println!("{}", no_quotes_message(&category));
    } else {
        for q in &quotes {
            println!("{}", render_quote_line(q));
        }
    }
    Ok(())
}

pub(super) fn handle_categories_command(ws: &Workspace) -> Result<()> {
    let session = ws.open_session()?;
    let selected = session.selected_category();
    for c in session.category_options() {
        let marker = if c == selected { "*" } else { " " };
        println!("{} {}", marker, c);
    }
    Ok(())
}

pub(super) fn handle_random_command(ws: &Workspace, args: RandomArgs) -> Result<()> {
    let session = ws.open_session()?;
    match session.show_random(args.category.as_deref())? {
        Some(q) => println!("{}", render_quote(&q)),
        None => {
            let category = args
                .category
                .unwrap_or_else(|| session.selected_category());
            println!("{}", no_quotes_message(&category));
        }
    }
    Ok(())
}

pub(super) fn handle_filter_command(ws: &Workspace, args: FilterArgs) -> Result<()> {
    let mut session = ws.open_session()?;
    if let Some(category) = args.category {
        session.set_selected_category(&category)?;
    }
    println!("{}", session.selected_category());
    Ok(())
}

pub(super) fn handle_status_command(ws: &Workspace) -> Result<()> {
    let cfg = ws.read_config()?;
    let session = ws.open_session()?;
    println!("quotes: {}", session.store().len());
    println!("filter: {}", session.selected_category());
    println!("feed: {}", cfg.feed.fetch_url);
    println!("post new quotes: {}", cfg.post_new_quotes);
    match session.last_sync_at() {
        Some(ms) => println!("{}", last_sync_line(ms)),
        None => println!("Never synced"),
    }
    Ok(())
}

pub(super) fn handle_export_command(ws: &Workspace, args: ExportArgs) -> Result<()> {
    let session = ws.open_session()?;
    session.export_to(&args.path)?;
    println!(
        "Exported {} quotes to {}",
        session.store().len(),
        args.path.display()
    );
    Ok(())
}

pub(super) fn handle_import_command(ws: &Workspace, args: ImportArgs) -> Result<()> {
    let mut session = ws.open_session()?;
    let added = session.import_from(&args.path)?;
    println!("Imported {} quotes", added);
    Ok(())
}
