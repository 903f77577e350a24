use anyhow::{Context, Result};

use quotes::present::render_report;
use quotes::sync::SyncOutcome;
use quotes::workspace::Workspace;

use crate::cli_commands::SyncArgs;

pub(super) fn handle_sync_command(ws: &Workspace, args: SyncArgs) -> Result<()> {
    let engine = super::build_engine(ws)?;
    let outcome = super::runtime()?.block_on(engine.sync_once());

    match outcome {
        SyncOutcome::Completed(report) => {
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).context("serialize sync report")?
                );
            } else {
                for line in render_report(&report) {
                    println!("{}", line);
                }
            }
        }
        SyncOutcome::Skipped => println!("Sync already in progress."),
        // Not fatal: the local list is unchanged and the next sync retries.
        SyncOutcome::Failed(msg) => println!("{}", msg),
    }
    Ok(())
}
