//! Text rendering for the terminal front end.

use crate::model::{ConflictRecord, Quote};
use crate::sync::{SyncReport, SyncStatus};

pub fn render_quote(quote: &Quote) -> String {
    format!("\"{}\"\n  - {}", quote.text, quote.category)
}

pub fn render_quote_line(quote: &Quote) -> String {
    format!("{}  [{}] {}", quote.id, quote.category, quote.text)
}

pub fn no_quotes_message(category: &str) -> String {
    format!("No quotes in category \"{}\".", category)
}

pub fn sync_summary(report: &SyncReport) -> String {
    format!(
        "Sync complete: {} added, {} updated, {} conflicts.",
        report.added,
        report.updated,
        report.conflicts.len()
    )
}

/// `"Last sync: HH:MM:SS"` in UTC. Malformed timestamps render as `unknown`.
pub fn last_sync_line(millis: i64) -> String {
    let format = time::macros::format_description!("[hour]:[minute]:[second]");
    let ts = time::OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000)
        .ok()
        .and_then(|t| t.format(&format).ok())
        .unwrap_or_else(|| "unknown".to_string());
    format!("Last sync: {} UTC", ts)
}

pub fn render_conflict(conflict: &ConflictRecord) -> String {
    format!(
        "Conflict on {}: server \"{}\" [{}] replaced local \"{}\" [{}] (keep-local {} to undo)",
        conflict.id,
        conflict.server.text,
        conflict.server.category,
        conflict.local.text,
        conflict.local.category,
        conflict.id
    )
}

/// Summary plus one line per conflict.
pub fn render_report(report: &SyncReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({})",
        sync_summary(report),
        last_sync_line(report.synced_at)
    )];
    lines.extend(report.conflicts.iter().map(render_conflict));
    lines
}

pub fn render_status(status: &SyncStatus) -> Vec<String> {
    match status {
        SyncStatus::Idle => vec!["Not synced yet.".to_string()],
        SyncStatus::Synced(report) => render_report(report),
        SyncStatus::Failed(msg) => vec![msg.clone()],
    }
}
