use std::collections::HashSet;

use crate::model::{DEFAULT_CATEGORY, Quote, QuoteId, RawQuote};

/// Coerces lenient records into the strict `Quote` shape.
///
/// Missing or blank ids get a generated one, and so does any id already used earlier in
/// the same input. Missing or blank categories become `"General"`. Records without text
/// are dropped. Everything else is kept as given, so normalizing normalized data is a no-op.
pub fn normalize(raw: Vec<RawQuote>) -> Vec<Quote> {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut out = Vec::with_capacity(raw.len());

    for r in raw {
        let Some(text) = r.text.filter(|t| !t.trim().is_empty()) else {
            tracing::debug!(id = ?r.id, "dropping quote without text");
            continue;
        };

        let category = r
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        let id = match r.id.filter(|id| !id.trim().is_empty()) {
            Some(id) if !seen.contains(&id) => QuoteId(id),
            Some(dup) => {
                tracing::debug!(id = %dup, "duplicate quote id, assigning a fresh one");
                fresh_id(&seen)
            }
            None => fresh_id(&seen),
        };

        seen.insert(id.0.clone());
        out.push(Quote { id, text, category });
    }

    out
}

fn fresh_id(seen: &HashSet<String>) -> QuoteId {
    loop {
        let id = QuoteId::generate();
        if !seen.contains(id.as_str()) {
            return id;
        }
    }
}
