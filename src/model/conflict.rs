use serde::Serialize;

use super::{Quote, QuoteId};

/// A local/remote pair that differed for the same id during a merge.
///
/// Held only until the next sync cycle or until the user resolves it. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConflictRecord {
    pub id: QuoteId,
    pub local: Quote,
    pub server: Quote,
}
