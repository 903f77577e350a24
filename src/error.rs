//! Domain failures. None of them is fatal: each degrades to "state unchanged" plus a
//! message for the user.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    /// Empty text or category on add. The store is left untouched.
    #[error("invalid quote: {0}")]
    Validation(String),

    /// Persisted data under `key` could not be parsed. Callers fall back to defaults.
    #[error("unreadable stored data at `{key}`: {reason}")]
    StorageRead { key: String, reason: String },

    /// Fetch/post failure or timeout. Retried by the next scheduled sync.
    #[error("network error: {0}")]
    Network(String),
}

impl QuoteError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }
}
