use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix for ids of quotes that originated on the remote feed.
pub const SERVER_ID_PREFIX: &str = "server-";

const LOCAL_ID_PREFIX: &str = "q-";

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuoteId(pub String);

impl QuoteId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id for a record of the remote feed. The prefix keeps remote ids out of the local
    /// id space.
    pub fn server(remote_id: &str) -> Self {
        Self(format!("{}{}", SERVER_ID_PREFIX, remote_id))
    }

    /// Fresh locally-scoped id: creation time in millis plus 32 random bits.
    pub fn generate() -> Self {
        let millis = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        let salt: u32 = rand::random();
        Self(format!("{}{:x}-{:08x}", LOCAL_ID_PREFIX, millis, salt))
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuoteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
