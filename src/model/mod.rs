mod config;
mod conflict;
mod ids;
mod quote;

pub use self::config::{AppConfig, DEFAULT_FEED_URL, FeedConfig};
pub use self::conflict::ConflictRecord;
pub use self::ids::{QuoteId, SERVER_ID_PREFIX};
pub use self::quote::{
    ALL_CATEGORIES, DEFAULT_CATEGORY, Quote, RawQuote, SERVER_CATEGORY, seed_quotes,
};
