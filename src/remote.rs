use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::error::QuoteError;
use crate::model::{FeedConfig, Quote};

mod fetch;
mod http_client;
mod types;
pub use self::types::*;

/// Read and write access to the remote quote feed.
pub trait QuoteFeed: Send + Sync {
    /// Current remote snapshot, already mapped into local quotes.
    fn fetch_quotes(&self) -> impl Future<Output = Result<Vec<Quote>, QuoteError>> + Send;

    fn post_quote(&self, quote: &Quote) -> impl Future<Output = Result<(), QuoteError>> + Send;
}

pub struct RemoteClient {
    feed: FeedConfig,
    client: reqwest::Client,
}

impl RemoteClient {
    pub fn new(feed: FeedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("quotes")
            .timeout(feed.timeout())
            .build()
            .context("build reqwest client")?;
        Ok(Self { feed, client })
    }
}

/// Posts `quote` in the background. Failures are logged and dropped, never retried.
pub fn spawn_post<F>(feed: Arc<F>, quote: Quote) -> tokio::task::JoinHandle<()>
where
    F: QuoteFeed + 'static,
{
    tokio::spawn(async move {
        match feed.post_quote(&quote).await {
            Ok(()) => tracing::debug!(id = %quote.id, "posted quote to feed"),
            Err(err) => tracing::warn!(id = %quote.id, "failed to post quote: {}", err),
        }
    })
}
