//! Read and write calls against the feed endpoints.

use super::http_client::send_error;
use super::*;

impl QuoteFeed for RemoteClient {
    fn fetch_quotes(&self) -> impl Future<Output = Result<Vec<Quote>, QuoteError>> + Send {
        async move {
            let resp = self
                .client
                .get(&self.feed.fetch_url)
                .send()
                .await
                .map_err(|e| send_error("fetch quotes", e))?;
            let values: Vec<serde_json::Value> = self
                .ensure_ok(resp, "fetch quotes")?
                .json()
                .await
                .map_err(|e| send_error("parse feed", e))?;
            Ok(posts_to_quotes(values))
        }
    }

    fn post_quote(&self, quote: &Quote) -> impl Future<Output = Result<(), QuoteError>> + Send {
        async move {
            let resp = self
                .client
                .post(self.feed.post_url())
                .json(quote)
                .send()
                .await
                .map_err(|e| send_error("post quote", e))?;
            let body: serde_json::Value = self
                .ensure_ok(resp, "post quote")?
                .json()
                .await
                .map_err(|e| send_error("parse post response", e))?;
            tracing::debug!(response = %body, "feed accepted quote");
            Ok(())
        }
    }
}
