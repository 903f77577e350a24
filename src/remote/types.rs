//! Wire shapes of the feed and their coercion into `Quote`.

use crate::model::{Quote, QuoteId, SERVER_CATEGORY};

/// One entry of the read endpoint. Only `id` and `title` matter; other fields are ignored.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct RemotePost {
    #[serde(default)]
    pub id: Option<serde_json::Value>,

    #[serde(default)]
    pub title: Option<String>,
}

impl RemotePost {
    /// Maps to `Quote{id: "server-"+id, text: title, category: "Server"}`. `None` when the
    /// id is missing or not a number/string, or the title is blank.
    pub fn into_quote(self) -> Option<Quote> {
        let id = match self.id? {
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::String(s) if !s.trim().is_empty() => s,
            _ => return None,
        };
        let title = self.title.filter(|t| !t.trim().is_empty())?;
        Some(Quote::new(QuoteId::server(&id), title, SERVER_CATEGORY))
    }
}

/// Coerces a loosely-typed response body into quotes, dropping entries that do not fit.
pub fn posts_to_quotes(values: Vec<serde_json::Value>) -> Vec<Quote> {
    let total = values.len();
    let quotes: Vec<Quote> = values
        .into_iter()
        .filter_map(|v| serde_json::from_value::<RemotePost>(v).ok())
        .filter_map(RemotePost::into_quote)
        .collect();
    if quotes.len() != total {
        tracing::debug!(
            dropped = total - quotes.len(),
            "ignored malformed feed entries"
        );
    }
    quotes
}
