use serde::{Deserialize, Serialize};

use super::QuoteId;

pub const DEFAULT_CATEGORY: &str = "General";

/// Category assigned to every quote mapped from the remote feed.
pub const SERVER_CATEGORY: &str = "Server";

/// Reserved filter value meaning "every category".
pub const ALL_CATEGORIES: &str = "all";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub text: String,
    pub category: String,
}

impl Quote {
    pub fn new(id: QuoteId, text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            category: category.into(),
        }
    }

    /// True when text and category match. Ids are not compared.
    pub fn same_content(&self, other: &Quote) -> bool {
        self.text == other.text && self.category == other.category
    }
}

/// Lenient shape accepted from storage and imports before normalization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl From<Quote> for RawQuote {
    fn from(q: Quote) -> Self {
        Self {
            id: Some(q.id.0),
            text: Some(q.text),
            category: Some(q.category),
        }
    }
}

/// Built-in quotes used when nothing has been persisted yet.
pub fn seed_quotes() -> Vec<Quote> {
    [
        (
            "seed-1",
            "The best way to get started is to quit talking and begin doing.",
            "Motivation",
        ),
        (
            "seed-2",
            "Life is what happens when you're busy making other plans.",
            "Life",
        ),
        (
            "seed-3",
            "Simplicity is the soul of efficiency.",
            "Programming",
        ),
        (
            "seed-4",
            "Whether you think you can or you think you can't, you're right.",
            "Motivation",
        ),
        (
            "seed-5",
            "Well begun is half done.",
            DEFAULT_CATEGORY,
        ),
    ]
    .into_iter()
    .map(|(id, text, category)| Quote::new(QuoteId::from(id), text, category))
    .collect()
}
