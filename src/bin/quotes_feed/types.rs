use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

/// A post in the shape served by JSONPlaceholder.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Post {
    pub(super) user_id: u64,
    pub(super) id: u64,
    pub(super) title: String,

    #[serde(default)]
    pub(super) body: String,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PostRequest {
    // Local quotes are posted as-is, so `text` and `category` stand in for the post fields.
    #[serde(default, alias = "text")]
    pub(super) title: Option<String>,

    #[serde(default, alias = "category")]
    pub(super) body: Option<String>,

    #[serde(default)]
    pub(super) user_id: Option<u64>,
}

#[derive(Clone)]
pub(super) struct AppState {
    pub(super) posts: Arc<RwLock<Vec<Post>>>,

    // Artificial latency on `GET /posts`, for exercising client timeouts.
    pub(super) delay: Duration,
}

impl AppState {
    pub(super) fn seeded(count: u64, delay: Duration) -> Self {
        let posts = (1..=count)
            .map(|id| Post {
                user_id: 1,
                id,
                title: format!("feed post {}", id),
                body: String::new(),
            })
            .collect();
        Self {
            posts: Arc::new(RwLock::new(posts)),
            delay,
        }
    }
}
