use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::http_error::{bad_request, not_found};
use super::types::{AppState, Post, PostRequest};

pub(super) async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub(super) async fn list_posts(State(state): State<Arc<AppState>>) -> Json<Vec<Post>> {
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    let posts = state.posts.read().await;
    Json(posts.clone())
}

pub(super) async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Post>, Response> {
    let posts = state.posts.read().await;
    posts
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(not_found)
}

pub(super) async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PostRequest>,
) -> Result<Response, Response> {
    let title = payload.title.unwrap_or_default();
    if title.trim().is_empty() {
        return Err(bad_request("title is required"));
    }

    let mut posts = state.posts.write().await;
    let id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    let post = Post {
        user_id: payload.user_id.unwrap_or(1),
        id,
        title,
        body: payload.body.unwrap_or_default(),
    };
    posts.push(post.clone());
    tracing::debug!(id, "created post");

    Ok((StatusCode::CREATED, Json(post)).into_response())
}

/// Replaces the title (and body, when given) of an existing post.
pub(super) async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(payload): Json<PostRequest>,
) -> Result<Json<Post>, Response> {
    let mut posts = state.posts.write().await;
    let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
        return Err(not_found());
    };
    if let Some(title) = payload.title {
        if title.trim().is_empty() {
            return Err(bad_request("title must not be empty"));
        }
        post.title = title;
    }
    if let Some(body) = payload.body {
        post.body = body;
    }
    tracing::debug!(id, "updated post");
    Ok(Json(post.clone()))
}
