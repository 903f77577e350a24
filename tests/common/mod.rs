use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

pub struct FeedGuard {
    pub base_url: String,
    _dir: tempfile::TempDir,
    child: Child,
}

impl FeedGuard {
    pub fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }
}

impl Drop for FeedGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub fn spawn_feed(count: u64) -> Result<FeedGuard> {
    spawn_feed_with_delay(count, 0)
}

pub fn spawn_feed_with_delay(count: u64, delay_ms: u64) -> Result<FeedGuard> {
    let dir = tempfile::tempdir().context("create feed tempdir")?;
    let addr_file = dir.path().join("addr.txt");

    let child = Command::new(env!("CARGO_BIN_EXE_quotes-feed"))
        .args([
            "--addr",
            "127.0.0.1:0",
            "--addr-file",
            addr_file.to_str().unwrap(),
            "--count",
            &count.to_string(),
            "--delay-ms",
            &delay_ms.to_string(),
        ])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn quotes-feed")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;

    Ok(FeedGuard {
        base_url,
        _dir: dir,
        child,
    })
}

fn read_addr_file(addr_file: &Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("feed did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

/// URL of a local port with nothing listening on it.
#[allow(dead_code)]
pub fn closed_url() -> Result<String> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").context("bind probe port")?;
    let addr = listener.local_addr().context("probe addr")?;
    drop(listener);
    Ok(format!("http://{}/posts", addr))
}

/// Rewrites a post's title on the feed, simulating an edit made by another client.
#[allow(dead_code)]
pub fn edit_post(base_url: &str, id: u64, title: &str) -> Result<()> {
    let resp = reqwest::blocking::Client::new()
        .put(format!("{}/posts/{}", base_url, id))
        .json(&serde_json::json!({ "title": title }))
        .send()
        .context("put post")?;
    if !resp.status().is_success() {
        anyhow::bail!("PUT /posts/{} failed: {}", id, resp.status());
    }
    Ok(())
}

#[allow(dead_code)]
pub fn list_post_titles(base_url: &str) -> Result<Vec<String>> {
    let posts: Vec<serde_json::Value> = reqwest::blocking::get(format!("{}/posts", base_url))
        .context("get posts")?
        .json()
        .context("parse posts")?;
    Ok(posts
        .iter()
        .filter_map(|p| p.get("title").and_then(|t| t.as_str()).map(str::to_string))
        .collect())
}
