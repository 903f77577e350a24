use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::model::{AppConfig, seed_quotes};
use crate::persist::{Persistence, write_atomic};
use crate::session::Session;

const DATA_DIR: &str = ".quotes";
const CONFIG_FILE: &str = "config.json";

/// A data directory holding `config.json` and the durable quote keys.
#[derive(Clone, Debug)]
pub struct Workspace {
    pub dir: PathBuf,
}

impl Workspace {
    pub fn data_dir(root: &Path) -> PathBuf {
        root.join(DATA_DIR)
    }

    /// Creates `<root>/.quotes` with the default config and the seed quotes.
    pub fn init(root: &Path, force: bool) -> Result<Self> {
        Self::init_at(&Self::data_dir(root), force)
    }

    pub fn init_at(dir: &Path, force: bool) -> Result<Self> {
        if dir.join(CONFIG_FILE).exists() && !force {
            return Err(anyhow!(
                "{} is already initialized (use --force to re-init)",
                dir.display()
            ));
        }
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;

        let ws = Self {
            dir: dir.to_path_buf(),
        };
        ws.write_config(&AppConfig::default())?;
        ws.persistence()
            .save(&seed_quotes())
            .context("write seed quotes")?;
        tracing::info!(dir = %dir.display(), "initialized quote workspace");
        Ok(ws)
    }

    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(anyhow!(
                "No quotes directory at {} (run `quotes init`)",
                dir.display()
            ));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Finds the nearest `.quotes` directory at or above `start`.
    pub fn discover(start: &Path) -> Result<Self> {
        let start = start
            .canonicalize()
            .with_context(|| format!("canonicalize {}", start.display()))?;
        for dir in start.ancestors() {
            let data_dir = Self::data_dir(dir);
            if data_dir.is_dir() {
                return Self::open(&data_dir);
            }
        }
        Err(anyhow!("No {} directory found (run `quotes init`)", DATA_DIR))
    }

    /// Reads `config.json`; a missing file yields the defaults.
    pub fn read_config(&self) -> Result<AppConfig> {
        let path = self.dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let cfg: AppConfig =
            serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported config version {}", cfg.version);
        }
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &AppConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.dir.join(CONFIG_FILE), &bytes).context("write config.json")
    }

    pub fn persistence(&self) -> Persistence {
        Persistence::open_dir(&self.dir)
    }

    pub fn open_session(&self) -> Result<Session> {
        Session::open(self.persistence(), self.read_config()?)
    }
}
