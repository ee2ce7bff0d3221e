//! File-backed best score.
//!
//! Stored as a tiny JSON document: `{"best_score": 1234}`. A missing file
//! means no best score yet. Read and write failures are logged and never
//! interrupt the game.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::BestScoreStore;

#[derive(Debug, Serialize, Deserialize)]
struct BestScoreFile {
    best_score: u32,
}

#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
    best: u32,
}

impl FileScoreStore {
    /// Load the best score from `path`, starting at 0 if it cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = match Self::load(&path) {
            Ok(best) => best,
            Err(err) => {
                warn!(path = %path.display(), error = %format!("{err:#}"), "ignoring unreadable best score");
                0
            }
        };
        debug!(path = %path.display(), best, "best score loaded");
        Self { path, best }
    }

    pub fn load(path: &Path) -> Result<u32> {
        if !path.exists() {
            return Ok(0);
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("read best score from {}", path.display()))?;
        let file: BestScoreFile = serde_json::from_str(&text)
            .with_context(|| format!("parse best score in {}", path.display()))?;
        Ok(file.best_score)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("create directory {}", dir.display()))?;
        }
        let json = serde_json::to_string(&BestScoreFile {
            best_score: self.best,
        })?;
        fs::write(&self.path, json)
            .with_context(|| format!("write best score to {}", self.path.display()))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for FileScoreStore {
    fn best(&self) -> u32 {
        self.best
    }

    fn set_best(&mut self, score: u32) {
        self.best = score;
        if let Err(err) = self.save() {
            warn!(path = %self.path.display(), error = %format!("{err:#}"), "failed to persist best score");
        }
    }
}
