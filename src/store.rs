//! High-score persistence
//!
//! One key-value pair: the best completed-level count, stored as decimal
//! text in the per-user data directory. Read once at startup; written once
//! per new high score. Storage failures never surface to the player.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "simon";
const FILE_NAME: &str = "high_score";

/// Reads and writes the persisted high score
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    /// Store under the platform data directory (falling back to the temp
    /// directory when none is known)
    pub fn open_default() -> Self {
        let base = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
        Self::at(base.join(APP_DIR).join(FILE_NAME))
    }

    /// Store at an explicit path (tests)
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the persisted score; 0 when the file is absent or unparseable
    pub fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(contents) => contents.trim().parse().unwrap_or(0),
            Err(_) => 0,
        }
    }

    /// Persist `score` as decimal text
    pub fn save(&self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&self.path, score.to_string())
            .with_context(|| format!("writing {}", self.path.display()))
    }
}
