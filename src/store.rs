//! High-score persistence.
//!
//! The score lives in a small JSON file under the fixed key `"highScore"`.
//! Writes go to a temporary file first and are renamed into place.
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::StoreError;

const SCORE_FILE_NAME: &str = "highscore.json";

pub trait ScoreStore {
    /// The stored high score, or 0 when there is none.
    fn load_high_score(&self) -> u32;

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HighScoreRecord {
    high_score: u32,
}

#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileScoreStore { path: path.into() }
    }

    /// A store in the per-user data directory.
    pub fn in_data_dir() -> Result<Self, StoreError> {
        Ok(FileScoreStore::new(data_dir()?.join(SCORE_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn load_high_score(&self) -> u32 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(_) => return 0,
        };

        match serde_json::from_str::<HighScoreRecord>(&text) {
            Ok(record) => record.high_score,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring unreadable high score");
                0
            }
        }
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io { path: self.path.clone(), source };

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }

        let data = serde_json::to_vec_pretty(&HighScoreRecord { high_score: score })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

/// Keeps the score in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryScoreStore {
    high_score: u32,
    saves: usize,
}

impl MemoryScoreStore {
    pub fn with_high_score(high_score: u32) -> Self {
        MemoryScoreStore { high_score, saves: 0 }
    }

    /// Number of successful saves so far.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load_high_score(&self) -> u32 {
        self.high_score
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        self.high_score = score;
        self.saves += 1;
        Ok(())
    }
}

/// Per-user data directory, where the score and log files go by default.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let proj = ProjectDirs::from("", "", "obstacle-snake").ok_or(StoreError::NoDataDir)?;
    Ok(proj.data_local_dir().to_path_buf())
}
