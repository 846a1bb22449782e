//! Best-score storage. Loading never fails (anything unreadable counts as
//! 0) and saving is best effort: the game carries on either way.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("high score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("high score file {path} does not hold a number: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Where the single best-score value lives.
pub trait ScoreStore {
    /// The stored best score, or 0 if there is none.
    fn load(&self) -> u32;
    /// Persist a new best score. Failures are swallowed.
    fn save(&mut self, score: u32);
}

// ── File-backed store ─────────────────────────────────────────────────────────

/// `$HOME/.flappy_game_score`, or the working directory when `HOME` is unset.
pub fn default_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".flappy_game_score")
}

/// Keeps the score as a decimal number in a plain text file.
#[derive(Clone, Debug)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn try_load(&self) -> Result<u32, ScoreError> {
        let text = fs::read_to_string(&self.path).map_err(|source| ScoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        text.trim().parse().map_err(|source| ScoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    pub fn try_save(&self, score: u32) -> Result<(), ScoreError> {
        fs::write(&self.path, score.to_string()).map_err(|source| ScoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u32 {
        match self.try_load() {
            Ok(score) => score,
            Err(ScoreError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                debug!(path = %self.path.display(), "no high score file yet");
                0
            }
            Err(err) => {
                warn!(%err, "ignoring unreadable high score");
                0
            }
        }
    }

    fn save(&mut self, score: u32) {
        if let Err(err) = self.try_save(score) {
            warn!(%err, "could not save high score");
        }
    }
}

// ── In-memory store ───────────────────────────────────────────────────────────

/// Holds the score in memory only. Useful for tests and headless runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryScoreStore {
    pub score: u32,
    /// Number of times `save` was called.
    pub saves: u32,
}

impl MemoryScoreStore {
    pub fn new(score: u32) -> Self {
        Self { score, saves: 0 }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.score
    }

    fn save(&mut self, score: u32) {
        self.score = score;
        self.saves += 1;
    }
}
