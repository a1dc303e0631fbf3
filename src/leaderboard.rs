//! Best-score-per-player storage.
//!
//! The core only ever records a finished run and asks for the top entries;
//! where the scores live is up to the [`ScoreStore`] implementation.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("score file I/O failed for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("score file '{path}' is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One player's best run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    /// Milliseconds since the Unix epoch when this best was set
    pub recorded_at: u64,
}

pub trait ScoreStore {
    /// Keep `score` if it beats `identity`'s stored best. Returns whether it did.
    fn record_score(&mut self, identity: &str, score: u32) -> Result<bool, LeaderboardError>;

    /// Best entries, highest score first; equal scores list the earliest first.
    fn top_scores(&self, n: usize) -> Result<Vec<ScoreEntry>, LeaderboardError>;
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Insert or replace `identity`'s entry when `score` is strictly higher.
fn keep_best(entries: &mut HashMap<String, ScoreEntry>, identity: &str, score: u32, at: u64) -> bool {
    match entries.get(identity) {
        Some(best) if best.score >= score => false,
        _ => {
            entries.insert(
                identity.to_string(),
                ScoreEntry {
                    name: identity.to_string(),
                    score,
                    recorded_at: at,
                },
            );
            true
        }
    }
}

fn ranked(entries: &HashMap<String, ScoreEntry>, n: usize) -> Vec<ScoreEntry> {
    let mut all: Vec<ScoreEntry> = entries.values().cloned().collect();
    all.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.recorded_at.cmp(&b.recorded_at))
            .then_with(|| a.name.cmp(&b.name))
    });
    all.truncate(n);
    all
}

/// In-memory store; forgets everything when dropped.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    entries: HashMap<String, ScoreEntry>,
    /// Logical clock so insertion order breaks ties deterministically
    tick: u64,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn record_score(&mut self, identity: &str, score: u32) -> Result<bool, LeaderboardError> {
        self.tick += 1;
        Ok(keep_best(&mut self.entries, identity, score, self.tick))
    }

    fn top_scores(&self, n: usize) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        Ok(ranked(&self.entries, n))
    }
}

/// Scores kept in a single JSON file, rewritten on every improvement.
#[derive(Debug)]
pub struct JsonScoreStore {
    path: PathBuf,
    entries: HashMap<String, ScoreEntry>,
}

impl JsonScoreStore {
    /// Open the store at `path`; a missing file is an empty leaderboard.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LeaderboardError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let text = fs::read_to_string(&path).map_err(|source| LeaderboardError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let list: Vec<ScoreEntry> =
                serde_json::from_str(&text).map_err(|source| LeaderboardError::Json {
                    path: path.display().to_string(),
                    source,
                })?;
            list.into_iter().map(|e| (e.name.clone(), e)).collect()
        } else {
            HashMap::new()
        };
        debug!(path = %path.display(), players = entries.len(), "score store opened");
        Ok(Self { path, entries })
    }

    /// Record a score with an explicit timestamp.
    pub fn record_score_at(
        &mut self,
        identity: &str,
        score: u32,
        recorded_at: u64,
    ) -> Result<bool, LeaderboardError> {
        if !keep_best(&mut self.entries, identity, score, recorded_at) {
            return Ok(false);
        }
        self.save()?;
        info!(player = identity, score, "new personal best");
        Ok(true)
    }

    fn save(&self) -> Result<(), LeaderboardError> {
        let list = ranked(&self.entries, self.entries.len());
        let text = serde_json::to_string_pretty(&list).map_err(|source| LeaderboardError::Json {
            path: self.path.display().to_string(),
            source,
        })?;
        fs::write(&self.path, text).map_err(|source| LeaderboardError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }
}

impl ScoreStore for JsonScoreStore {
    fn record_score(&mut self, identity: &str, score: u32) -> Result<bool, LeaderboardError> {
        self.record_score_at(identity, score, now_millis())
    }

    fn top_scores(&self, n: usize) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        Ok(ranked(&self.entries, n))
    }
}
