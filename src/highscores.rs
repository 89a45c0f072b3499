//! High score leaderboard, kept per game mode
//!
//! Top 10 runs (score, level reached, timestamp), sorted descending,
//! persisted through the key-value score store.

use serde::{Deserialize, Serialize};

use crate::persistence::ScoreStore;
use crate::sim::state::GameMode;

/// Maximum number of high scores to keep per mode
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Run's final score
    pub score: u64,
    /// Level reached (0-based index)
    pub level: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard for one mode
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn storage_key(mode: GameMode) -> String {
        format!("shredwave_highscores_{}", mode.as_str())
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Rank a score would achieve (1-indexed), None if it doesn't qualify
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a score if it qualifies; returns the rank achieved (1-indexed)
    pub fn add_score(&mut self, score: u64, level: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            level,
            timestamp,
        };

        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the leaderboard for a mode; any failure starts fresh
    pub fn load(store: &dyn ScoreStore, mode: GameMode) -> Self {
        match store.get(&Self::storage_key(mode)) {
            Ok(Some(json)) => match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!(
                        "loaded {} high scores for {} mode",
                        scores.entries.len(),
                        mode.as_str()
                    );
                    scores
                }
                Err(e) => {
                    log::warn!("high score table unreadable ({}), starting fresh", e);
                    Self::new()
                }
            },
            Ok(None) => Self::new(),
            Err(e) => {
                log::warn!("high score load failed ({}), starting fresh", e);
                Self::new()
            }
        }
    }

    /// Persist the leaderboard; failure degrades to session-only state
    pub fn save(&self, store: &mut dyn ScoreStore, mode: GameMode) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if let Err(e) = store.set(&Self::storage_key(mode), &json) {
                    log::warn!("high score save failed ({})", e);
                }
            }
            Err(e) => log::warn!("high score serialization failed ({})", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_qualification() {
        let mut scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));

        for i in 0..MAX_HIGH_SCORES {
            scores.add_score(1000 + i as u64 * 100, 0, 0.0);
        }
        // Table full at 1000..1900: only beats of the floor qualify
        assert!(!scores.qualifies(1000));
        assert!(scores.qualifies(1001));
    }

    #[test]
    fn test_rank_and_ordering() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(500, 0, 0.0), Some(1));
        assert_eq!(scores.add_score(900, 1, 1.0), Some(1));
        assert_eq!(scores.add_score(700, 0, 2.0), Some(2));

        let values: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(values, vec![900, 700, 500]);
        assert_eq!(scores.top_score(), Some(900));
        assert_eq!(scores.potential_rank(800), Some(2));
    }

    #[test]
    fn test_table_truncates() {
        let mut scores = HighScores::new();
        for i in 0..20u64 {
            scores.add_score(100 + i, 0, 0.0);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(119));
    }

    #[test]
    fn test_store_round_trip_per_mode() {
        let mut store = MemoryStore::new();

        let mut skate = HighScores::new();
        skate.add_score(4200, 2, 123.0);
        skate.save(&mut store, GameMode::Skate);

        let loaded = HighScores::load(&store, GameMode::Skate);
        assert_eq!(loaded.top_score(), Some(4200));
        assert_eq!(loaded.entries[0].level, 2);

        // Other mode untouched
        assert!(HighScores::load(&store, GameMode::Surf).is_empty());
    }
}
