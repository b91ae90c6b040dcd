//! The mutable per-game aggregate

use crate::types::{Color, Difficulty};

/// All mutable state for one game session. Constructed explicitly and owned
/// by the engine; nothing here is global.
///
/// Invariants the engine maintains:
/// - `pattern.len() == level as usize` once a level is fully generated
/// - `user_input.len() <= pattern.len()`
/// - input is only accepted while `started && !showing_sequence`
/// - `high_score` never decreases
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Current level; also the length of the target pattern
    pub level: u32,
    /// The target sequence the player must reproduce
    pub pattern: Vec<Color>,
    /// The player's attempt at the current level
    pub user_input: Vec<Color>,
    /// Whether a round is in progress
    pub started: bool,
    /// True during automated playback; input is dropped while set
    pub showing_sequence: bool,
    /// Playback pacing
    pub difficulty: Difficulty,
    /// Best completed-level count seen so far (persisted externally)
    pub high_score: u32,
}

impl GameSession {
    /// Create a fresh idle session with a previously persisted high score
    pub fn new(high_score: u32) -> Self {
        Self {
            level: 0,
            pattern: Vec::new(),
            user_input: Vec::new(),
            started: false,
            showing_sequence: false,
            difficulty: Difficulty::default(),
            high_score,
        }
    }

    /// Reset every per-round field to its idle default. Difficulty and high
    /// score survive across rounds.
    pub fn reset_round(&mut self) {
        self.level = 0;
        self.pattern.clear();
        self.user_input.clear();
        self.started = false;
        self.showing_sequence = false;
    }
}
