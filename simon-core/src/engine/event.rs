//! Events the engine publishes to its observers
//!
//! The engine never touches a renderer or an audio device directly; every
//! visible or audible effect is described by a `GameEvent` that the front
//! end drains and applies. This keeps the core headless and lets tests
//! observe behavior without any I/O.

use crate::types::{Color, Tone};

/// Header label vocabulary. Fixed; the display strings are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLabel {
    Simon,
    WatchCarefully,
    Watch,
    YourTurn,
    GameOver,
    NewHighScore,
}

impl HeaderLabel {
    /// The label text as shown to the player
    pub fn text(&self) -> &'static str {
        match self {
            HeaderLabel::Simon => "SIMON",
            HeaderLabel::WatchCarefully => "Watch Carefully!",
            HeaderLabel::Watch => "Watch...",
            HeaderLabel::YourTurn => "Your Turn!",
            HeaderLabel::GameOver => "Game Over!",
            HeaderLabel::NewHighScore => "New High Score!",
        }
    }
}

/// What the center display shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenterDisplay {
    /// Idle marker ("GO!")
    Go,
    /// The current level number
    Level(u32),
    /// Failure glyph shown on game over
    Fault,
}

/// A state-change notification from the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The level counter changed (also fired on reset back to 0)
    LevelChanged(u32),
    /// A button lit up during sequence playback
    HighlightOn(Color),
    /// The playback highlight cleared
    HighlightOff(Color),
    /// A button flashed in response to a player press
    PressHighlightOn(Color),
    /// The press flash cleared
    PressHighlightOff(Color),
    /// The header label changed
    Header(HeaderLabel),
    /// The center display changed
    Center(CenterDisplay),
    /// Sound this tone now
    PlayTone(Tone),
    /// Whole-screen fault indicator on game over
    FaultFlashOn,
    FaultFlashOff,
    /// Show or hide the start control
    StartControlVisible(bool),
    /// A new high score was set; the observer persists it
    HighScoreChanged(u32),
}
