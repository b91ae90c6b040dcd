//! # Simon Core
//!
//! Headless engine for the Simon memory game: the growing color pattern,
//! the Idle → Presenting → AwaitingInput state machine, judging, scoring,
//! and the virtual-time step queue that paces playback. No audio, terminal,
//! or timer dependencies; the front end drives the engine with a monotonic
//! millisecond clock and reacts to the events it publishes, which is also
//! what makes every gameplay rule testable without real time passing.
//!
//! ## Modules
//!
//! - `types`: the fixed color set, tone symbols, difficulty pacing, and the
//!   mutable `GameSession` aggregate.
//! - `engine`: the `GameEngine` state machine, its published `GameEvent`s,
//!   and the scheduled-step queue.

pub mod engine;
pub mod types;

// Re-export commonly used types
pub use engine::{CenterDisplay, GameEngine, GameEvent, HeaderLabel};
pub use types::{Color, Difficulty, GameSession, Tone, Waveform};
