//! # Simon
//!
//! Terminal rendition of the Simon memory game: a growing color sequence
//! plays back with light and sound, and the player repeats it from the
//! prompt until they slip. Gameplay rules live in the `simon-core` crate;
//! this crate supplies everything that touches the outside world.
//!
//! ## Modules
//!
//! - `audio`: cpal tone synthesis. Per-color sine voices, the sawtooth
//!   failure buzz, and the emitter that goes silent when no device exists.
//! - `clock`: the tick thread that drives the engine's virtual timeline.
//! - `commands`: the prompt command registry (start, difficulty, score...).
//! - `ui`: the select loop tying input, ticks, rendering, and audio
//!   together, plus the line renderer.
//! - `store`: high-score persistence as plain text in the user data dir.

pub mod audio;
pub mod clock;
pub mod commands;
pub mod store;
pub mod ui;

// Re-export commonly used types
pub use audio::ToneEmitter;
pub use clock::SequenceClock;
pub use simon_core::engine::{GameEngine, GameEvent};
pub use simon_core::types::{Color, Difficulty, Tone};
pub use store::HighScoreStore;
