// simon-core/src/types/mod.rs

pub mod audio_config;
pub mod color;
pub mod difficulty;
pub mod session;

pub use audio_config::Waveform;
pub use color::{Color, Tone};
pub use difficulty::Difficulty;
pub use session::GameSession;
