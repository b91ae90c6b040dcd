//! The game-facing tone emitter
//!
//! Wraps the cpal output so that a machine with no usable audio device
//! still plays: the emitter degrades to a no-op instead of erroring, and
//! `play` can never interrupt gameplay.

use super::output::AudioOutput;
use simon_core::types::Tone;

/// Sounds game tones, or silently does nothing when no output exists
pub struct ToneEmitter {
    output: Option<AudioOutput>,
}

impl ToneEmitter {
    /// Open the default audio output; on failure, log and go silent
    pub fn new() -> Self {
        match AudioOutput::new() {
            Ok(output) => Self {
                output: Some(output),
            },
            Err(e) => {
                log::warn!("audio unavailable, tones disabled: {:#}", e);
                Self { output: None }
            }
        }
    }

    /// An emitter with no output at all (headless runs, tests)
    pub fn silent() -> Self {
        Self { output: None }
    }

    /// True when no audio device could be opened
    pub fn is_silent(&self) -> bool {
        self.output.is_none()
    }

    /// Sound `tone`. Trigger errors are logged and swallowed, and a
    /// silent emitter is a no-op, so gameplay never stalls on audio.
    pub fn play(&self, tone: Tone) {
        if let Some(output) = &self.output {
            if let Err(e) = output.trigger(tone) {
                log::warn!("failed to trigger tone {:?}: {:#}", tone, e);
            }
        }
    }
}

impl Default for ToneEmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simon_core::types::Color;

    #[test]
    fn test_silent_emitter_is_a_noop() {
        let emitter = ToneEmitter::silent();
        assert!(emitter.is_silent());
        // Every symbol plays without error or audible side effect
        for color in Color::ALL {
            emitter.play(Tone::Color(color));
        }
        emitter.play(Tone::Wrong);
    }
}
