//! One-shot tone voice: waveform generation with an attack/decay envelope

use super::envelope::ToneEnvelope;
use simon_core::types::{Tone, Waveform};
use std::f32::consts::PI;

/// A single sounding tone. Created on trigger, mixed until its envelope
/// runs out, then dropped by the output stream.
pub struct ToneVoice {
    frequency: f32,
    phase: f32,
    sample_rate: f32,
    waveform: Waveform,
    envelope: ToneEnvelope,
}

impl ToneVoice {
    /// Build the voice for a game tone at the stream's sample rate
    pub fn new(tone: Tone, sample_rate: f32) -> Self {
        Self {
            frequency: tone.frequency(),
            phase: 0.0,
            sample_rate,
            waveform: tone.waveform(),
            envelope: ToneEnvelope::new(sample_rate),
        }
    }

    /// Check if the envelope has run out
    pub fn is_finished(&self) -> bool {
        self.envelope.is_finished()
    }

    /// Generate the next sample
    pub fn next_sample(&mut self) -> f32 {
        let value = self.generate_waveform();

        self.phase += self.frequency / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        value * self.envelope.next_sample()
    }

    /// Raw waveform value at the current phase (0.0 to 1.0)
    fn generate_waveform(&self) -> f32 {
        match self.waveform {
            Waveform::Sine => (2.0 * PI * self.phase).sin(),
            // Bright and buzzy; used for the failure tone
            Waveform::Saw => 2.0 * self.phase - 1.0,
            Waveform::Square => {
                if self.phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => {
                if self.phase < 0.5 {
                    4.0 * self.phase - 1.0
                } else {
                    3.0 - 4.0 * self.phase
                }
            }
        }
    }
}
