//! Amplitude envelope for one-shot game tones
//!
//! Every Simon tone has the same shape: silence, a quick linear rise to
//! peak (~10ms, enough to avoid clicks), then an exponential decay that is
//! inaudible by 500ms. Tones are never held, so there is no sustain or
//! release stage; a voice simply runs its envelope out and is dropped.

/// Time to rise linearly from 0 to peak, in seconds
const ATTACK_SECS: f32 = 0.01;
/// Time from peak to near-silence, in seconds
const DECAY_SECS: f32 = 0.49;
/// Below this level the tone is considered finished
const SILENCE_FLOOR: f32 = 0.0001;

/// Per-sample attack/decay envelope generator
#[derive(Debug, Clone)]
pub struct ToneEnvelope {
    level: f32,
    attacking: bool,
    /// Linear increment per sample during attack
    attack_step: f32,
    /// Multiplicative factor per sample during decay
    decay_mul: f32,
}

impl ToneEnvelope {
    pub fn new(sample_rate: f32) -> Self {
        // Exponential decay: level *= decay_mul each sample, chosen so the
        // level passes ~0.1% of peak after DECAY_SECS.
        // ln(1000) ≈ 6.9 for 99.9% convergence
        let decay_mul = (-6.9 / (DECAY_SECS * sample_rate)).exp();
        Self {
            level: 0.0,
            attacking: true,
            attack_step: 1.0 / (ATTACK_SECS * sample_rate),
            decay_mul,
        }
    }

    /// Get the current envelope level
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Check if the envelope has decayed to silence
    pub fn is_finished(&self) -> bool {
        !self.attacking && self.level < SILENCE_FLOOR
    }

    /// Generate the next amplitude sample in [0.0, 1.0]
    pub fn next_sample(&mut self) -> f32 {
        if self.attacking {
            self.level += self.attack_step;
            if self.level >= 1.0 {
                self.level = 1.0;
                self.attacking = false;
            }
        } else {
            self.level *= self.decay_mul;
            if self.level < SILENCE_FLOOR {
                self.level = 0.0;
            }
        }
        self.level
    }
}
