pub mod envelope;
pub mod oscillator;
pub mod output;
pub mod tone;

pub use tone::ToneEmitter;
