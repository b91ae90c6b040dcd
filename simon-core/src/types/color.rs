//! The four Simon button colors and the tone symbols derived from them

use crate::types::audio_config::Waveform;

/// One of the four fixed button colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Color {
    /// All colors, in the order the original board lays them out
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    /// Parse a color from player input (case-insensitive, accepts one-letter shorthand)
    pub fn from_str(s: &str) -> Option<Color> {
        match s.to_lowercase().as_str() {
            "red" | "r" => Some(Color::Red),
            "blue" | "b" => Some(Color::Blue),
            "green" | "g" => Some(Color::Green),
            "yellow" | "y" => Some(Color::Yellow),
            _ => None,
        }
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
        }
    }

    /// Tone frequency for this color in Hz
    pub fn frequency(&self) -> f32 {
        match self {
            Color::Red => 220.0,
            Color::Blue => 330.0,
            Color::Green => 440.0,
            Color::Yellow => 550.0,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A symbol the tone emitter can sound: a button color or the failure buzz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Color(Color),
    Wrong,
}

impl Tone {
    /// Frequency in Hz (colors per their fixed mapping, failure buzz at 100 Hz)
    pub fn frequency(&self) -> f32 {
        match self {
            Tone::Color(color) => color.frequency(),
            Tone::Wrong => 100.0,
        }
    }

    /// Colors sound as pure sine; the failure buzz uses a harsher sawtooth
    pub fn waveform(&self) -> Waveform {
        match self {
            Tone::Color(_) => Waveform::Sine,
            Tone::Wrong => Waveform::Saw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!(Color::from_str("red"), Some(Color::Red));
        assert_eq!(Color::from_str("B"), Some(Color::Blue));
        assert_eq!(Color::from_str("Green"), Some(Color::Green));
        assert_eq!(Color::from_str("y"), Some(Color::Yellow));
        assert_eq!(Color::from_str("purple"), None);
    }

    #[test]
    fn test_frequency_mapping() {
        assert_eq!(Tone::Color(Color::Red).frequency(), 220.0);
        assert_eq!(Tone::Color(Color::Blue).frequency(), 330.0);
        assert_eq!(Tone::Color(Color::Green).frequency(), 440.0);
        assert_eq!(Tone::Color(Color::Yellow).frequency(), 550.0);
        assert_eq!(Tone::Wrong.frequency(), 100.0);
    }

    #[test]
    fn test_wrong_tone_is_harsher() {
        assert_eq!(Tone::Color(Color::Red).waveform(), Waveform::Sine);
        assert_eq!(Tone::Wrong.waveform(), Waveform::Saw);
    }
}
