//! Terminal rendering of engine events
//!
//! Line-oriented: every flash, label, and indicator becomes one printed
//! line. The view holds no gameplay state; it translates the events the
//! engine publishes and nothing else.

use colored::*;
use simon_core::engine::{CenterDisplay, GameEvent, HeaderLabel};
use simon_core::types::Color;

pub struct BoardView;

impl BoardView {
    pub fn new() -> Self {
        BoardView
    }

    /// Banner printed once at startup
    pub fn welcome(&self, high_score: u32) {
        println!(
            "{} {}",
            "●".bright_red(),
            "Simon: repeat the pattern".bright_cyan().bold()
        );
        println!(
            "Press {} to start, type '{}' for the rules.",
            "Enter".cyan(),
            "help".bright_green()
        );
        println!("High score: {}", high_score.to_string().bright_yellow());
        println!();
    }

    /// Render one engine event
    pub fn apply(&self, event: &GameEvent) {
        match event {
            GameEvent::Header(label) => println!("{}", header_line(*label)),
            GameEvent::Center(center) => match center {
                CenterDisplay::Go => println!("  {}", "GO!".bright_green().bold()),
                CenterDisplay::Level(n) => {
                    println!("  Level {}", n.to_string().bright_white().bold())
                }
                CenterDisplay::Fault => println!("  {}", "💀"),
            },
            GameEvent::HighlightOn(color) => println!("{}", strip(Some(*color))),
            GameEvent::PressHighlightOn(color) => {
                println!("{}  {}", strip(Some(*color)), "(you)".dimmed())
            }
            // Un-highlight has no line-terminal rendering; the next flash
            // stands on its own line
            GameEvent::HighlightOff(_) | GameEvent::PressHighlightOff(_) => {}
            GameEvent::FaultFlashOn => {
                println!("{}", " ✖  WRONG  ✖ ".bright_white().on_red().bold())
            }
            GameEvent::FaultFlashOff => {}
            GameEvent::StartControlVisible(visible) => {
                if *visible {
                    println!(
                        "Press {} or type '{}' to play again.",
                        "Enter".cyan(),
                        "start".cyan()
                    );
                }
            }
            GameEvent::HighScoreChanged(score) => {
                println!(
                    "High score: {}",
                    score.to_string().bright_yellow().bold()
                )
            }
            GameEvent::LevelChanged(_) => {}
            // Tones are routed to the emitter by the caller
            GameEvent::PlayTone(_) => {}
        }
    }
}

impl Default for BoardView {
    fn default() -> Self {
        Self::new()
    }
}

fn header_line(label: HeaderLabel) -> String {
    let text = label.text();
    match label {
        HeaderLabel::Simon => text.bright_cyan().bold().to_string(),
        HeaderLabel::WatchCarefully | HeaderLabel::Watch => text.bright_yellow().to_string(),
        HeaderLabel::YourTurn => text.bright_green().bold().to_string(),
        HeaderLabel::GameOver => text.bright_red().bold().to_string(),
        HeaderLabel::NewHighScore => text.bright_yellow().bold().to_string(),
    }
}

/// The four-button strip with at most one button lit
fn strip(lit: Option<Color>) -> String {
    Color::ALL
        .iter()
        .map(|&color| cell(color, lit == Some(color)).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn cell(color: Color, lit: bool) -> ColoredString {
    let text = if lit {
        format!(" {} ", color.name().to_uppercase())
    } else {
        format!(" {} ", color.name())
    };
    let painted = match color {
        Color::Red => {
            if lit {
                text.black().on_bright_red()
            } else {
                text.white().on_red()
            }
        }
        Color::Blue => {
            if lit {
                text.black().on_bright_blue()
            } else {
                text.white().on_blue()
            }
        }
        Color::Green => {
            if lit {
                text.black().on_bright_green()
            } else {
                text.white().on_green()
            }
        }
        Color::Yellow => {
            if lit {
                text.black().on_bright_yellow()
            } else {
                text.black().on_yellow()
            }
        }
    };
    if lit {
        painted.bold()
    } else {
        painted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_marks_the_lit_cell() {
        colored::control::set_override(false);
        let unlit = strip(None);
        let lit = strip(Some(Color::Green));
        assert!(unlit.contains("green"));
        assert!(!unlit.contains("GREEN"));
        assert!(lit.contains("GREEN"));
        colored::control::unset_override();
    }

    #[test]
    fn test_every_event_renders_without_panicking() {
        let view = BoardView::new();
        for event in [
            GameEvent::LevelChanged(3),
            GameEvent::HighlightOn(Color::Red),
            GameEvent::HighlightOff(Color::Red),
            GameEvent::PressHighlightOn(Color::Blue),
            GameEvent::PressHighlightOff(Color::Blue),
            GameEvent::Header(HeaderLabel::YourTurn),
            GameEvent::Center(CenterDisplay::Level(3)),
            GameEvent::Center(CenterDisplay::Go),
            GameEvent::Center(CenterDisplay::Fault),
            GameEvent::FaultFlashOn,
            GameEvent::FaultFlashOff,
            GameEvent::StartControlVisible(true),
            GameEvent::StartControlVisible(false),
            GameEvent::HighScoreChanged(4),
        ] {
            view.apply(&event);
        }
    }
}
