//! Interactive game loop
//!
//! The front end for the headless engine: a rustyline prompt on its own
//! thread feeds player input into a channel, the sequence clock feeds
//! ticks into another, and one select loop routes both into the engine,
//! then drains its events out to the renderer, the tone emitter, and the
//! high-score store. This is the only place where engine state meets
//! rendering and audio.

pub mod view;

use crate::audio::ToneEmitter;
use crate::clock::SequenceClock;
use crate::commands::{create_registry, CommandContext, CommandResult};
use crate::store::HighScoreStore;
use anyhow::Result;
use colored::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RustylineResult};
use simon_core::engine::{GameEngine, GameEvent};
use simon_core::types::Color;
use std::thread;
use view::BoardView;

/// Types of events the game loop handles
enum UiEvent {
    Input(Result<String, ReadlineError>),
}

/// Interactive Simon game
pub struct Game {
    editor: Option<DefaultEditor>,
    engine: GameEngine,
    emitter: ToneEmitter,
    store: HighScoreStore,
    clock: SequenceClock,
    view: BoardView,

    tx_input: Sender<UiEvent>,
    rx_input: Receiver<UiEvent>,
}

impl Game {
    /// Create a new game instance with the persisted high score loaded
    pub fn new() -> RustylineResult<Self> {
        let editor = DefaultEditor::new()?;
        let store = HighScoreStore::open_default();
        let engine = GameEngine::new(store.load());
        let emitter = ToneEmitter::new();
        let clock = SequenceClock::new();
        let (tx_input, rx_input) = unbounded();

        Ok(Game {
            editor: Some(editor),
            engine,
            emitter,
            store,
            clock,
            view: BoardView::new(),
            tx_input,
            rx_input,
        })
    }

    /// Start the game loop
    pub fn run(&mut self) -> Result<()> {
        self.view.welcome(self.engine.session().high_score);
        if self.emitter.is_silent() {
            println!("{}", "(no audio device, playing silently)".dimmed());
        }

        // Move editor to its own thread; lines come back over the channel
        let mut editor = self.editor.take().expect("Game editor missing");
        let tx_input = self.tx_input.clone();

        thread::spawn(move || loop {
            let prompt = format!("{} ", "simon>".bright_magenta().bold());
            let readline = editor.readline(&prompt);

            match readline {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        let _ = editor.add_history_entry(&line);
                    }
                    if tx_input.send(UiEvent::Input(Ok(line))).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    let _ = tx_input.send(UiEvent::Input(Err(err)));
                    break;
                }
            }
        });

        let registry = create_registry();
        let rx_input = self.rx_input.clone();
        let tick_rx = self.clock.subscribe();

        loop {
            crossbeam_channel::select! {
                recv(rx_input) -> msg => match msg {
                    Ok(UiEvent::Input(res)) => match res {
                        Ok(line) => {
                            if line.is_empty() {
                                // The bare-Enter start trigger; the engine
                                // ignores it unless idle
                                self.engine.start();
                            } else {
                                let mut ctx = CommandContext::new(&mut self.engine);
                                match registry.execute(&line, &mut ctx) {
                                    CommandResult::Success => {}
                                    CommandResult::Message(msg) => println!("{}", msg),
                                    CommandResult::Exit => {
                                        println!("{}", "Goodbye!".bright_cyan());
                                        break;
                                    }
                                    CommandResult::Error(e) => {
                                        println!("{} {}", "Error:".bright_red().bold(), e.red())
                                    }
                                    CommandResult::NotACommand => self.handle_press(&line),
                                }
                            }
                            self.pump_events();
                        }
                        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                            println!("{}", "Goodbye!".bright_cyan());
                            break;
                        }
                        Err(err) => {
                            println!(
                                "{} {}",
                                "Error reading input:".bright_red().bold(),
                                err.to_string().red()
                            );
                        }
                    },
                    Err(_) => break, // Channel closed
                },

                recv(tick_rx) -> msg => match msg {
                    Ok(tick) => {
                        self.engine.advance_to(tick.elapsed_ms);
                        self.pump_events();
                    }
                    Err(_) => break, // Clock stopped
                },
            }
        }

        Ok(())
    }

    /// A non-command line is a color press. The engine drops out-of-state
    /// presses itself; anything unrecognized gets a hint.
    fn handle_press(&mut self, line: &str) {
        match Color::from_str(line) {
            Some(color) => self.engine.submit_input(color),
            None => println!(
                "{} '{}'. Try r, g, b, y or '{}'",
                "Unknown input:".bright_red(),
                line,
                "help".bright_green()
            ),
        }
    }

    /// Route everything the engine published since the last pump
    fn pump_events(&mut self) {
        for event in self.engine.drain_events() {
            log::debug!("engine event: {:?}", event);
            match event {
                GameEvent::PlayTone(tone) => self.emitter.play(tone),
                GameEvent::HighScoreChanged(score) => {
                    if let Err(e) = self.store.save(score) {
                        log::warn!("failed to persist high score: {:#}", e);
                    }
                    self.view.apply(&event);
                }
                other => self.view.apply(&other),
            }
        }
    }
}

/// Convenience function to start the game
pub fn start() -> Result<()> {
    let mut game = Game::new().map_err(|e| anyhow::anyhow!("Failed to initialize game: {}", e))?;
    game.run()
}
