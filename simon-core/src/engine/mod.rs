//! The Simon gameplay state machine
//!
//! `GameEngine` owns the authoritative session state and all transition
//! logic: start a round, grow the pattern, play it back, judge input, end
//! the round. It is entirely virtual-time driven: callers feed it a
//! monotonic millisecond clock via [`GameEngine::advance_to`] and drain the
//! [`GameEvent`]s it publishes. No threads, no sleeping, no I/O, which is
//! what makes the whole state machine testable without real timers.
//!
//! States: Idle → Presenting (playback, input dropped) → AwaitingInput →
//! either back to Presenting on a full correct match (level + 1) or to Idle
//! through the round-end effects on a mismatch.

pub mod event;
pub mod schedule;

pub use event::{CenterDisplay, GameEvent, HeaderLabel};
pub use schedule::{ScheduledStep, Step, StepQueue};

use crate::types::{Color, Difficulty, GameSession, Tone};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Lead-in from `start()` to the first sequence extension
const START_LEAD_IN_MS: u64 = 500;
/// Pause between extending the pattern and playing it back
const EXTEND_TO_PLAYBACK_MS: u64 = 500;
/// Gap before each playback highlight
const PRE_HIGHLIGHT_MS: u64 = 200;
/// How long a player press stays lit (independent of difficulty)
const PRESS_FLASH_MS: u64 = 150;
/// Pause after a completed level before the next extension
const LEVEL_ADVANCE_MS: u64 = 1000;
/// How long the whole-screen fault indicator stays on
const FAULT_FLASH_MS: u64 = 500;
/// How long the end-of-round message stays up before the idle reset
const IDLE_RESTORE_MS: u64 = 2000;

/// The authoritative game state machine
pub struct GameEngine {
    session: GameSession,
    queue: StepQueue,
    events: Vec<GameEvent>,
    rng: SmallRng,
    /// Current position on the virtual timeline, in ms
    now_ms: u64,
    /// Bumped at round end so stale continuations never fire
    generation: u64,
}

impl GameEngine {
    /// Create an engine with a freshly seeded rng. `high_score` is whatever
    /// the caller read back from persistent storage (0 if none).
    pub fn new(high_score: u32) -> Self {
        Self::with_rng(high_score, SmallRng::from_entropy())
    }

    /// Create an engine with a fixed seed, for deterministic tests
    pub fn with_seed(high_score: u32, seed: u64) -> Self {
        Self::with_rng(high_score, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(high_score: u32, rng: SmallRng) -> Self {
        Self {
            session: GameSession::new(high_score),
            queue: StepQueue::new(),
            events: Vec::new(),
            rng,
            now_ms: 0,
            generation: 0,
        }
    }

    /// Read-only view of the session state
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Current virtual time in ms
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Earliest pending transition, if any. A real-time driver can use this
    /// to sleep precisely instead of polling.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.queue.next_due_ms()
    }

    /// True when the engine is accepting player color presses
    pub fn awaiting_input(&self) -> bool {
        self.session.started && !self.session.showing_sequence
    }

    /// Take all events published since the last drain, in emission order
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn schedule(&mut self, delay_ms: u64, step: Step) {
        let due = self.now_ms + delay_ms;
        self.queue.push(due, self.generation, step);
    }

    /// Begin a round. No-op if a round is already in progress.
    pub fn start(&mut self) {
        if self.session.started {
            return;
        }
        self.session.started = true;
        self.session.level = 0;
        self.session.pattern.clear();
        self.session.user_input.clear();

        self.emit(GameEvent::StartControlVisible(false));
        self.emit(GameEvent::Header(HeaderLabel::WatchCarefully));
        self.schedule(START_LEAD_IN_MS, Step::ExtendSequence);
    }

    /// Change playback pacing. Applies from the next animated step; a hold
    /// already in flight keeps the duration it was scheduled with.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.session.difficulty = difficulty;
    }

    /// Submit a player color press. Dropped entirely (never queued) unless
    /// the engine is awaiting input.
    pub fn submit_input(&mut self, color: Color) {
        if !self.awaiting_input() {
            return;
        }
        self.session.user_input.push(color);
        self.emit(GameEvent::PlayTone(Tone::Color(color)));
        self.emit(GameEvent::PressHighlightOn(color));

        // A press during the gap after a completed level lands past the
        // pattern; the original judges that as a mismatch too
        let index = self.session.user_input.len() - 1;
        if self.session.pattern.get(index) != Some(&color) {
            self.round_end();
        } else if self.session.user_input.len() == self.session.pattern.len() {
            self.schedule(LEVEL_ADVANCE_MS, Step::ExtendSequence);
        }
        // Scheduled after judging so the flash clear survives a round end
        self.schedule(PRESS_FLASH_MS, Step::PressFlashEnd { color });
    }

    /// Advance the virtual clock to `now_ms`, firing every due transition
    /// in order. Each step runs to completion before the next one fires;
    /// calls with a clock earlier than the current position only fire what
    /// was already due.
    pub fn advance_to(&mut self, now_ms: u64) {
        while let Some(scheduled) = self.queue.pop_due(now_ms, self.generation) {
            // Steps observe the time they were due, not the poll instant,
            // so follow-on delays are not skewed by coarse ticking
            self.now_ms = self.now_ms.max(scheduled.due_ms);
            self.apply(scheduled.step);
        }
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn apply(&mut self, step: Step) {
        match step {
            Step::ExtendSequence => self.extend_sequence(),
            Step::BeginPlayback => self.begin_playback(),
            Step::PlaybackStep { index } => self.playback_step(index),
            Step::PlaybackStepEnd { index } => self.playback_step_end(index),
            Step::PressFlashEnd { color } => {
                self.emit(GameEvent::PressHighlightOff(color));
            }
            Step::FaultFlashEnd => {
                self.emit(GameEvent::FaultFlashOff);
            }
            Step::ResetIdle => self.reset_idle(),
        }
    }

    /// Grow the pattern by one uniformly random color and start the next
    /// presentation. Consecutive repeats are valid draws.
    fn extend_sequence(&mut self) {
        self.session.user_input.clear();
        self.session.level += 1;
        let color = Color::ALL[self.rng.gen_range(0..Color::ALL.len())];
        self.session.pattern.push(color);

        let level = self.session.level;
        self.emit(GameEvent::LevelChanged(level));
        self.emit(GameEvent::Center(CenterDisplay::Level(level)));
        self.schedule(EXTEND_TO_PLAYBACK_MS, Step::BeginPlayback);
    }

    fn begin_playback(&mut self) {
        self.session.showing_sequence = true;
        self.emit(GameEvent::Header(HeaderLabel::Watch));
        self.schedule(PRE_HIGHLIGHT_MS, Step::PlaybackStep { index: 0 });
    }

    fn playback_step(&mut self, index: usize) {
        let color = self.session.pattern[index];
        self.emit(GameEvent::HighlightOn(color));
        self.emit(GameEvent::PlayTone(Tone::Color(color)));
        // Pace is read here, when the step fires: a difficulty change never
        // shortens or stretches a hold that is already lit
        let hold = self.session.difficulty.pace_ms();
        self.schedule(hold, Step::PlaybackStepEnd { index });
    }

    fn playback_step_end(&mut self, index: usize) {
        let color = self.session.pattern[index];
        self.emit(GameEvent::HighlightOff(color));

        let next = index + 1;
        if next < self.session.pattern.len() {
            self.schedule(PRE_HIGHLIGHT_MS, Step::PlaybackStep { index: next });
        } else {
            self.session.showing_sequence = false;
            self.emit(GameEvent::Header(HeaderLabel::YourTurn));
        }
    }

    /// Mismatch path: sound the buzz, flash the fault, settle the high
    /// score, and reset to Idle with the visible restore delayed so the
    /// player can read the end-of-round message.
    fn round_end(&mut self) {
        self.emit(GameEvent::PlayTone(Tone::Wrong));
        self.emit(GameEvent::FaultFlashOn);
        self.emit(GameEvent::Header(HeaderLabel::GameOver));
        self.emit(GameEvent::Center(CenterDisplay::Fault));

        // The level in progress was never confirmed, so the completed count
        // is level - 1. Observable behavior from the original; keep it.
        let completed = self.session.level.saturating_sub(1);
        if completed > self.session.high_score {
            self.session.high_score = completed;
            self.emit(GameEvent::HighScoreChanged(completed));
            self.emit(GameEvent::Header(HeaderLabel::NewHighScore));
        }

        self.session.reset_round();
        // New generation: anything the dead round still had queued is stale
        self.generation += 1;
        self.schedule(FAULT_FLASH_MS, Step::FaultFlashEnd);
        self.schedule(IDLE_RESTORE_MS, Step::ResetIdle);
    }

    fn reset_idle(&mut self) {
        self.emit(GameEvent::StartControlVisible(true));
        self.emit(GameEvent::Header(HeaderLabel::Simon));
        self.emit(GameEvent::Center(CenterDisplay::Go));
        self.emit(GameEvent::LevelChanged(0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive the engine until it is stably waiting on the player (playback
    /// done, nothing left queued)
    fn advance_until_awaiting(engine: &mut GameEngine) {
        for _ in 0..1000 {
            if engine.awaiting_input()
                && engine.session().level > 0
                && engine.next_due_ms().is_none()
            {
                return;
            }
            match engine.next_due_ms() {
                Some(due) => engine.advance_to(due),
                None => break,
            }
        }
        panic!("engine never reached awaiting-input");
    }

    #[test]
    fn test_start_schedules_first_extension() {
        let mut engine = GameEngine::with_seed(0, 1);
        engine.start();
        assert!(engine.session().started);
        assert_eq!(engine.session().level, 0);

        engine.advance_to(499);
        assert!(engine.session().pattern.is_empty());

        engine.advance_to(500);
        assert_eq!(engine.session().level, 1);
        assert_eq!(engine.session().pattern.len(), 1);
    }

    #[test]
    fn test_start_is_idempotent_while_started() {
        let mut engine = GameEngine::with_seed(0, 1);
        engine.start();
        engine.advance_to(500);
        let pattern = engine.session().pattern.clone();
        engine.drain_events();

        engine.start();
        assert_eq!(engine.session().pattern, pattern);
        assert_eq!(engine.session().level, 1);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_pattern_grows_by_one_per_level() {
        let mut engine = GameEngine::with_seed(0, 42);
        engine.start();

        for expected_level in 1..=5u32 {
            advance_until_awaiting(&mut engine);
            assert_eq!(engine.session().level, expected_level);
            assert_eq!(engine.session().pattern.len() as u32, expected_level);
            // Echo the whole pattern back correctly
            for color in engine.session().pattern.clone() {
                engine.submit_input(color);
            }
        }
    }

    #[test]
    fn test_input_dropped_while_presenting() {
        let mut engine = GameEngine::with_seed(0, 7);
        engine.start();
        // 500ms extend + 500ms to playback start: presenting is underway
        engine.advance_to(1100);
        assert!(engine.session().showing_sequence);
        engine.drain_events();

        engine.submit_input(Color::Red);
        assert!(engine.session().user_input.is_empty());
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_input_dropped_while_idle() {
        let mut engine = GameEngine::with_seed(0, 7);
        engine.submit_input(Color::Green);
        assert!(engine.session().user_input.is_empty());
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_correct_full_match_advances_level() {
        let mut engine = GameEngine::with_seed(0, 3);
        engine.start();
        advance_until_awaiting(&mut engine);
        let first = engine.session().pattern[0];

        engine.submit_input(first);
        // Advance scheduled 1000ms out
        advance_until_awaiting(&mut engine);
        assert_eq!(engine.session().level, 2);
        assert_eq!(engine.session().pattern.len(), 2);
        assert_eq!(engine.session().pattern[0], first);
    }

    #[test]
    fn test_partial_match_stays_awaiting() {
        let mut engine = GameEngine::with_seed(0, 3);
        engine.start();
        advance_until_awaiting(&mut engine);
        engine.submit_input(engine.session().pattern[0]);
        advance_until_awaiting(&mut engine);
        assert_eq!(engine.session().level, 2);

        engine.submit_input(engine.session().pattern[0]);
        assert!(engine.awaiting_input());
        assert_eq!(engine.session().user_input.len(), 1);
    }

    #[test]
    fn test_mismatch_triggers_round_end() {
        let mut engine = GameEngine::with_seed(0, 9);
        engine.start();
        advance_until_awaiting(&mut engine);
        let right = engine.session().pattern[0];
        let wrong = Color::ALL.iter().copied().find(|c| *c != right).unwrap();
        engine.drain_events();

        engine.submit_input(wrong);
        let events = engine.drain_events();
        assert!(events.contains(&GameEvent::PlayTone(Tone::Wrong)));
        assert!(events.contains(&GameEvent::FaultFlashOn));
        assert!(events.contains(&GameEvent::Header(HeaderLabel::GameOver)));
        assert!(!engine.session().started);
        assert_eq!(engine.session().level, 0);
    }

    #[test]
    fn test_high_score_law_is_level_minus_one() {
        let mut engine = GameEngine::with_seed(1, 5);
        engine.start();
        // Clear two levels, then fail on level 3
        for _ in 0..2 {
            advance_until_awaiting(&mut engine);
            for color in engine.session().pattern.clone() {
                engine.submit_input(color);
            }
        }
        advance_until_awaiting(&mut engine);
        assert_eq!(engine.session().level, 3);
        let right = engine.session().pattern[0];
        let wrong = Color::ALL.iter().copied().find(|c| *c != right).unwrap();
        engine.drain_events();

        engine.submit_input(wrong);
        let events = engine.drain_events();
        assert_eq!(engine.session().high_score, 2);
        assert!(events.contains(&GameEvent::HighScoreChanged(2)));
        assert!(events.contains(&GameEvent::Header(HeaderLabel::NewHighScore)));
    }

    #[test]
    fn test_no_high_score_event_when_not_beaten() {
        let mut engine = GameEngine::with_seed(10, 5);
        engine.start();
        advance_until_awaiting(&mut engine);
        let right = engine.session().pattern[0];
        let wrong = Color::ALL.iter().copied().find(|c| *c != right).unwrap();
        engine.drain_events();

        engine.submit_input(wrong);
        let events = engine.drain_events();
        assert_eq!(engine.session().high_score, 10);
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::HighScoreChanged(_))));
        assert!(!events.contains(&GameEvent::Header(HeaderLabel::NewHighScore)));
    }

    #[test]
    fn test_round_end_resets_after_delay() {
        let mut engine = GameEngine::with_seed(0, 5);
        engine.start();
        advance_until_awaiting(&mut engine);
        let right = engine.session().pattern[0];
        let wrong = Color::ALL.iter().copied().find(|c| *c != right).unwrap();
        engine.submit_input(wrong);
        let fail_time = engine.now_ms();
        engine.drain_events();

        // Fault flash clears at +500
        engine.advance_to(fail_time + 500);
        assert!(engine.drain_events().contains(&GameEvent::FaultFlashOff));

        // Visible idle restore at +2000
        engine.advance_to(fail_time + 2000);
        let events = engine.drain_events();
        assert!(events.contains(&GameEvent::StartControlVisible(true)));
        assert!(events.contains(&GameEvent::Header(HeaderLabel::Simon)));
        assert!(events.contains(&GameEvent::Center(CenterDisplay::Go)));
        assert!(events.contains(&GameEvent::LevelChanged(0)));
    }

    #[test]
    fn test_stale_continuation_never_fires_after_round_end() {
        let mut engine = GameEngine::with_seed(0, 11);
        engine.start();
        advance_until_awaiting(&mut engine);
        // Complete level 1: the next extension is now queued 1000ms out
        engine.submit_input(engine.session().pattern[0]);
        engine.drain_events();

        // An extra press during that gap lands past the pattern and ends
        // the round, leaving the queued extension stale
        engine.submit_input(Color::Red);
        assert!(!engine.session().started);
        engine.drain_events();

        // Run the timeline far past everything queued; the dead round's
        // extension must not grow the pattern or restart playback
        engine.advance_to(engine.now_ms() + 10_000);
        let events = engine.drain_events();
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::HighlightOn(_) | GameEvent::PlayTone(Tone::Color(_)))));
        assert!(engine.session().pattern.is_empty());
        assert_eq!(engine.session().level, 0);
    }

    #[test]
    fn test_difficulty_changes_only_future_holds() {
        let mut engine = GameEngine::with_seed(0, 13);
        engine.start();
        advance_until_awaiting(&mut engine);
        engine.submit_input(engine.session().pattern[0]);

        // Reach the start of level-2 playback: first highlight fires with
        // the medium (600ms) hold
        for _ in 0..100 {
            engine.advance_to(engine.next_due_ms().unwrap());
            if engine
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::HighlightOn(_)))
            {
                break;
            }
        }
        let lit_at = engine.now_ms();

        // Difficulty change while lit: the in-flight hold keeps 600ms
        engine.set_difficulty(Difficulty::Hard);
        engine.advance_to(lit_at + 599);
        assert!(!engine
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::HighlightOff(_))));
        engine.advance_to(lit_at + 600);
        assert!(engine
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::HighlightOff(_))));

        // The next step lights 200ms later and holds for the hard 400ms
        engine.advance_to(lit_at + 800);
        assert!(engine
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::HighlightOn(_))));
        engine.advance_to(lit_at + 1200);
        assert!(engine
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::HighlightOff(_))));
    }

    #[test]
    fn test_press_flash_clears_even_after_round_end() {
        let mut engine = GameEngine::with_seed(0, 17);
        engine.start();
        advance_until_awaiting(&mut engine);
        let right = engine.session().pattern[0];
        let wrong = Color::ALL.iter().copied().find(|c| *c != right).unwrap();
        engine.submit_input(wrong);
        let fail_time = engine.now_ms();
        engine.drain_events();

        engine.advance_to(fail_time + 150);
        assert!(engine
            .drain_events()
            .contains(&GameEvent::PressHighlightOff(wrong)));
    }
}
