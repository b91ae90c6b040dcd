//! Sequence clock: the single timing source for all delayed transitions
//!
//! A dedicated thread broadcasts elapsed-time ticks to every subscriber at
//! a fixed rate. The engine itself never sleeps; the front end feeds
//! each tick's elapsed milliseconds into `GameEngine::advance_to`, so game
//! timing stays on one timeline and tests can skip the clock entirely by
//! advancing virtual time by hand.

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Tick interval. Comfortably finer than the shortest game delay (150ms).
pub const TICK_MS: u64 = 15;

/// A single clock tick broadcast to all subscribers
#[derive(Clone, Copy, Debug)]
pub struct ClockTick {
    /// Milliseconds since the clock was created
    pub elapsed_ms: u64,
    /// The instant this tick was generated
    pub timestamp: Instant,
}

/// Commands that can be sent to the clock thread
enum ClockCommand {
    AddSubscriber(Sender<ClockTick>),
    Shutdown,
}

/// Clock handle; the tick thread stops and joins on Drop
pub struct SequenceClock {
    command_tx: Sender<ClockCommand>,
    thread: Option<JoinHandle<()>>,
}

impl SequenceClock {
    pub fn new() -> Self {
        let (command_tx, command_rx) = unbounded();
        let thread = thread::spawn(move || ClockThread::new(command_rx).run());

        SequenceClock {
            command_tx,
            thread: Some(thread),
        }
    }

    /// Create a new subscriber that will receive tick events.
    /// Multiple subscribers receive the same ticks.
    pub fn subscribe(&self) -> Receiver<ClockTick> {
        let (tx, rx) = unbounded();
        let _ = self.command_tx.send(ClockCommand::AddSubscriber(tx));
        rx
    }
}

impl Default for SequenceClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SequenceClock {
    fn drop(&mut self) {
        let _ = self.command_tx.send(ClockCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Internal tick generator
struct ClockThread {
    command_rx: Receiver<ClockCommand>,
    subscribers: Vec<Sender<ClockTick>>,
    origin: Instant,
}

impl ClockThread {
    fn new(command_rx: Receiver<ClockCommand>) -> Self {
        Self {
            command_rx,
            subscribers: Vec::new(),
            origin: Instant::now(),
        }
    }

    fn run(&mut self) {
        let tick = Duration::from_millis(TICK_MS);
        let mut next_tick = self.origin + tick;

        loop {
            // Wait for a command until the next tick is due; command
            // handling never delays ticking by more than one wait
            let timeout = next_tick.saturating_duration_since(Instant::now());
            match self.command_rx.recv_timeout(timeout) {
                Ok(ClockCommand::AddSubscriber(tx)) => {
                    self.subscribers.push(tx);
                    continue;
                }
                Ok(ClockCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }

            let now = Instant::now();
            let tick_event = ClockTick {
                elapsed_ms: now.duration_since(self.origin).as_millis() as u64,
                timestamp: now,
            };
            // Broadcast, removing disconnected subscribers
            self.subscribers.retain(|tx| tx.send(tick_event).is_ok());
            next_tick += tick;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_receives_ticks() {
        let clock = SequenceClock::new();
        let rx = clock.subscribe();

        let tick = rx
            .recv_timeout(Duration::from_secs(1))
            .expect("no tick within a second");
        let later = rx
            .recv_timeout(Duration::from_secs(1))
            .expect("no second tick");
        assert!(later.elapsed_ms >= tick.elapsed_ms);
    }

    #[test]
    fn test_elapsed_is_monotonic() {
        let clock = SequenceClock::new();
        let rx = clock.subscribe();

        let mut last = 0u64;
        for _ in 0..5 {
            let tick = rx
                .recv_timeout(Duration::from_secs(1))
                .expect("tick missing");
            assert!(tick.elapsed_ms >= last);
            last = tick.elapsed_ms;
        }
    }

    #[test]
    fn test_clock_shuts_down_cleanly() {
        let clock = SequenceClock::new();
        let rx = clock.subscribe();
        drop(clock);
        // Channel closes once the thread exits
        while rx.recv_timeout(Duration::from_secs(1)).is_ok() {}
    }
}
