//! Virtual-time step queue for delayed game transitions
//!
//! Every timed transition the engine makes goes through this queue rather
//! than through ad-hoc timers, so tests can fast-forward deterministically
//! and the runtime only has to feed the engine a monotonic clock.

use crate::types::Color;
use std::collections::BinaryHeap;

/// A deferred engine transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Grow the pattern by one color and bump the level
    ExtendSequence,
    /// Begin automated playback of the full pattern
    BeginPlayback,
    /// Light and sound pattern element `index`
    PlaybackStep { index: usize },
    /// Clear the highlight for pattern element `index` and continue
    PlaybackStepEnd { index: usize },
    /// Clear the short flash from a player press
    PressFlashEnd { color: Color },
    /// Clear the whole-screen fault indicator
    FaultFlashEnd,
    /// Restore the idle labels and start control after game over
    ResetIdle,
}

/// A step scheduled for a specific virtual time (in milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledStep {
    /// When to execute, in ms on the engine's virtual timeline
    pub due_ms: u64,
    /// Insertion order, so same-instant steps fire in scheduling order
    pub seq: u64,
    /// The round generation this step was created under; steps from a
    /// finished round are dropped instead of firing against reset state
    pub generation: u64,
    /// The transition to perform
    pub step: Step,
}

impl PartialOrd for ScheduledStep {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledStep {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse order for min-heap behavior (earliest first, then FIFO)
        other
            .due_ms
            .cmp(&self.due_ms)
            .then(other.seq.cmp(&self.seq))
    }
}

/// Min-heap of pending steps with generation-aware popping
#[derive(Debug, Default)]
pub struct StepQueue {
    heap: BinaryHeap<ScheduledStep>,
    next_seq: u64,
}

impl StepQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `step` to fire at `due_ms` under `generation`
    pub fn push(&mut self, due_ms: u64, generation: u64, step: Step) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(ScheduledStep {
            due_ms,
            seq,
            generation,
            step,
        });
    }

    /// Pop the next step due at or before `now_ms` belonging to
    /// `current_generation`. Stale-generation steps that are due are
    /// silently discarded.
    pub fn pop_due(&mut self, now_ms: u64, current_generation: u64) -> Option<ScheduledStep> {
        while let Some(next) = self.heap.peek() {
            if next.due_ms > now_ms {
                return None;
            }
            let scheduled = self.heap.pop()?;
            if scheduled.generation == current_generation {
                return Some(scheduled);
            }
            // Continuation from a dead round; drop it
        }
        None
    }

    /// Earliest pending due time, if any (lets a driver sleep precisely)
    pub fn next_due_ms(&self) -> Option<u64> {
        self.heap.peek().map(|s| s.due_ms)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_pop_earliest_first() {
        let mut queue = StepQueue::new();
        queue.push(500, 0, Step::BeginPlayback);
        queue.push(200, 0, Step::ExtendSequence);
        queue.push(1000, 0, Step::ResetIdle);

        assert_eq!(queue.pop_due(2000, 0).unwrap().step, Step::ExtendSequence);
        assert_eq!(queue.pop_due(2000, 0).unwrap().step, Step::BeginPlayback);
        assert_eq!(queue.pop_due(2000, 0).unwrap().step, Step::ResetIdle);
        assert!(queue.pop_due(2000, 0).is_none());
    }

    #[test]
    fn test_same_instant_steps_fire_in_scheduling_order() {
        let mut queue = StepQueue::new();
        queue.push(100, 0, Step::PlaybackStep { index: 0 });
        queue.push(100, 0, Step::PlaybackStepEnd { index: 0 });

        assert_eq!(
            queue.pop_due(100, 0).unwrap().step,
            Step::PlaybackStep { index: 0 }
        );
        assert_eq!(
            queue.pop_due(100, 0).unwrap().step,
            Step::PlaybackStepEnd { index: 0 }
        );
    }

    #[test]
    fn test_not_yet_due_steps_stay_queued() {
        let mut queue = StepQueue::new();
        queue.push(300, 0, Step::ExtendSequence);

        assert!(queue.pop_due(299, 0).is_none());
        assert_eq!(queue.len(), 1);
        assert!(queue.pop_due(300, 0).is_some());
    }

    #[test]
    fn test_stale_generation_steps_are_dropped() {
        let mut queue = StepQueue::new();
        queue.push(100, 0, Step::PlaybackStep { index: 2 });
        queue.push(200, 1, Step::ResetIdle);

        // Round ended: generation moved to 1. The old playback step is due
        // but must not fire.
        assert_eq!(queue.pop_due(500, 1).unwrap().step, Step::ResetIdle);
        assert!(queue.pop_due(500, 1).is_none());
        assert!(queue.is_empty());
    }
}
