//! Deadline-keyed timer schedule advanced once per simulation step.
//!
//! Everything the original presentation expressed as deferred callbacks
//! (tween completions, weather rescheduling) is an explicit entry here:
//! a deadline plus a payload, fired in (deadline, insertion) order by the
//! step loop. No hidden re-entrant callback stacks.

use smallvec::SmallVec;

use crate::fx::EmitterId;
use crate::world::HouseId;

/// What to do when a timer comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPayload {
    /// The shrink-and-fade door entry finished.
    FinishEnter { house: HouseId },
    /// The grow-and-fade door exit finished.
    FinishExit { house: HouseId },
    /// Activate the next ambient weather effect.
    WeatherStart,
    /// Wind down the active ambient weather effect.
    WeatherStop,
    /// Drain grace elapsed; the emitter resource can be released.
    ReleaseEmitter { emitter: EmitterId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimerEntry {
    fire_at_ms: u64,
    seq: u64,
    payload: TimerPayload,
}

/// Pending timers for one session. Unordered storage; draining sorts by
/// deadline with insertion order breaking ties, so firing is fully
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerQueue {
    entries: Vec<TimerEntry>,
    next_seq: u64,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a payload to fire once `now >= fire_at_ms`.
    pub fn schedule(&mut self, fire_at_ms: u64, payload: TimerPayload) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(TimerEntry {
            fire_at_ms,
            seq,
            payload,
        });
    }

    /// Remove and return every due payload, ordered by (deadline, insertion).
    pub fn drain_due(&mut self, now_ms: u64) -> SmallVec<[TimerPayload; 4]> {
        let mut due: Vec<TimerEntry> = Vec::new();
        self.entries.retain(|entry| {
            if entry.fire_at_ms <= now_ms {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|entry| (entry.fire_at_ms, entry.seq));
        due.into_iter().map(|entry| entry.payload).collect()
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|entry| entry.fire_at_ms).min()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
