//! Delayed reveal of an already received result.
//!
//! ```text
//! Idle --start(0, r)--> Idle           (r revealed immediately)
//! Idle --start(n, r)--> Counting(n)    (r held)
//! Counting(n) --tick--> Counting(n-1)  (n > 1)
//! Counting(1) --tick--> Idle           (held result revealed)
//! Counting(n) --cancel--> Idle         (held result discarded)
//! ```
//!
//! Only one countdown exists at a time; `start` discards whatever an earlier
//! countdown was holding. The timer does not schedule anything itself, the
//! owner calls [`RevealTimer::tick`] once per second while it is counting.

use std::time::Duration;

/// Interval between two ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Counting(u32),
}

/// Result of one tick.
#[derive(Debug, PartialEq)]
pub enum Tick<T> {
    /// Nothing was counting.
    Idle,
    /// Still counting, with this many seconds left.
    Counting(u32),
    /// The countdown finished and hands back the held result.
    Revealed(T),
}

#[derive(Debug)]
pub struct RevealTimer<T> {
    remaining: u32,
    held: Option<T>,
}

impl<T> Default for RevealTimer<T> {
    fn default() -> Self {
        Self {
            remaining: 0,
            held: None,
        }
    }
}

impl<T> RevealTimer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TimerState {
        if self.held.is_some() {
            TimerState::Counting(self.remaining)
        } else {
            TimerState::Idle
        }
    }

    pub fn is_counting(&self) -> bool {
        self.held.is_some()
    }

    /// Begin holding `result` for `seconds`. With no delay the result comes
    /// straight back and the timer stays idle.
    pub fn start(&mut self, seconds: u32, result: T) -> Option<T> {
        if self.cancel() {
            tracing::debug!("previous countdown superseded");
        }
        if seconds == 0 {
            return Some(result);
        }

        self.remaining = seconds;
        self.held = Some(result);
        None
    }

    pub fn tick(&mut self) -> Tick<T> {
        let Some(held) = self.held.take() else {
            return Tick::Idle;
        };

        if self.remaining <= 1 {
            self.remaining = 0;
            return Tick::Revealed(held);
        }

        self.remaining -= 1;
        self.held = Some(held);
        Tick::Counting(self.remaining)
    }

    /// Drop the held result without revealing it. Returns whether a
    /// countdown was running.
    pub fn cancel(&mut self) -> bool {
        self.remaining = 0;
        self.held.take().is_some()
    }
}
