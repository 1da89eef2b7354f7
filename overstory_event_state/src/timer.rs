// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancellable deadline timer.
//!
//! ## Usage
//!
//! ```
//! use overstory_event_state::timer::DeadlineTimer;
//!
//! let mut timer = DeadlineTimer::new();
//!
//! // Arm at t=1000 for 500ms.
//! timer.arm(1000, 500);
//! assert!(timer.poll(1200).is_none());
//!
//! // Re-arming replaces the old deadline.
//! timer.arm(1200, 500);
//! assert!(timer.poll(1500).is_none());
//!
//! // Fires exactly once.
//! assert!(timer.poll(1700).is_some());
//! assert!(timer.poll(1800).is_none());
//! ```
//!
//! ## Rules
//!
//! 1. **Replace on arm**: arming an armed timer discards the old deadline.
//! 2. **Fire once**: [`DeadlineTimer::poll`] reports a firing the first time
//!    `now >= deadline`, then disarms.
//! 3. **Generations**: each arm gets a new [`TimerToken`]. Work scheduled for an
//!    earlier token can be recognised as stale with [`DeadlineTimer::is_current`].

/// Identifies one arming of a [`DeadlineTimer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

/// A one-shot timer on a logical clock.
#[derive(Clone, Debug, Default)]
pub struct DeadlineTimer {
    deadline: Option<u64>,
    generation: u64,
}

impl DeadlineTimer {
    /// Creates a disarmed timer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            deadline: None,
            generation: 0,
        }
    }

    /// Arms the timer to fire `delay` milliseconds after `now`, replacing any previous deadline.
    pub fn arm(&mut self, now: u64, delay: u64) -> TimerToken {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = Some(now.saturating_add(delay));
        TimerToken(self.generation)
    }

    /// Re-arms with the same delay semantics as [`arm`](Self::arm).
    ///
    /// Provided for call sites that read better as "restart the countdown".
    pub fn reset(&mut self, now: u64, delay: u64) -> TimerToken {
        self.arm(now, delay)
    }

    /// Disarms the timer.
    ///
    /// Returns `true` if a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        if self.deadline.take().is_some() {
            self.generation = self.generation.wrapping_add(1);
            true
        } else {
            false
        }
    }

    /// Checks the timer against `now`.
    ///
    /// Returns the token of the arming that fired, and disarms.
    pub fn poll(&mut self, now: u64) -> Option<TimerToken> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(TimerToken(self.generation))
            }
            _ => None,
        }
    }

    /// Pending deadline, if armed.
    #[must_use]
    pub const fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Returns `true` while a deadline is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Milliseconds until the deadline, saturating at zero.
    #[must_use]
    pub fn remaining(&self, now: u64) -> Option<u64> {
        self.deadline.map(|d| d.saturating_sub(now))
    }

    /// Returns `true` if `token` belongs to the most recent arming and was not cancelled.
    #[must_use]
    pub const fn is_current(&self, token: TimerToken) -> bool {
        token.0 == self.generation
    }
}
