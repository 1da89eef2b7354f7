// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delayed close-on-blur for inputs with an attached overlay.
//!
//! Clicking an item in a dropdown first blurs the input, then delivers the
//! click. Closing synchronously on blur would unmount the item before its
//! click handler runs. Instead, a blur arms a short timer and the overlay only
//! closes when it expires; focus returning to the input or a pointer press on
//! an overlay item cancels it.
//!
//! ```
//! use overstory_event_state::blur::{BlurCloseState, BlurOutcome};
//!
//! let mut state = BlurCloseState::new();
//!
//! // Input loses focus at t=1000…
//! state.on_blur(1000);
//! // …because the user pressed an overlay item at t=1005.
//! state.on_overlay_pointer_down();
//! assert_eq!(state.poll(1300), BlurOutcome::Idle);
//!
//! // A plain blur closes once the delay has passed.
//! state.on_blur(2000);
//! assert_eq!(state.poll(2100), BlurOutcome::Idle);
//! assert_eq!(state.poll(2200), BlurOutcome::Close);
//! ```

use crate::timer::DeadlineTimer;

/// Default delay between blur and close, in milliseconds.
pub const DEFAULT_BLUR_CLOSE_DELAY: u64 = 200;

/// Result of polling a [`BlurCloseState`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlurOutcome {
    /// Nothing to do.
    Idle,
    /// The close delay expired; close the overlay.
    Close,
}

/// Tracks a pending close caused by losing focus.
#[derive(Clone, Debug)]
pub struct BlurCloseState {
    timer: DeadlineTimer,
    /// Delay between blur and close (milliseconds).
    pub delay: u64,
}

impl BlurCloseState {
    /// Creates a state with the default 200ms delay.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_delay(DEFAULT_BLUR_CLOSE_DELAY)
    }

    /// Creates a state with a custom delay.
    #[must_use]
    pub const fn with_delay(delay: u64) -> Self {
        Self {
            timer: DeadlineTimer::new(),
            delay,
        }
    }

    /// Records that the input lost focus at `timestamp`.
    pub fn on_blur(&mut self, timestamp: u64) {
        self.timer.arm(timestamp, self.delay);
    }

    /// Records that the input regained focus; cancels any pending close.
    pub fn on_focus(&mut self) {
        if self.timer.cancel() {
            tracing::trace!("focus returned; pending blur-close cancelled");
        }
    }

    /// Records a pointer press inside the overlay; cancels any pending close.
    pub fn on_overlay_pointer_down(&mut self) {
        if self.timer.cancel() {
            tracing::trace!("overlay pressed; pending blur-close cancelled");
        }
    }

    /// Checks whether the pending close is due.
    pub fn poll(&mut self, now: u64) -> BlurOutcome {
        match self.timer.poll(now) {
            Some(_) => BlurOutcome::Close,
            None => BlurOutcome::Idle,
        }
    }

    /// Returns `true` while a close is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }

    /// When the pending close is due, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<u64> {
        self.timer.deadline()
    }

    /// Drops any pending close, for example when the overlay closes for another
    /// reason or the owning view is torn down.
    pub fn cancel(&mut self) {
        self.timer.cancel();
    }
}

impl Default for BlurCloseState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_closes_after_delay() {
        let mut state = BlurCloseState::new();
        state.on_blur(1000);
        assert!(state.is_pending());
        assert_eq!(state.deadline(), Some(1200));
        assert_eq!(state.poll(1199), BlurOutcome::Idle);
        assert_eq!(state.poll(1200), BlurOutcome::Close);
        assert_eq!(state.poll(1300), BlurOutcome::Idle);
    }

    #[test]
    fn focus_cancels_pending_close() {
        let mut state = BlurCloseState::with_delay(50);
        state.on_blur(0);
        state.on_focus();
        assert!(!state.is_pending());
        assert_eq!(state.poll(1000), BlurOutcome::Idle);
    }

    #[test]
    fn overlay_press_between_blur_and_click_wins() {
        let mut state = BlurCloseState::new();
        state.on_blur(1000);
        assert_eq!(state.poll(1004), BlurOutcome::Idle);
        state.on_overlay_pointer_down();
        assert_eq!(state.poll(5000), BlurOutcome::Idle);
    }

    #[test]
    fn repeated_blur_restarts_delay() {
        let mut state = BlurCloseState::new();
        state.on_blur(0);
        state.on_blur(150);
        assert_eq!(state.poll(200), BlurOutcome::Idle);
        assert_eq!(state.poll(350), BlurOutcome::Close);
    }

    #[test]
    fn teardown_cancel_is_idempotent() {
        let mut state = BlurCloseState::new();
        state.cancel();
        state.on_blur(0);
        state.cancel();
        state.cancel();
        assert_eq!(state.poll(1000), BlurOutcome::Idle);
    }
}
