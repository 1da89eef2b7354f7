// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overstory Event State: small state machines for timing-sensitive input.
//!
//! - [`timer`]: a cancellable deadline timer on a host-supplied logical clock.
//!   One abstraction serves debounce windows, delayed closes, and auto-advance
//!   timers; every re-arm replaces the previous deadline.
//! - [`blur`]: delayed close-on-blur, so that a click on an overlay item (which
//!   fires a blur on the input a few milliseconds before the click itself) can
//!   cancel the close before it happens.
//!
//! Timestamps are plain `u64` milliseconds supplied by the caller, so the state
//! machines are deterministic and testable without a runtime.
//!
//! This crate is `no_std`.

#![no_std]

pub mod blur;
pub mod timer;
