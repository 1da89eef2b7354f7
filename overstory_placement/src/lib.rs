// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overstory Placement: viewport-aware positioning for floating overlays.
//!
//! Menus, dropdown panels, autosuggest lists, and popovers all share the same problem:
//! given the screen bounds of a trigger element, a preferred direction, and the overlay's
//! own measured size, find a position that keeps the overlay visible and anchored
//! sensibly to its trigger.
//!
//! This crate models that as:
//! - An [`OverlayRequest`] describing the trigger rectangle, the preferred [`Direction`],
//!   the gap between trigger and overlay, the overlay's measured [`Size`](kurbo::Size), the
//!   viewport, and an optional scroll-clipping container.
//! - A pure function, [`place`], that turns a request into an [`OverlayPlacement`]:
//!   top/left offsets, a `max_height` clamp, and whether the preferred direction was
//!   flipped to avoid overflowing the viewport.
//! - A [`Positioner`] that tracks the two-pass lifecycle hosts need in practice: an
//!   overlay's size is only known after it has been rendered (invisibly) once, so the
//!   final placement lags the open transition by one render pass.
//! - An [`OverlayStack`] that records which overlays are currently open and which one
//!   should respond to Escape.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use overstory_placement::{OverlayRequest, PlacementConfig, place};
//!
//! // A 200px wide trigger near the top of an 800x600 viewport.
//! let trigger = Rect::new(100.0, 40.0, 300.0, 60.0);
//! let request = OverlayRequest::new(trigger, Size::new(200.0, 150.0), Size::new(800.0, 600.0))
//!     .with_gap(4.0);
//!
//! let placement = place(&request, &PlacementConfig::default());
//! assert_eq!(placement.top, 64.0);
//! assert_eq!(placement.left, 100.0);
//! assert!(!placement.flipped);
//! ```
//!
//! ## Placement rules
//!
//! 1. The overlay is anchored below (`trigger.bottom + gap`) or above
//!    (`trigger.top - gap - height`) the trigger, and aligned to its left or right edge.
//! 2. Inside a scroll-clipping container, a downward overlay that would pass the
//!    container's bottom edge is shifted up rather than flipped, which keeps it aligned
//!    with small trigger icons.
//! 3. If the overlay would run off the bottom of the viewport, its `max_height` is reduced
//!    when at least [`PlacementConfig::min_usable_height`] remains; otherwise it flips
//!    above the trigger.
//! 4. Horizontal overflow is shifted back into the viewport.
//!
//! Missing or non-finite geometry never panics: [`place`] falls back to
//! [`OverlayPlacement::INERT`], and [`try_place`] reports a [`GeometryError`].
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for [`PlacementConfig`] and [`Direction`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod place;
mod positioner;
mod stack;
mod types;

pub use place::{GeometryError, place, try_place};
pub use positioner::Positioner;
pub use stack::{OverlayId, OverlayStack};
pub use types::{
    Direction, Horizontal, Insets, OverlayPlacement, OverlayRequest, ParseDirectionError,
    PlacementConfig, Vertical,
};
