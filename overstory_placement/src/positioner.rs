// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-pass placement state for a single overlay.

use kurbo::{Rect, Size};

use crate::place::{GeometryError, try_place};
use crate::types::{Direction, OverlayPlacement, OverlayRequest, PlacementConfig};

#[derive(Copy, Clone, Debug, PartialEq)]
enum Phase {
    Closed,
    /// Open, but the overlay has not been measured yet.
    Measuring,
    Placed {
        overlay: Size,
        placement: OverlayPlacement,
    },
}

/// Owns the placement lifecycle of one overlay.
///
/// An overlay's own size is only known after it has been rendered, so hosts drive
/// a `Positioner` in two passes:
///
/// 1. [`open`](Self::open) records the trigger bounds and viewport. The host renders
///    the overlay invisibly while [`is_measuring`](Self::is_measuring) is `true`.
/// 2. [`on_measured`](Self::on_measured) receives the rendered size and computes the
///    final [`OverlayPlacement`], which the host then applies.
///
/// Window resizes and trigger moves recompute from the last measured size. Scroll
/// tracking is not continuous: placements are refreshed at open time and on
/// explicit geometry changes only.
///
/// ```rust
/// use kurbo::{Rect, Size};
/// use overstory_placement::{PlacementConfig, Positioner};
///
/// let mut positioner = Positioner::new(PlacementConfig::default());
/// positioner.open(Some(Rect::new(10.0, 10.0, 110.0, 30.0)), Size::new(800.0, 600.0));
/// assert!(positioner.placement().is_none());
///
/// let placement = positioner.on_measured(Size::new(100.0, 200.0));
/// assert_eq!(placement.top, 34.0);
/// assert_eq!(positioner.placement(), Some(&placement));
/// ```
#[derive(Clone, Debug)]
pub struct Positioner {
    config: PlacementConfig,
    direction: Direction,
    gap: f64,
    width: Option<f64>,
    reference: Option<Rect>,
    container: Option<Rect>,
    viewport: Size,
    phase: Phase,
}

impl Positioner {
    /// Creates a closed positioner using the config's default gap.
    #[must_use]
    pub fn new(config: PlacementConfig) -> Self {
        Self {
            config,
            direction: Direction::default(),
            gap: config.gap,
            width: None,
            reference: None,
            container: None,
            viewport: Size::ZERO,
            phase: Phase::Closed,
        }
    }

    /// Sets the preferred direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Overrides the gap between trigger and overlay.
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Forces the overlay to a fixed width.
    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets or clears the fixed overlay width, recomputing if already placed.
    ///
    /// With `None` the measured overlay width is used.
    pub fn set_width(&mut self, width: Option<f64>) -> Option<OverlayPlacement> {
        self.width = width;
        self.refresh()
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Returns the preferred direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Enters the measuring phase for a freshly opened overlay.
    ///
    /// `reference` is `None` when the trigger element is not mounted; the placement
    /// then resolves to [`OverlayPlacement::INERT`].
    pub fn open(&mut self, reference: Option<Rect>, viewport: Size) {
        self.reference = reference;
        self.viewport = viewport;
        self.phase = Phase::Measuring;
    }

    /// Sets or clears the scroll-clipping container.
    pub fn set_container(&mut self, container: Option<Rect>) {
        self.container = container;
        self.refresh();
    }

    /// Records new trigger bounds, recomputing if already placed.
    pub fn set_reference(&mut self, reference: Option<Rect>) -> Option<OverlayPlacement> {
        self.reference = reference;
        self.refresh()
    }

    /// Completes the second pass with the overlay's rendered size.
    ///
    /// Calling this while closed is tolerated and yields the inert placement.
    pub fn on_measured(&mut self, overlay: Size) -> OverlayPlacement {
        if self.phase == Phase::Closed {
            return OverlayPlacement::INERT;
        }
        let placement = self.compute(overlay);
        self.phase = Phase::Placed { overlay, placement };
        placement
    }

    /// Recomputes for a new viewport size.
    ///
    /// Returns the updated placement when the overlay has already been measured.
    pub fn on_viewport_resized(&mut self, viewport: Size) -> Option<OverlayPlacement> {
        self.viewport = viewport;
        self.refresh()
    }

    /// Discards all per-open state.
    pub fn close(&mut self) {
        self.reference = None;
        self.phase = Phase::Closed;
    }

    /// Returns `true` between [`open`](Self::open) and [`close`](Self::close).
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase != Phase::Closed
    }

    /// Returns `true` while the overlay still needs its measuring render pass.
    #[must_use]
    pub fn is_measuring(&self) -> bool {
        self.phase == Phase::Measuring
    }

    /// Returns the current placement, if the overlay has been measured.
    #[must_use]
    pub fn placement(&self) -> Option<&OverlayPlacement> {
        match &self.phase {
            Phase::Placed { placement, .. } => Some(placement),
            _ => None,
        }
    }

    /// Builds the request that the current state would be placed with.
    pub fn request(&self, overlay: Size) -> Result<OverlayRequest, GeometryError> {
        let reference = self.reference.ok_or(GeometryError::MissingReference)?;
        Ok(OverlayRequest {
            reference,
            direction: self.direction,
            gap: self.gap,
            overlay,
            width: self.width,
            viewport: self.viewport,
            container: self.container,
        })
    }

    fn refresh(&mut self) -> Option<OverlayPlacement> {
        let Phase::Placed { overlay, .. } = self.phase else {
            return None;
        };
        let placement = self.compute(overlay);
        self.phase = Phase::Placed { overlay, placement };
        Some(placement)
    }

    fn compute(&self, overlay: Size) -> OverlayPlacement {
        match self
            .request(overlay)
            .and_then(|request| try_place(&request, &self.config))
        {
            Ok(placement) => placement,
            Err(err) => {
                tracing::debug!(%err, "overlay geometry unusable; using inert placement");
                OverlayPlacement::INERT
            }
        }
    }
}
