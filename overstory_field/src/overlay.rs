// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay lifecycle shared by both field kinds.

use kurbo::{Rect, Size};
use overstory_event_state::blur::{BlurCloseState, BlurOutcome};
use overstory_nav::{ListViewport, ScrollRequest};
use overstory_placement::{OverlayId, OverlayPlacement, OverlayStack, Positioner};

use crate::config::FieldConfig;
use crate::response::FieldStatus;

/// Positioner, blur timer, stack slot, and row scrolling of one field's overlay.
#[derive(Clone, Debug)]
pub(crate) struct OverlayHost {
    positioner: Positioner,
    blur: BlurCloseState,
    id: Option<OverlayId>,
    rows: ListViewport,
    /// Configured width; `None` follows the trigger.
    fixed_width: Option<f64>,
}

impl OverlayHost {
    pub(crate) fn new(config: &FieldConfig) -> Self {
        Self {
            positioner: Positioner::new(config.placement).with_direction(config.direction),
            blur: BlurCloseState::with_delay(config.blur_close_delay),
            id: None,
            rows: ListViewport::new(0, config.row_extent, 0.0),
            fixed_width: config.width,
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.id.is_some()
    }

    pub(crate) fn id(&self) -> Option<OverlayId> {
        self.id
    }

    /// Returns `false` if the overlay was already open.
    pub(crate) fn open(
        &mut self,
        stack: &mut OverlayStack,
        reference: Option<Rect>,
        viewport: Size,
        rows: usize,
    ) -> bool {
        if self.id.is_some() {
            return false;
        }
        self.id = Some(stack.push());
        self.positioner.set_width(self.width_for(reference));
        self.positioner.open(reference, viewport);
        self.blur.cancel();
        self.rows.set_len(rows);
        self.rows.set_scroll_offset(0.0);
        true
    }

    /// Returns `false` if the overlay was already closed.
    pub(crate) fn close(&mut self, stack: &mut OverlayStack) -> bool {
        let Some(id) = self.id.take() else {
            return false;
        };
        stack.remove(id);
        self.positioner.close();
        self.blur.cancel();
        self.rows.set_scroll_offset(0.0);
        true
    }

    /// Escape belongs to the most recently opened overlay only.
    pub(crate) fn owns_escape(&self, stack: &OverlayStack) -> bool {
        self.id.is_some_and(|id| stack.escape_target() == Some(id))
    }

    pub(crate) fn on_measured(&mut self, size: Size) -> OverlayPlacement {
        let placement = self.positioner.on_measured(size);
        self.rows
            .set_viewport_extent(placement.rendered_height(size.height));
        self.rows.clamp_scroll_to_content();
        placement
    }

    pub(crate) fn on_viewport_resized(&mut self, viewport: Size) -> Option<OverlayPlacement> {
        let placement = self.positioner.on_viewport_resized(viewport)?;
        self.rows.set_viewport_extent(placement.max_height);
        self.rows.clamp_scroll_to_content();
        Some(placement)
    }

    pub(crate) fn set_reference(&mut self, reference: Option<Rect>) -> Option<OverlayPlacement> {
        self.positioner.set_width(self.width_for(reference));
        self.positioner.set_reference(reference)
    }

    fn width_for(&self, reference: Option<Rect>) -> Option<f64> {
        self.fixed_width.or(reference.map(|r| r.width()))
    }

    pub(crate) fn placement(&self) -> Option<&OverlayPlacement> {
        self.positioner.placement()
    }

    pub(crate) fn set_rows(&mut self, rows: usize) {
        self.rows.set_len(rows);
    }

    pub(crate) fn reveal(&mut self, scroll: Option<ScrollRequest>) -> Option<ScrollRequest> {
        if let Some(request) = scroll {
            self.rows.scroll_to_index(request.index, request.align);
        }
        scroll
    }

    pub(crate) fn scroll_offset(&self) -> f64 {
        self.rows.scroll_offset()
    }

    pub(crate) fn on_blur(&mut self, now: u64) {
        if self.id.is_some() {
            self.blur.on_blur(now);
        }
    }

    pub(crate) fn on_focus(&mut self) {
        self.blur.on_focus();
    }

    pub(crate) fn on_pointer_down(&mut self) {
        self.blur.on_overlay_pointer_down();
    }

    pub(crate) fn blur_expired(&mut self, now: u64) -> bool {
        self.blur.poll(now) == BlurOutcome::Close
    }

    pub(crate) fn status(&self) -> FieldStatus {
        let mut status = FieldStatus::empty();
        status.set(FieldStatus::OPEN, self.id.is_some());
        status.set(FieldStatus::MEASURING, self.positioner.is_measuring());
        status.set(FieldStatus::CLOSE_PENDING, self.blur.is_pending());
        status
    }

    pub(crate) fn next_deadline(&self) -> Option<u64> {
        self.blur.deadline()
    }
}
