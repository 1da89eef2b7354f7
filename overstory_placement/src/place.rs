// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The placement algorithm.

use kurbo::{Rect, Size};

use crate::types::{Horizontal, OverlayPlacement, OverlayRequest, PlacementConfig, Vertical};

/// Reasons a placement could not be computed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// The trigger element is not mounted, so it has no bounds.
    #[error("trigger element has no bounds")]
    MissingReference,
    /// A rectangle or size contained NaN or an infinity.
    #[error("{0} is not finite")]
    NonFinite(&'static str),
    /// The viewport has no area.
    #[error("viewport is empty")]
    EmptyViewport,
}

/// Computes a placement, falling back to [`OverlayPlacement::INERT`] on invalid geometry.
#[must_use]
pub fn place(request: &OverlayRequest, config: &PlacementConfig) -> OverlayPlacement {
    try_place(request, config).unwrap_or_else(|err| {
        tracing::debug!(%err, "overlay geometry unusable; using inert placement");
        OverlayPlacement::INERT
    })
}

/// Computes a placement, reporting invalid geometry as an error.
///
/// The result keeps the overlay's bounding box (with its height clamped to
/// [`OverlayPlacement::max_height`]) inside the viewport whenever the overlay
/// is no larger than the viewport.
pub fn try_place(
    request: &OverlayRequest,
    config: &PlacementConfig,
) -> Result<OverlayPlacement, GeometryError> {
    validate(request)?;

    let reference = request.reference;
    let viewport = request.viewport;
    let gap = request.gap;
    let width = request.effective_width().max(0.0);
    let height = request.overlay.height.max(0.0);

    let mut vertical = request.direction.vertical;
    let horizontal = request.direction.horizontal;

    let mut top = match vertical {
        Vertical::Below => reference.y1 + gap,
        Vertical::Above => reference.y0 - gap - height,
    };
    let mut left = match horizontal {
        Horizontal::Start => reference.x0,
        Horizontal::End => reference.x1 - width,
    };

    // Inside a scrolling container, slide up to stay aligned with the trigger
    // instead of jumping to the other side.
    if let (Some(container), Vertical::Below) = (request.container, vertical) {
        let available = container.y1 - top;
        if height > available {
            top -= height - available;
        }
    }

    let mut flipped = false;
    let mut max_height = viewport.height - config.margin;

    if top < 0.0 {
        top = 0.0;
    }
    if top + height > viewport.height {
        let room = viewport.height - top - config.margin;
        if room >= config.min_usable_height || vertical == Vertical::Above {
            max_height = room;
        } else {
            top -= reference.height() + height + gap;
            flipped = true;
            vertical = vertical.flip();
            tracing::trace!(room, top, "overlay flipped above its trigger");
            if top < 0.0 {
                top = 0.0;
            }
        }
    }
    let max_height = max_height.max(0.0);

    let rendered = height.min(max_height);
    if top + rendered > viewport.height {
        top = (viewport.height - rendered).max(0.0);
    }

    if left + width > viewport.width {
        left -= left + width - viewport.width;
    }
    if left < 0.0 {
        left = config.edge_margin.min((viewport.width - width).max(0.0));
    }

    Ok(OverlayPlacement {
        top,
        left,
        width,
        max_height,
        vertical,
        horizontal,
        flipped,
    })
}

fn validate(request: &OverlayRequest) -> Result<(), GeometryError> {
    if !rect_is_finite(request.reference) {
        return Err(GeometryError::NonFinite("reference rectangle"));
    }
    if !size_is_finite(request.overlay) || request.width.is_some_and(|w| !w.is_finite()) {
        return Err(GeometryError::NonFinite("overlay size"));
    }
    if !request.gap.is_finite() {
        return Err(GeometryError::NonFinite("gap"));
    }
    if request.container.is_some_and(|c| !rect_is_finite(c)) {
        return Err(GeometryError::NonFinite("container rectangle"));
    }
    if !size_is_finite(request.viewport) {
        return Err(GeometryError::NonFinite("viewport"));
    }
    if request.viewport.width <= 0.0 || request.viewport.height <= 0.0 {
        return Err(GeometryError::EmptyViewport);
    }
    Ok(())
}

fn rect_is_finite(r: Rect) -> bool {
    r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
}

fn size_is_finite(s: Size) -> bool {
    s.width.is_finite() && s.height.is_finite()
}
