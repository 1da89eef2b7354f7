// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: directions, requests, placements, and configuration.

use core::fmt;
use core::str::FromStr;

use kurbo::{Rect, Size};

/// Preferred vertical side of the trigger.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Vertical {
    /// Open downward, below the trigger.
    #[default]
    Below,
    /// Open upward, above the trigger.
    Above,
}

impl Vertical {
    /// Returns the opposite side.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Below => Self::Above,
            Self::Above => Self::Below,
        }
    }
}

/// Preferred horizontal alignment with the trigger.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Horizontal {
    /// Align the overlay's left edge with the trigger's left edge.
    #[default]
    Start,
    /// Align the overlay's right edge with the trigger's right edge.
    End,
}

/// Preferred opening direction of an overlay.
///
/// The default opens downward and left-aligned.
///
/// Directions parse from the short names hosts typically pass around:
///
/// ```rust
/// use overstory_placement::{Direction, Horizontal, Vertical};
///
/// assert_eq!("".parse::<Direction>().unwrap(), Direction::default());
/// assert_eq!(
///     "top-right".parse::<Direction>().unwrap(),
///     Direction { vertical: Vertical::Above, horizontal: Horizontal::End },
/// );
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Direction {
    /// Which side of the trigger to open on.
    pub vertical: Vertical,
    /// Which trigger edge to align with.
    pub horizontal: Horizontal,
}

impl Direction {
    /// Downward, left-aligned.
    pub const BOTTOM_LEFT: Self = Self {
        vertical: Vertical::Below,
        horizontal: Horizontal::Start,
    };
    /// Downward, right-aligned.
    pub const BOTTOM_RIGHT: Self = Self {
        vertical: Vertical::Below,
        horizontal: Horizontal::End,
    };
    /// Upward, left-aligned.
    pub const TOP_LEFT: Self = Self {
        vertical: Vertical::Above,
        horizontal: Horizontal::Start,
    };
    /// Upward, right-aligned.
    pub const TOP_RIGHT: Self = Self {
        vertical: Vertical::Above,
        horizontal: Horizontal::End,
    };
}

/// Error returned when a direction string contains an unknown token.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown overlay direction token `{token}`")]
pub struct ParseDirectionError {
    token: alloc::string::String,
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut direction = Self::default();
        for token in s
            .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            match token {
                "top" => direction.vertical = Vertical::Above,
                "bottom" => direction.vertical = Vertical::Below,
                "left" => direction.horizontal = Horizontal::Start,
                "right" => direction.horizontal = Horizontal::End,
                other => {
                    return Err(ParseDirectionError {
                        token: other.into(),
                    });
                }
            }
        }
        Ok(direction)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = match self.vertical {
            Vertical::Below => "bottom",
            Vertical::Above => "top",
        };
        let h = match self.horizontal {
            Horizontal::Start => "left",
            Horizontal::End => "right",
        };
        write!(f, "{v}-{h}")
    }
}

/// Tunables shared by every placement computation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementConfig {
    /// Default gap between trigger and overlay, used by [`Positioner`](crate::Positioner).
    pub gap: f64,
    /// Space kept free between the overlay and the bottom of the viewport.
    pub margin: f64,
    /// Left offset used when an overlay would start left of the viewport.
    pub edge_margin: f64,
    /// Smallest `max_height` worth shrinking to before flipping instead.
    pub min_usable_height: f64,
}

impl PlacementConfig {
    /// Creates a configuration with custom vertical thresholds.
    #[must_use]
    pub fn with_thresholds(margin: f64, min_usable_height: f64) -> Self {
        Self {
            margin,
            min_usable_height,
            ..Self::default()
        }
    }

    /// Returns a copy of this configuration with the given default gap.
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            gap: 4.0,
            margin: 8.0,
            edge_margin: 8.0,
            min_usable_height: 160.0,
        }
    }
}

/// Everything needed to place one overlay.
///
/// All rectangles and sizes live in the same coordinate space as the viewport
/// (typically CSS pixels relative to the viewport's top-left corner).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayRequest {
    /// Screen bounds of the trigger element.
    pub reference: Rect,
    /// Preferred opening direction.
    pub direction: Direction,
    /// Pixels between trigger and overlay.
    pub gap: f64,
    /// Measured size of the overlay's content.
    pub overlay: Size,
    /// Explicit overlay width; overrides `overlay.width` when set.
    pub width: Option<f64>,
    /// Size of the viewport.
    pub viewport: Size,
    /// Optional scroll-clipping ancestor whose bottom edge should also be respected.
    pub container: Option<Rect>,
}

impl OverlayRequest {
    /// Creates a downward, left-aligned request with no gap.
    #[must_use]
    pub fn new(reference: Rect, overlay: Size, viewport: Size) -> Self {
        Self {
            reference,
            direction: Direction::default(),
            gap: 0.0,
            overlay,
            width: None,
            viewport,
            container: None,
        }
    }

    /// Sets the preferred direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the gap between trigger and overlay.
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Sets an explicit overlay width.
    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the scroll-clipping container.
    #[must_use]
    pub fn with_container(mut self, container: Rect) -> Self {
        self.container = Some(container);
        self
    }

    /// Width the overlay will be laid out at.
    #[must_use]
    pub fn effective_width(&self) -> f64 {
        self.width.unwrap_or(self.overlay.width)
    }
}

/// Edge offsets suitable for absolute positioning.
///
/// Exactly one of `top`/`bottom` and one of `left`/`right` is set.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Insets {
    /// Distance from the viewport's top edge to the overlay's top edge.
    pub top: Option<f64>,
    /// Distance from the viewport's bottom edge to the overlay's bottom edge.
    pub bottom: Option<f64>,
    /// Distance from the viewport's left edge to the overlay's left edge.
    pub left: Option<f64>,
    /// Distance from the viewport's right edge to the overlay's right edge.
    pub right: Option<f64>,
}

/// The computed position of an overlay.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayPlacement {
    /// Offset of the overlay's top edge from the viewport's top edge.
    pub top: f64,
    /// Offset of the overlay's left edge from the viewport's left edge.
    pub left: f64,
    /// Width the overlay is laid out at.
    pub width: f64,
    /// Largest height the overlay may render at; content beyond it scrolls.
    pub max_height: f64,
    /// Side of the trigger the overlay ended up on.
    pub vertical: Vertical,
    /// Trigger edge the overlay is aligned with.
    pub horizontal: Horizontal,
    /// Whether the preferred vertical direction was flipped to fit the viewport.
    pub flipped: bool,
}

impl OverlayPlacement {
    /// Off-screen-safe placement used when geometry is missing or invalid.
    pub const INERT: Self = Self {
        top: 0.0,
        left: 0.0,
        width: 0.0,
        max_height: 0.0,
        vertical: Vertical::Below,
        horizontal: Horizontal::Start,
        flipped: false,
    };

    /// Returns `true` for the fallback produced from invalid geometry.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        *self == Self::INERT
    }

    /// Height the overlay renders at given its content height.
    #[must_use]
    pub fn rendered_height(&self, content_height: f64) -> f64 {
        content_height.min(self.max_height).max(0.0)
    }

    /// Bounding box of the overlay once applied.
    #[must_use]
    pub fn rect(&self, content_height: f64) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.rendered_height(content_height),
        )
    }

    /// Expresses the placement as edge insets.
    ///
    /// Overlays opened above their trigger are pinned by `bottom` so that shrinking
    /// content stays attached to the trigger; right-aligned overlays are pinned by `right`.
    #[must_use]
    pub fn insets(&self, viewport: Size, content_height: f64) -> Insets {
        let rect = self.rect(content_height);
        let mut insets = Insets::default();
        match self.vertical {
            Vertical::Below => insets.top = Some(rect.y0),
            Vertical::Above => insets.bottom = Some(viewport.height - rect.y1),
        }
        match self.horizontal {
            Horizontal::Start => insets.left = Some(rect.x0),
            Horizontal::End => insets.right = Some(viewport.width - rect.x1),
        }
        insets
    }
}
