// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use overstory_event_state::blur::DEFAULT_BLUR_CLOSE_DELAY;
use overstory_placement::{Direction, PlacementConfig};

/// Tunables shared by [`SelectField`](crate::SelectField) and
/// [`AutosuggestField`](crate::AutosuggestField).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldConfig {
    /// Overlay placement thresholds.
    pub placement: PlacementConfig,
    /// Preferred side and alignment of the overlay.
    pub direction: Direction,
    /// Fixed overlay width; `None` follows the trigger's width.
    pub width: Option<f64>,
    /// Delay between losing focus and closing (milliseconds).
    pub blur_close_delay: u64,
    /// Height of one list row, used to scroll the selection into view.
    pub row_extent: f64,
    /// Whether Enter with nothing selected may commit the typed text as a new value.
    pub allow_create: bool,
}

impl FieldConfig {
    /// Returns a copy with a different preferred direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Returns a copy with a fixed overlay width.
    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Returns a copy with a different row height.
    #[must_use]
    pub fn with_row_extent(mut self, row_extent: f64) -> Self {
        self.row_extent = row_extent;
        self
    }

    /// Returns a copy that allows or forbids creating new values.
    #[must_use]
    pub fn with_create(mut self, allow_create: bool) -> Self {
        self.allow_create = allow_create;
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            placement: PlacementConfig::default(),
            direction: Direction::default(),
            width: None,
            blur_close_delay: DEFAULT_BLUR_CLOSE_DELAY,
            row_extent: 32.0,
            allow_create: false,
        }
    }
}
