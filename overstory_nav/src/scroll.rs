// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll state for an overlay's row list.

/// Alignment mode when scrolling a specific index into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollAlign {
    /// Align the start (top edge) of the row with the viewport.
    Start,
    /// Center the row within the viewport.
    Center,
    /// Align the end (bottom edge) of the row with the viewport.
    End,
    /// Move just enough to make the row fully visible, preferring the
    /// smallest change from the current scroll offset.
    Nearest,
}

/// Scroll offset of a list of uniform rows inside an overlay of limited height.
///
/// The viewport extent is typically the overlay's
/// `max_height` and the row extent the measured height of one option row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListViewport {
    len: usize,
    row_extent: f64,
    viewport_extent: f64,
    scroll_offset: f64,
}

impl ListViewport {
    /// Creates a viewport over `len` rows of `row_extent`, scrolled to the top.
    #[must_use]
    pub fn new(len: usize, row_extent: f64, viewport_extent: f64) -> Self {
        Self {
            len,
            row_extent: non_negative(row_extent),
            viewport_extent: non_negative(viewport_extent),
            scroll_offset: 0.0,
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sets the number of rows and clamps the scroll offset to the new content.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.clamp_scroll_to_content();
    }

    /// Sets the uniform row extent.
    pub fn set_row_extent(&mut self, extent: f64) {
        debug_assert!(
            extent.is_finite(),
            "ListViewport row extents must be finite; got {extent:?}"
        );
        self.row_extent = non_negative(extent);
    }

    /// Returns the current viewport extent.
    #[must_use]
    pub const fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    /// Sets the viewport extent.
    pub fn set_viewport_extent(&mut self, extent: f64) {
        self.viewport_extent = non_negative(extent);
    }

    /// Returns the current scroll offset.
    #[must_use]
    pub const fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Sets the scroll offset.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = non_negative(offset);
    }

    /// Total extent of all rows.
    #[must_use]
    pub fn content_extent(&self) -> f64 {
        self.row_extent * self.len as f64
    }

    /// Clamps the scroll offset so that the viewport stays within the content.
    pub fn clamp_scroll_to_content(&mut self) {
        let max_offset = (self.content_extent() - self.viewport_extent).max(0.0);
        if self.scroll_offset > max_offset {
            self.scroll_offset = max_offset;
        }
    }

    /// Returns `true` if the given row is fully visible within the viewport.
    #[must_use]
    pub fn is_index_fully_visible(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        let (start, end) = self.row_span(index);
        start >= self.scroll_offset && end <= self.scroll_offset + self.viewport_extent
    }

    /// Scrolls so that row `index` is brought into view using the given alignment.
    ///
    /// Returns the new scroll offset.
    pub fn scroll_to_index(&mut self, index: usize, align: ScrollAlign) -> f64 {
        if self.len == 0 {
            self.scroll_offset = 0.0;
            return 0.0;
        }
        let (item_start, item_end) = self.row_span(index.min(self.len - 1));
        let viewport = self.viewport_extent;

        let new_offset = match align {
            ScrollAlign::Start => item_start,
            ScrollAlign::End => (item_end - viewport).max(0.0),
            ScrollAlign::Center => ((item_start + item_end) / 2.0 - viewport / 2.0).max(0.0),
            ScrollAlign::Nearest => {
                let current = self.scroll_offset;
                if item_start >= current && item_end <= current + viewport {
                    current
                } else if item_start < current {
                    item_start
                } else {
                    (item_end - viewport).max(0.0)
                }
            }
        };
        self.set_scroll_offset(new_offset);
        self.clamp_scroll_to_content();
        self.scroll_offset
    }

    fn row_span(&self, index: usize) -> (f64, f64) {
        let start = index as f64 * self.row_extent;
        (start, start + self.row_extent)
    }
}

fn non_negative(v: f64) -> f64 {
    // Clamp finite negatives to `0.0`; NaNs are the caller's bug.
    if v.is_sign_negative() { 0.0 } else { v }
}
