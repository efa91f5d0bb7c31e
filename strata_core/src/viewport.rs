// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport metrics.
//!
//! [`ViewportState`] is the scroll offset plus the visible size, recomputed on
//! every scroll or resize event and never persisted. [`ViewportMetrics`] is the
//! read-only capability effects use to query it along with element bounding
//! boxes; the web backend reads `window` and `getBoundingClientRect()`, tests
//! use fixed tables.

use kurbo::{Rect, Size, Vec2};

use crate::style::ElementId;

/// Which scroll component drives an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollAxis {
    /// `scrollLeft` of a horizontal scroller.
    Horizontal,
    /// `scrollY` of the page.
    Vertical,
}

/// Scroll offset and visible size at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    /// Scroll offset in CSS pixels (`x` horizontal, `y` vertical).
    pub scroll: Vec2,
    /// Visible area in CSS pixels.
    pub size: Size,
}

impl ViewportState {
    /// Creates a viewport state.
    #[must_use]
    pub const fn new(scroll: Vec2, size: Size) -> Self {
        Self { scroll, size }
    }

    /// Returns the scroll offset along `axis`.
    #[must_use]
    pub const fn scroll_along(&self, axis: ScrollAxis) -> f64 {
        match axis {
            ScrollAxis::Horizontal => self.scroll.x,
            ScrollAxis::Vertical => self.scroll.y,
        }
    }

    /// Returns `true` if `rect` (in viewport coordinates) lies entirely
    /// outside the visible area.
    ///
    /// Touching an edge counts as inside.
    #[must_use]
    pub fn is_outside(&self, rect: Rect) -> bool {
        rect.y1 < 0.0 || rect.y0 > self.size.height || rect.x1 < 0.0 || rect.x0 > self.size.width
    }
}

/// Read-only access to viewport and element geometry.
pub trait ViewportMetrics {
    /// Current scroll offset and viewport size.
    fn viewport(&self) -> ViewportState;

    /// Bounding box of a registered element in viewport coordinates, or
    /// `None` if the element is not laid out.
    fn bounding_box(&self, element: ElementId) -> Option<Rect>;

    /// Largest reachable scroll offset per axis, when known.
    fn scroll_extent(&self) -> Option<Vec2> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> ViewportState {
        ViewportState::new(Vec2::new(120.0, 300.0), Size::new(800.0, 600.0))
    }

    #[test]
    fn scroll_component_per_axis() {
        let vp = viewport();
        assert_eq!(vp.scroll_along(ScrollAxis::Horizontal), 120.0);
        assert_eq!(vp.scroll_along(ScrollAxis::Vertical), 300.0);
    }

    #[test]
    fn outside_checks_every_edge() {
        let vp = viewport();
        assert!(vp.is_outside(Rect::new(0.0, -200.0, 100.0, -1.0)));
        assert!(vp.is_outside(Rect::new(0.0, 601.0, 100.0, 700.0)));
        assert!(vp.is_outside(Rect::new(-300.0, 0.0, -10.0, 100.0)));
        assert!(vp.is_outside(Rect::new(801.0, 0.0, 900.0, 100.0)));
        assert!(!vp.is_outside(Rect::new(0.0, 500.0, 100.0, 900.0)));
        // Edge contact is still inside.
        assert!(!vp.is_outside(Rect::new(0.0, 600.0, 100.0, 700.0)));
    }
}
