// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal scroller driver.
//!
//! Pages built as a horizontal strip of panels translate vertical wheel
//! motion into horizontal scroll, and page through panels one viewport width
//! at a time with the left and right arrow keys. [`ScrollDriver`] tracks the
//! scroller's offset and computes where each input should move it; the web
//! backend writes the result to `scrollLeft`, and the browser's own `scroll`
//! event then feeds the parallax pipeline.

use crate::event::Key;
use crate::viewport::ScrollAxis;

/// How a page scrolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollConfig {
    /// Axis that drives parallax.
    pub axis: ScrollAxis,
    /// Redirect vertical wheel motion to horizontal scroll.
    pub wheel_to_horizontal: bool,
    /// Page by one viewport width on arrow keys.
    pub keyboard_paging: bool,
}

impl ScrollConfig {
    /// A horizontal strip of panels inside a scroll container.
    #[must_use]
    pub const fn horizontal() -> Self {
        Self {
            axis: ScrollAxis::Horizontal,
            wheel_to_horizontal: true,
            keyboard_paging: true,
        }
    }

    /// A regular vertically scrolling page.
    #[must_use]
    pub const fn vertical() -> Self {
        Self {
            axis: ScrollAxis::Vertical,
            wheel_to_horizontal: false,
            keyboard_paging: false,
        }
    }
}

/// Offset of a horizontal scroller and the inputs that move it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollDriver {
    offset: f64,
    max_offset: Option<f64>,
    page_width: f64,
}

impl ScrollDriver {
    /// Creates a driver at offset zero that pages by `page_width`.
    #[must_use]
    pub const fn new(page_width: f64) -> Self {
        Self {
            offset: 0.0,
            max_offset: None,
            page_width,
        }
    }

    /// Current offset in CSS pixels.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Updates the page width, typically on resize.
    pub fn set_page_width(&mut self, width: f64) {
        self.page_width = width;
    }

    /// Sets the largest reachable offset (`scrollWidth - clientWidth`).
    ///
    /// `None` leaves the upper end unclamped.
    pub fn set_max_offset(&mut self, max: Option<f64>) {
        self.max_offset = max.map(|m| m.max(0.0));
        self.offset = self.clamp(self.offset);
    }

    /// Adopts an offset reported by the browser's own `scroll` event.
    pub fn sync(&mut self, offset: f64) {
        self.offset = self.clamp(offset);
    }

    /// Applies a wheel delta and returns the new offset.
    pub fn wheel(&mut self, delta_y: f64) -> f64 {
        self.offset = self.clamp(self.offset + delta_y);
        self.offset
    }

    /// Applies an arrow key. Returns the new offset, or `None` for keys that
    /// do not page.
    pub fn key(&mut self, key: Key) -> Option<f64> {
        let step = match key {
            Key::ArrowRight => self.page_width,
            Key::ArrowLeft => -self.page_width,
            Key::Other => return None,
        };
        self.offset = self.clamp(self.offset + step);
        Some(self.offset)
    }

    fn clamp(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return self.offset;
        }
        let lower = offset.max(0.0);
        match self.max_offset {
            Some(max) => lower.min(max),
            None => lower,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_accumulates_delta() {
        let mut driver = ScrollDriver::new(800.0);
        assert_eq!(driver.wheel(120.0), 120.0);
        assert_eq!(driver.wheel(-20.0), 100.0);
        assert_eq!(driver.offset(), 100.0);
    }

    #[test]
    fn offset_never_goes_negative() {
        let mut driver = ScrollDriver::new(800.0);
        assert_eq!(driver.wheel(-500.0), 0.0);
        assert_eq!(driver.key(Key::ArrowLeft), Some(0.0));
    }

    #[test]
    fn arrows_page_by_viewport_width() {
        let mut driver = ScrollDriver::new(800.0);
        assert_eq!(driver.key(Key::ArrowRight), Some(800.0));
        assert_eq!(driver.key(Key::ArrowRight), Some(1600.0));
        assert_eq!(driver.key(Key::ArrowLeft), Some(800.0));
        assert_eq!(driver.key(Key::Other), None);
        assert_eq!(driver.offset(), 800.0);
    }

    #[test]
    fn max_offset_clamps_and_resize_changes_page() {
        let mut driver = ScrollDriver::new(800.0);
        driver.set_max_offset(Some(1000.0));
        assert_eq!(driver.key(Key::ArrowRight), Some(800.0));
        assert_eq!(driver.key(Key::ArrowRight), Some(1000.0));

        driver.set_page_width(300.0);
        assert_eq!(driver.key(Key::ArrowLeft), Some(700.0));

        driver.set_max_offset(Some(500.0));
        assert_eq!(driver.offset(), 500.0);
    }

    #[test]
    fn sync_adopts_browser_offset() {
        let mut driver = ScrollDriver::new(800.0);
        driver.sync(432.0);
        assert_eq!(driver.wheel(8.0), 440.0);
        driver.sync(f64::NAN);
        assert_eq!(driver.offset(), 440.0);
    }
}
