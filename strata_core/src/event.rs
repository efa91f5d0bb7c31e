// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page events.
//!
//! [`PageEvent`] is the browser-independent form of every event the effects
//! react to. The web backend translates DOM events into it; tests construct
//! it directly to drive the pipeline with synthetic input.

use kurbo::Size;

use crate::style::ElementId;
use crate::time::HostTime;

/// Keys the page reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// `ArrowLeft`.
    ArrowLeft,
    /// `ArrowRight`.
    ArrowRight,
    /// Anything else.
    Other,
}

impl Key {
    /// Maps a `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            _ => Self::Other,
        }
    }
}

/// A browser event, stripped to the fields effects use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PageEvent<'a> {
    /// The page or scroll container scrolled.
    Scroll,
    /// The window was resized.
    Resize {
        /// New viewport size.
        size: Size,
    },
    /// Wheel input over the scroll container.
    Wheel {
        /// Vertical wheel delta in CSS pixels.
        delta_y: f64,
    },
    /// A key was pressed.
    KeyDown(Key),
    /// Pointer pressed on the hero canvas.
    PointerDown {
        /// Pointer x in client coordinates.
        x: f64,
    },
    /// Pointer moved anywhere in the window.
    PointerMove {
        /// Pointer x in client coordinates.
        x: f64,
    },
    /// Pointer released anywhere in the window.
    PointerUp,
    /// The colour picker changed.
    ColorInput(&'a str),
    /// An observed element's visible fraction changed.
    Intersection {
        /// Observed element.
        element: ElementId,
        /// Visible fraction in `[0, 1]`.
        ratio: f64,
        /// Whether the element intersects the viewport at all.
        is_intersecting: bool,
    },
    /// The contact form was submitted.
    Submit {
        /// Submit time.
        now: HostTime,
    },
}

/// What the event source must do after an event was handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// Suppress the browser's default action.
    pub prevent_default: bool,
    /// Schedule a frame callback for throttled work.
    pub request_frame: bool,
}

impl EventOutcome {
    /// Nothing to do.
    pub const IGNORED: Self = Self {
        prevent_default: false,
        request_frame: false,
    };

    /// Suppress the default action only.
    pub const PREVENT_DEFAULT: Self = Self {
        prevent_default: true,
        request_frame: false,
    };

    /// Schedule a frame only.
    pub const REQUEST_FRAME: Self = Self {
        prevent_default: false,
        request_frame: true,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_key_mapping() {
        assert_eq!(Key::from_dom_key("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_dom_key("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_dom_key("ArrowUp"), Key::Other);
        assert_eq!(Key::from_dom_key("a"), Key::Other);
    }
}
