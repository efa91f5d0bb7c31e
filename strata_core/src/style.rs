// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style writes and the applier contract.
//!
//! Effect mappers never touch the DOM. They append [`StyleWrite`] records to a
//! [`StyleChanges`] list, and a [`StyleApplier`] (the DOM applier in
//! `strata_backend_web`, or a recording double in tests) replays the list
//! onto real elements.
//!
//! Elements are addressed by [`ElementId`], a dense index assigned when the
//! page's markup is scanned at setup.

use alloc::vec::Vec;
use core::fmt;

use crate::time::Duration;

/// Dense handle for an element registered at setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

impl ElementId {
    /// Returns the slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A CSS `transform` value produced by a parallax mapper.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CssTransform {
    /// `translateX(<x>px)`.
    TranslateX(f64),
    /// `translateY(<y>px)`.
    TranslateY(f64),
    /// `translate3d(<x>px, <y>px, <z>px)`.
    Translate3d(f64, f64, f64),
}

impl fmt::Display for CssTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::TranslateX(x) => write!(f, "translateX({x}px)"),
            Self::TranslateY(y) => write!(f, "translateY({y}px)"),
            Self::Translate3d(x, y, z) => write!(f, "translate3d({x}px, {y}px, {z}px)"),
        }
    }
}

/// One mutation to apply to a registered element.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleWrite {
    /// Replace the element's `transform`.
    Transform {
        /// Target element.
        element: ElementId,
        /// New transform.
        transform: CssTransform,
    },
    /// Add a state class, optionally after a delay.
    AddClass {
        /// Target element.
        element: ElementId,
        /// Class to add.
        class: &'static str,
        /// Delay before the class is added; zero means immediately.
        delay: Duration,
    },
    /// Set the element's horizontal scroll position.
    ScrollLeft {
        /// Target scroll container.
        element: ElementId,
        /// New `scrollLeft` in CSS pixels.
        offset: f64,
    },
}

impl StyleWrite {
    /// Returns the element this write targets.
    #[must_use]
    pub const fn element(&self) -> ElementId {
        match *self {
            Self::Transform { element, .. }
            | Self::AddClass { element, .. }
            | Self::ScrollLeft { element, .. } => element,
        }
    }
}

/// An ordered batch of style writes produced by one effect pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleChanges {
    /// Writes in the order they must be applied.
    pub writes: Vec<StyleWrite>,
}

impl StyleChanges {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transform write.
    pub fn transform(&mut self, element: ElementId, transform: CssTransform) {
        self.writes.push(StyleWrite::Transform { element, transform });
    }

    /// Appends a class write.
    pub fn add_class(&mut self, element: ElementId, class: &'static str, delay: Duration) {
        self.writes.push(StyleWrite::AddClass {
            element,
            class,
            delay,
        });
    }

    /// Appends a scroll write.
    pub fn scroll_left(&mut self, element: ElementId, offset: f64) {
        self.writes.push(StyleWrite::ScrollLeft { element, offset });
    }

    /// Returns `true` if the batch holds no writes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Number of writes in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Clears the batch, keeping its allocation.
    pub fn clear(&mut self) {
        self.writes.clear();
    }
}

/// Applies a batch of style writes to real elements.
///
/// The DOM applier and test doubles both implement this trait, so effect
/// logic can be driven end-to-end without a browser.
pub trait StyleApplier {
    /// Applies every write in `changes`, in order.
    fn apply(&mut self, changes: &StyleChanges);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn transform_css_text() {
        assert_eq!(CssTransform::TranslateX(-12.5).to_string(), "translateX(-12.5px)");
        assert_eq!(CssTransform::TranslateY(4.0).to_string(), "translateY(4px)");
        assert_eq!(
            CssTransform::Translate3d(0.0, -30.0, 20.0).to_string(),
            "translate3d(0px, -30px, 20px)"
        );
    }

    #[test]
    fn batch_preserves_order() {
        let mut changes = StyleChanges::new();
        changes.transform(ElementId(2), CssTransform::TranslateX(1.0));
        changes.add_class(ElementId(0), "visible", Duration::ZERO);
        changes.scroll_left(ElementId(1), 40.0);

        let targets: Vec<ElementId> = changes.writes.iter().map(StyleWrite::element).collect();
        assert_eq!(targets, [ElementId(2), ElementId(0), ElementId(1)]);
        assert_eq!(changes.len(), 3);

        changes.clear();
        assert!(changes.is_empty());
    }
}
