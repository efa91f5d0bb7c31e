// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element handles, style writes and viewport geometry.
//!
//! [`DomRegistry`] maps the [`ElementId`]s used by `strata_core` to live
//! `HtmlElement`s. [`DomStyleApplier`] applies [`StyleChanges`] to them and
//! [`DomMetrics`] reads the window, the scroll container and element bounding
//! boxes.

use alloc::rc::Rc;
use alloc::string::ToString as _;
use alloc::vec::Vec;

use kurbo::{Rect, Size, Vec2};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, Window};

use strata_core::style::{ElementId, StyleApplier, StyleChanges, StyleWrite};
use strata_core::time::Duration;
use strata_core::viewport::{ViewportMetrics, ViewportState};

/// Element handles indexed by [`ElementId`].
#[derive(Clone, Debug, Default)]
pub struct DomRegistry {
    elements: Vec<HtmlElement>,
}

impl DomRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `element` and returns its id. Registering the same element
    /// twice returns the first id.
    pub fn register(&mut self, element: &HtmlElement) -> ElementId {
        if let Some(id) = self.id_of(element) {
            return id;
        }
        self.elements.push(element.clone());
        id_at(self.elements.len() - 1)
    }

    /// Returns the element registered as `id`.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&HtmlElement> {
        self.elements.get(id.index())
    }

    /// Looks up the id of a registered element.
    #[must_use]
    pub fn id_of(&self, element: &Element) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| AsRef::<Element>::as_ref(e) == element)
            .map(id_at)
    }

    /// Number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "a page never registers more than u32::MAX elements"
)]
fn id_at(index: usize) -> ElementId {
    ElementId(index as u32)
}

/// Milliseconds for `setTimeout`, saturating at `i32::MAX`.
pub(crate) fn timeout_millis(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}

/// Reads `scrollLeft` as a fractional offset.
pub(crate) fn scroll_left(element: &Element) -> f64 {
    js_sys::Reflect::get(element, &JsValue::from_str("scrollLeft"))
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// Applies [`StyleChanges`] to registered elements.
///
/// Transforms go to `style.transform`, classes to `classList`, and scroll
/// offsets to `scrollLeft`. Class additions with a delay are deferred through
/// `setTimeout`. Failed writes are ignored.
pub struct DomStyleApplier {
    registry: Rc<DomRegistry>,
    window: Window,
}

impl core::fmt::Debug for DomStyleApplier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomStyleApplier")
            .field("elements_len", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl DomStyleApplier {
    /// Creates an applier over `registry`.
    #[must_use]
    pub fn new(registry: Rc<DomRegistry>, window: Window) -> Self {
        Self { registry, window }
    }

    fn add_class_later(&self, element: &HtmlElement, class: &'static str, delay: Duration) {
        let element = element.clone();
        let callback = Closure::once_into_js(move || {
            let _ = element.class_list().add_1(class);
        });
        let _ = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                timeout_millis(delay),
            );
    }
}

impl StyleApplier for DomStyleApplier {
    fn apply(&mut self, changes: &StyleChanges) {
        for write in &changes.writes {
            let Some(el) = self.registry.get(write.element()) else {
                continue;
            };
            match *write {
                StyleWrite::Transform { transform, .. } => {
                    let _ = el.style().set_property("transform", &transform.to_string());
                }
                StyleWrite::AddClass { class, delay, .. } => {
                    if delay.is_zero() {
                        let _ = el.class_list().add_1(class);
                    } else {
                        self.add_class_later(el, class, delay);
                    }
                }
                StyleWrite::ScrollLeft { offset, .. } => {
                    let _ = js_sys::Reflect::set(
                        el,
                        &JsValue::from_str("scrollLeft"),
                        &JsValue::from_f64(offset),
                    );
                }
            }
        }
    }
}

/// Viewport and element geometry read from the live page.
///
/// With a scroll container the horizontal offset is its `scrollLeft`;
/// otherwise both components come from the window.
pub struct DomMetrics {
    registry: Rc<DomRegistry>,
    window: Window,
    scroller: Option<HtmlElement>,
}

impl core::fmt::Debug for DomMetrics {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomMetrics")
            .field("has_scroller", &self.scroller.is_some())
            .finish_non_exhaustive()
    }
}

impl DomMetrics {
    /// Creates metrics over `registry`.
    #[must_use]
    pub fn new(registry: Rc<DomRegistry>, window: Window, scroller: Option<HtmlElement>) -> Self {
        Self {
            registry,
            window,
            scroller,
        }
    }

    /// Current window inner size.
    #[must_use]
    pub fn window_size(&self) -> Size {
        let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Size::new(
            read(self.window.inner_width()),
            read(self.window.inner_height()),
        )
    }
}

impl ViewportMetrics for DomMetrics {
    fn viewport(&self) -> ViewportState {
        let y = self.window.scroll_y().unwrap_or(0.0);
        let x = match &self.scroller {
            Some(el) => scroll_left(el),
            None => self.window.scroll_x().unwrap_or(0.0),
        };
        ViewportState::new(Vec2::new(x, y), self.window_size())
    }

    fn bounding_box(&self, element: ElementId) -> Option<Rect> {
        let r = self.registry.get(element)?.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.right(), r.bottom()))
    }

    fn scroll_extent(&self) -> Option<Vec2> {
        let el = self.scroller.as_ref()?;
        let max = el.scroll_width().saturating_sub(el.client_width()).max(0);
        Some(Vec2::new(f64::from(max), 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_saturates() {
        assert_eq!(timeout_millis(Duration::ZERO), 0);
        assert_eq!(timeout_millis(Duration::from_millis(150)), 150);
        assert_eq!(timeout_millis(Duration::from_millis(u64::MAX / 1000)), i32::MAX);
    }

    #[test]
    fn ids_follow_registration_order() {
        assert_eq!(id_at(0), ElementId(0));
        assert_eq!(id_at(7), ElementId(7));
    }
}
