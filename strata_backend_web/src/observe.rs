// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver` binding.

use alloc::boxed::Box;

use js_sys::Array;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Returns `true` if the global scope provides `IntersectionObserver`.
#[must_use]
pub fn intersection_supported() -> bool {
    js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("IntersectionObserver"))
        .unwrap_or(false)
}

type EntryClosure = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Observes elements and reports each intersection change.
///
/// The handler receives the target, its intersection ratio and whether it
/// intersects, and returns `true` to stop observing that target. The
/// observer disconnects on drop.
pub struct RevealObserver {
    observer: IntersectionObserver,
    _closure: EntryClosure,
}

impl RevealObserver {
    /// Creates an observer that reports crossings of `threshold`.
    pub fn new(
        threshold: f64,
        mut on_entry: impl FnMut(&Element, f64, bool) -> bool + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    let target = entry.target();
                    if on_entry(&target, entry.intersection_ratio(), entry.is_intersecting()) {
                        observer.unobserve(&target);
                    }
                }
            },
        ) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)?;
        Ok(Self {
            observer,
            _closure: closure,
        })
    }

    /// Starts observing `element`.
    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

impl core::fmt::Debug for RevealObserver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RevealObserver").finish_non_exhaustive()
    }
}
