// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace events on the browser console.

use alloc::format;
use alloc::string::String;

use wasm_bindgen::JsValue;

use strata_core::trace::{
    ColorEvent, DragEvent, FormEvent, ParallaxEvent, RevealEvent, ScrollEvent, StatusClearedEvent,
    TraceSink,
};

/// Writes one `console.debug` line per event.
///
/// Mesh frames arrive every animation frame and are not logged.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// Creates a console sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn log(line: String) {
    web_sys::console::debug_1(&JsValue::from_str(&line));
}

impl TraceSink for ConsoleSink {
    fn on_scroll(&mut self, e: &ScrollEvent) {
        log(format!("[scroll] source={:?} offset={:.1}px", e.source, e.offset));
    }

    fn on_parallax(&mut self, e: &ParallaxEvent) {
        log(format!(
            "[parallax] pass={} written={} skipped={}",
            e.pass_index, e.written, e.skipped
        ));
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        log(format!(
            "[reveal] element={} children={} degraded={}",
            e.element.0, e.children, e.degraded
        ));
    }

    fn on_drag(&mut self, e: &DragEvent) {
        log(format!("[drag] dx={:.1}px yaw={:.3}rad", e.delta_x, e.yaw));
    }

    fn on_color(&mut self, e: &ColorEvent) {
        log(format!("[color] {}", e.color));
    }

    fn on_form(&mut self, e: &FormEvent) {
        log(format!("[form] at={:?} valid={}", e.at, e.valid));
    }

    fn on_status_cleared(&mut self, e: &StatusClearedEvent) {
        log(format!("[status] cleared at={:?}", e.at));
    }
}
