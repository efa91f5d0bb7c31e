// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancellable `setTimeout`.

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use strata_core::time::Duration;

use crate::dom::timeout_millis;

/// A pending `setTimeout` callback. Dropping the handle clears the timeout
/// if it has not fired yet.
pub struct Timeout {
    window: Window,
    id: Option<i32>,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    /// Calls `callback` once after `delay`.
    pub fn new(
        window: &Window,
        delay: Duration,
        callback: impl FnOnce() + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::once(callback);
        let id = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            timeout_millis(delay),
        )?;
        Ok(Self {
            window: window.clone(),
            id: Some(id),
            _closure: closure,
        })
    }

    /// Clears the timeout. Calling this after it fired has no effect.
    pub fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            self.window.clear_timeout_with_handle(id);
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl core::fmt::Debug for Timeout {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Timeout")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
