// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for strata.
//!
//! This crate binds the headless effects in `strata_core` to browser APIs:
//!
//! - [`RafLoop`]: `requestAnimationFrame` loop for continuous animation
//! - [`FrameRequest`]: one-shot frame callback for throttled recomputes
//! - [`DomRegistry`], [`DomStyleApplier`], [`DomMetrics`]: element handles,
//!   style writes and viewport geometry
//! - [`EventBinding`]: event listener that removes itself on drop
//! - [`RevealObserver`]: `IntersectionObserver` wrapper
//! - [`ThreeScene`]: the hero mesh rendered through the global `THREE`
//! - [`DomForm`]: native form validation and the status banner
//! - [`Timeout`]: cancellable `setTimeout`
//! - [`ConsoleSink`]: trace events on the browser console
//! - [`scan_page`]: builds the effect sets from page markup

#![no_std]

extern crate alloc;

mod console;
mod dom;
mod form;
mod listen;
mod observe;
mod raf;
mod scan;
mod three;
mod timer;

pub use console::ConsoleSink;
pub use dom::{DomMetrics, DomRegistry, DomStyleApplier};
pub use form::DomForm;
pub use listen::EventBinding;
pub use observe::{RevealObserver, intersection_supported};
pub use raf::{FrameRequest, RafLoop};
pub use scan::{ScannedPage, scan_page};
pub use strata_core::style::StyleApplier;
pub use three::{ThreeScene, three_available};
pub use timer::Timeout;

use strata_core::time::HostTime;

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}
