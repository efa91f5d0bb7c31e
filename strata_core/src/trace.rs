// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for page effects.
//!
//! This module provides a [`TraceSink`] trait with one method per effect
//! event. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use alloc::boxed::Box;

use crate::mesh::Rgb;
use crate::style::ElementId;
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// What moved a scroll container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollSource {
    /// Wheel redirected to horizontal scroll.
    Wheel,
    /// Arrow-key paging.
    Key,
}

/// Emitted when the scroll driver moves the scroll container.
#[derive(Clone, Copy, Debug)]
pub struct ScrollEvent {
    /// Input that caused the move.
    pub source: ScrollSource,
    /// New offset in CSS pixels.
    pub offset: f64,
}

/// Emitted after a throttled parallax recompute.
#[derive(Clone, Copy, Debug)]
pub struct ParallaxEvent {
    /// Count of recomputes so far, starting at 1.
    pub pass_index: u64,
    /// Style writes emitted.
    pub written: u32,
    /// Layered items skipped.
    pub skipped: u32,
}

/// Emitted when an element is revealed.
#[derive(Clone, Copy, Debug)]
pub struct RevealEvent {
    /// Revealed element.
    pub element: ElementId,
    /// Number of staggered children.
    pub children: u32,
    /// `true` if revealed by the no-observer fallback.
    pub degraded: bool,
}

/// Emitted when a pointer drag rotates the mesh.
#[derive(Clone, Copy, Debug)]
pub struct DragEvent {
    /// Horizontal pointer delta in CSS pixels.
    pub delta_x: f64,
    /// Mesh yaw after the drag step, in radians.
    pub yaw: f64,
}

/// Emitted when the mesh colour changes.
#[derive(Clone, Copy, Debug)]
pub struct ColorEvent {
    /// New surface colour.
    pub color: Rgb,
}

/// Emitted once per mesh redraw.
#[derive(Clone, Copy, Debug)]
pub struct MeshFrameEvent {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Pitch in radians.
    pub rotation_x: f64,
    /// Yaw in radians.
    pub rotation_y: f64,
}

/// Emitted when the contact form is submitted.
#[derive(Clone, Copy, Debug)]
pub struct FormEvent {
    /// Submit time.
    pub at: HostTime,
    /// Whether every constraint held.
    pub valid: bool,
}

/// Emitted when the form status auto-hides.
#[derive(Clone, Copy, Debug)]
pub struct StatusClearedEvent {
    /// Hide time.
    pub at: HostTime,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from page effects.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when the scroll driver moves the scroll container.
    fn on_scroll(&mut self, e: &ScrollEvent) {
        _ = e;
    }

    /// Called after each parallax recompute.
    fn on_parallax(&mut self, e: &ParallaxEvent) {
        _ = e;
    }

    /// Called when an element is revealed.
    fn on_reveal(&mut self, e: &RevealEvent) {
        _ = e;
    }

    /// Called on each drag step.
    fn on_drag(&mut self, e: &DragEvent) {
        _ = e;
    }

    /// Called when the mesh colour changes.
    fn on_color(&mut self, e: &ColorEvent) {
        _ = e;
    }

    /// Called once per mesh redraw.
    fn on_mesh_frame(&mut self, e: &MeshFrameEvent) {
        _ = e;
    }

    /// Called on form submit.
    fn on_form(&mut self, e: &FormEvent) {
        _ = e;
    }

    /// Called when the form status hides.
    fn on_status_cleared(&mut self, e: &StatusClearedEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

/// Generates a `Tracer` method that forwards one event to the sink.
macro_rules! forward {
    ($(#[$doc:meta])* $name:ident, $sink_method:ident, $event:ty) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, e: &$event) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$sink_method(e);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = e;
            }
        }
    };
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    forward!(
        /// Emits a [`ScrollEvent`].
        scroll, on_scroll, ScrollEvent
    );
    forward!(
        /// Emits a [`ParallaxEvent`].
        parallax, on_parallax, ParallaxEvent
    );
    forward!(
        /// Emits a [`RevealEvent`].
        reveal, on_reveal, RevealEvent
    );
    forward!(
        /// Emits a [`DragEvent`].
        drag, on_drag, DragEvent
    );
    forward!(
        /// Emits a [`ColorEvent`].
        color, on_color, ColorEvent
    );
    forward!(
        /// Emits a [`MeshFrameEvent`].
        mesh_frame, on_mesh_frame, MeshFrameEvent
    );
    forward!(
        /// Emits a [`FormEvent`].
        form, on_form, FormEvent
    );
    forward!(
        /// Emits a [`StatusClearedEvent`].
        status_cleared, on_status_cleared, StatusClearedEvent
    );
}

/// Borrows an owned sink slot as a [`Tracer`].
///
/// Components keep their sink as `Option<Box<dyn TraceSink>>` and build a
/// short-lived tracer per call.
#[inline]
#[must_use]
pub fn tracer_for(sink: &mut Option<Box<dyn TraceSink>>) -> Tracer<'_> {
    match sink {
        Some(s) => Tracer::new(&mut **s),
        None => Tracer::none(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_scroll(&ScrollEvent {
            source: ScrollSource::Wheel,
            offset: 10.0,
        });
        sink.on_form(&FormEvent {
            at: HostTime(0),
            valid: true,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.reveal(&RevealEvent {
            element: ElementId(0),
            children: 0,
            degraded: false,
        });
        tracer.status_cleared(&StatusClearedEvent { at: HostTime(5) });
    }

    #[test]
    fn tracer_for_empty_slot() {
        let mut slot: Option<Box<dyn TraceSink>> = None;
        let mut tracer = tracer_for(&mut slot);
        tracer.drag(&DragEvent {
            delta_x: 1.0,
            yaw: 0.005,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            reveals: Vec<ElementId>,
        }
        impl TraceSink for RecordingSink {
            fn on_reveal(&mut self, e: &RevealEvent) {
                self.reveals.push(e.element);
            }
        }

        let mut sink = RecordingSink {
            reveals: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.reveal(&RevealEvent {
            element: ElementId(3),
            children: 2,
            degraded: false,
        });
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.reveals, &[ElementId(3)]);
    }
}
