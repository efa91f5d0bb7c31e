// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Host times
//! are printed in milliseconds.

use std::io::Write;

use strata_core::time::HostTime;
use strata_core::trace::{
    ColorEvent, DragEvent, FormEvent, MeshFrameEvent, ParallaxEvent, RevealEvent, ScrollEvent,
    ScrollSource, StatusClearedEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.ticks() as f64 / 1000.0
}

fn source_name(source: ScrollSource) -> &'static str {
    match source {
        ScrollSource::Wheel => "wheel",
        ScrollSource::Key => "key",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_scroll(&mut self, e: &ScrollEvent) {
        let _ = writeln!(
            self.writer,
            "[scroll] source={} offset={:.1}px",
            source_name(e.source),
            e.offset,
        );
    }

    fn on_parallax(&mut self, e: &ParallaxEvent) {
        let _ = writeln!(
            self.writer,
            "[parallax] pass={} written={} skipped={}",
            e.pass_index, e.written, e.skipped,
        );
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        let _ = writeln!(
            self.writer,
            "[reveal] element={} children={}{}",
            e.element.0,
            e.children,
            if e.degraded { " (fallback)" } else { "" },
        );
    }

    fn on_drag(&mut self, e: &DragEvent) {
        let _ = writeln!(
            self.writer,
            "[drag] dx={:.1}px yaw={:.3}rad",
            e.delta_x, e.yaw,
        );
    }

    fn on_color(&mut self, e: &ColorEvent) {
        let _ = writeln!(self.writer, "[color] {}", e.color);
    }

    fn on_mesh_frame(&mut self, e: &MeshFrameEvent) {
        let _ = writeln!(
            self.writer,
            "[mesh] frame={} x={:.3} y={:.3}",
            e.frame_index, e.rotation_x, e.rotation_y,
        );
    }

    fn on_form(&mut self, e: &FormEvent) {
        let _ = writeln!(
            self.writer,
            "[form] at={:.1}ms {}",
            ms(e.at),
            if e.valid { "valid" } else { "invalid" },
        );
    }

    fn on_status_cleared(&mut self, e: &StatusClearedEvent) {
        let _ = writeln!(self.writer, "[status] cleared at={:.1}ms", ms(e.at));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::mesh::Rgb;
    use strata_core::style::ElementId;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn one_line_per_event() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        sink.on_scroll(&ScrollEvent {
            source: ScrollSource::Wheel,
            offset: 120.0,
        });
        sink.on_reveal(&RevealEvent {
            element: ElementId(3),
            children: 2,
            degraded: true,
        });
        sink.on_color(&ColorEvent {
            color: Rgb::from_u32(0x8F_BC_8F),
        });
        sink.on_form(&FormEvent {
            at: HostTime::from_millis(1_500),
            valid: true,
        });

        let text = output(sink);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "[scroll] source=wheel offset=120.0px",
                "[reveal] element=3 children=2 (fallback)",
                "[color] #8fbc8f",
                "[form] at=1500.0ms valid",
            ]
        );
    }

    #[test]
    fn parallax_and_status_lines() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        sink.on_parallax(&ParallaxEvent {
            pass_index: 4,
            written: 6,
            skipped: 1,
        });
        sink.on_status_cleared(&StatusClearedEvent {
            at: HostTime::from_millis(3_500),
        });
        let text = output(sink);
        assert!(text.starts_with("[parallax] pass=4 written=6 skipped=1\n"));
        assert!(text.ends_with("[status] cleared at=3500.0ms\n"));
    }
}
