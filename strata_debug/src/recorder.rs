// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`]. A truncated trailing record ends the
//! iteration.

use strata_core::mesh::Rgb;
use strata_core::style::ElementId;
use strata_core::time::HostTime;
use strata_core::trace::{
    ColorEvent, DragEvent, FormEvent, MeshFrameEvent, ParallaxEvent, RevealEvent, ScrollEvent,
    ScrollSource, StatusClearedEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_SCROLL: u8 = 1;
const TAG_PARALLAX: u8 = 2;
const TAG_REVEAL: u8 = 3;
const TAG_DRAG: u8 = 4;
const TAG_COLOR: u8 = 5;
const TAG_MESH_FRAME: u8 = 6;
const TAG_FORM: u8 = 7;
const TAG_STATUS_CLEARED: u8 = 8;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }
}

impl TraceSink for RecorderSink {
    fn on_scroll(&mut self, e: &ScrollEvent) {
        self.write_u8(TAG_SCROLL);
        self.write_u8(match e.source {
            ScrollSource::Wheel => 0,
            ScrollSource::Key => 1,
        });
        self.write_f64(e.offset);
    }

    fn on_parallax(&mut self, e: &ParallaxEvent) {
        self.write_u8(TAG_PARALLAX);
        self.write_u64(e.pass_index);
        self.write_u32(e.written);
        self.write_u32(e.skipped);
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        self.write_u8(TAG_REVEAL);
        self.write_u32(e.element.0);
        self.write_u32(e.children);
        self.write_bool(e.degraded);
    }

    fn on_drag(&mut self, e: &DragEvent) {
        self.write_u8(TAG_DRAG);
        self.write_f64(e.delta_x);
        self.write_f64(e.yaw);
    }

    fn on_color(&mut self, e: &ColorEvent) {
        self.write_u8(TAG_COLOR);
        self.write_u32(e.color.to_u32());
    }

    fn on_mesh_frame(&mut self, e: &MeshFrameEvent) {
        self.write_u8(TAG_MESH_FRAME);
        self.write_u64(e.frame_index);
        self.write_f64(e.rotation_x);
        self.write_f64(e.rotation_y);
    }

    fn on_form(&mut self, e: &FormEvent) {
        self.write_u8(TAG_FORM);
        self.write_u64(e.at.ticks());
        self.write_bool(e.valid);
    }

    fn on_status_cleared(&mut self, e: &StatusClearedEvent) {
        self.write_u8(TAG_STATUS_CLEARED);
        self.write_u64(e.at.ticks());
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A [`ScrollEvent`].
    Scroll(ScrollEvent),
    /// A [`ParallaxEvent`].
    Parallax(ParallaxEvent),
    /// A [`RevealEvent`].
    Reveal(RevealEvent),
    /// A [`DragEvent`].
    Drag(DragEvent),
    /// A [`ColorEvent`].
    Color(ColorEvent),
    /// A [`MeshFrameEvent`].
    MeshFrame(MeshFrameEvent),
    /// A [`FormEvent`].
    Form(FormEvent),
    /// A [`StatusClearedEvent`].
    StatusCleared(StatusClearedEvent),
}

impl RecordedEvent {
    /// Short event name, as used by the exporters.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scroll(_) => "Scroll",
            Self::Parallax(_) => "Parallax",
            Self::Reveal(_) => "Reveal",
            Self::Drag(_) => "Drag",
            Self::Color(_) => "Color",
            Self::MeshFrame(_) => "MeshFrame",
            Self::Form(_) => "Form",
            Self::StatusCleared(_) => "StatusCleared",
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let end = self.pos.checked_add(N)?;
        let bytes = self.data.get(self.pos..end)?.try_into().ok()?;
        self.pos = end;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.take().map(f64::from_le_bytes)
    }

    fn read_bool(&mut self) -> Option<bool> {
        self.read_u8().map(|v| v != 0)
    }

    fn decode_scroll(&mut self) -> Option<RecordedEvent> {
        let source = match self.read_u8()? {
            0 => ScrollSource::Wheel,
            _ => ScrollSource::Key,
        };
        Some(RecordedEvent::Scroll(ScrollEvent {
            source,
            offset: self.read_f64()?,
        }))
    }

    fn decode_parallax(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Parallax(ParallaxEvent {
            pass_index: self.read_u64()?,
            written: self.read_u32()?,
            skipped: self.read_u32()?,
        }))
    }

    fn decode_reveal(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Reveal(RevealEvent {
            element: ElementId(self.read_u32()?),
            children: self.read_u32()?,
            degraded: self.read_bool()?,
        }))
    }

    fn decode_drag(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Drag(DragEvent {
            delta_x: self.read_f64()?,
            yaw: self.read_f64()?,
        }))
    }

    fn decode_color(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Color(ColorEvent {
            color: Rgb::from_u32(self.read_u32()?),
        }))
    }

    fn decode_mesh_frame(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::MeshFrame(MeshFrameEvent {
            frame_index: self.read_u64()?,
            rotation_x: self.read_f64()?,
            rotation_y: self.read_f64()?,
        }))
    }

    fn decode_form(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Form(FormEvent {
            at: HostTime(self.read_u64()?),
            valid: self.read_bool()?,
        }))
    }

    fn decode_status_cleared(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::StatusCleared(StatusClearedEvent {
            at: HostTime(self.read_u64()?),
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_SCROLL => self.decode_scroll(),
            TAG_PARALLAX => self.decode_parallax(),
            TAG_REVEAL => self.decode_reveal(),
            TAG_DRAG => self.decode_drag(),
            TAG_COLOR => self.decode_color(),
            TAG_MESH_FRAME => self.decode_mesh_frame(),
            TAG_FORM => self.decode_form(),
            TAG_STATUS_CLEARED => self.decode_status_cleared(),
            // Unknown tag: the rest of the buffer cannot be framed.
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::form::{ConstraintForm, FormConfig, FormController};
    use strata_core::time::Duration;

    /// Forwards to a shared recorder so a test can read it after handing a
    /// boxed sink to a component.
    struct Shared(std::rc::Rc<std::cell::RefCell<RecorderSink>>);

    impl TraceSink for Shared {
        fn on_form(&mut self, e: &FormEvent) {
            self.0.borrow_mut().on_form(e);
        }

        fn on_status_cleared(&mut self, e: &StatusClearedEvent) {
            self.0.borrow_mut().on_status_cleared(e);
        }
    }

    #[test]
    fn records_decode_in_order() {
        let mut rec = RecorderSink::new();
        rec.on_scroll(&ScrollEvent {
            source: ScrollSource::Key,
            offset: 800.0,
        });
        rec.on_reveal(&RevealEvent {
            element: ElementId(4),
            children: 2,
            degraded: false,
        });
        rec.on_color(&ColorEvent {
            color: Rgb::from_u32(0x12_34_56),
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 3);
        match events[0] {
            RecordedEvent::Scroll(e) => {
                assert_eq!(e.source, ScrollSource::Key);
                assert_eq!(e.offset, 800.0);
            }
            other => panic!("expected Scroll, got {other:?}"),
        }
        match events[1] {
            RecordedEvent::Reveal(e) => {
                assert_eq!(e.element, ElementId(4));
                assert_eq!(e.children, 2);
                assert!(!e.degraded);
            }
            other => panic!("expected Reveal, got {other:?}"),
        }
        match events[2] {
            RecordedEvent::Color(e) => assert_eq!(e.color.to_u32(), 0x12_34_56),
            other => panic!("expected Color, got {other:?}"),
        }
    }

    #[test]
    fn truncated_record_ends_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_parallax(&ParallaxEvent {
            pass_index: 1,
            written: 3,
            skipped: 0,
        });
        rec.on_drag(&DragEvent {
            delta_x: 10.0,
            yaw: 0.05,
        });
        let bytes = rec.into_bytes();
        let cut = &bytes[..bytes.len() - 3];
        let events: Vec<_> = decode(cut).collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name(), "Parallax");
    }

    #[test]
    fn unknown_tag_stops() {
        assert_eq!(decode(&[0xFF, 1, 2, 3]).count(), 0);
        assert_eq!(decode(&[]).count(), 0);
    }

    #[test]
    fn records_form_controller_events() {
        let rec = std::rc::Rc::new(std::cell::RefCell::new(RecorderSink::new()));
        let mut controller = FormController::new(FormConfig::contact());
        controller.set_trace_sink(Box::new(Shared(std::rc::Rc::clone(&rec))));

        let mut form = ConstraintForm::contact();
        let start = HostTime::from_millis(1_000);
        let (_, ticket) = controller.submit(&mut form, start);
        assert!(controller.expire(&mut form, ticket, start + Duration::from_millis(2_000)));

        let events: Vec<_> = decode(rec.borrow().as_bytes()).collect();
        assert_eq!(events.len(), 2);
        match events[0] {
            RecordedEvent::Form(e) => {
                assert_eq!(e.at, start);
                assert!(!e.valid);
            }
            other => panic!("expected Form, got {other:?}"),
        }
        match events[1] {
            RecordedEvent::StatusCleared(e) => {
                assert_eq!(e.at, HostTime::from_millis(3_000));
            }
            other => panic!("expected StatusCleared, got {other:?}"),
        }
    }
}
