// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export of recorded events.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes a JSON array with one object per event:
//!
//! ```json
//! { "seq": 0, "name": "Scroll", "args": { "source": "Wheel", "offset": 120.0 } }
//! ```
//!
//! `seq` is the position in the recording. Events that carry a host time
//! also get an `at_ms` field.

use std::io::{self, Write};

use serde_json::{Value, json};

use strata_core::time::HostTime;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as a JSON array.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = decode(bytes)
        .enumerate()
        .map(|(seq, recorded)| event_json(seq, &recorded))
        .collect();
    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn event_json(seq: usize, recorded: &RecordedEvent) -> Value {
    let mut value = json!({
        "seq": seq,
        "name": recorded.name(),
    });
    let args = match *recorded {
        RecordedEvent::Scroll(e) => json!({
            "source": format!("{:?}", e.source),
            "offset": e.offset,
        }),
        RecordedEvent::Parallax(e) => json!({
            "pass_index": e.pass_index,
            "written": e.written,
            "skipped": e.skipped,
        }),
        RecordedEvent::Reveal(e) => json!({
            "element": e.element.0,
            "children": e.children,
            "degraded": e.degraded,
        }),
        RecordedEvent::Drag(e) => json!({
            "delta_x": e.delta_x,
            "yaw": e.yaw,
        }),
        RecordedEvent::Color(e) => json!({
            "color": e.color.to_string(),
        }),
        RecordedEvent::MeshFrame(e) => json!({
            "frame_index": e.frame_index,
            "rotation_x": e.rotation_x,
            "rotation_y": e.rotation_y,
        }),
        RecordedEvent::Form(e) => {
            value["at_ms"] = json!(ms(e.at));
            json!({ "valid": e.valid })
        }
        RecordedEvent::StatusCleared(e) => {
            value["at_ms"] = json!(ms(e.at));
            json!({})
        }
    };
    value["args"] = args;
    value
}

fn ms(t: HostTime) -> f64 {
    t.ticks() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use strata_core::event::{EventOutcome, PageEvent};
    use strata_core::markup::MarkupConfig;
    use strata_core::page::PageEffects;
    use strata_core::parallax::ParallaxSet;
    use strata_core::reveal::{RevealConfig, RevealTracker};
    use strata_core::scroll::{ScrollConfig, ScrollDriver};
    use strata_core::style::{ElementId, StyleApplier, StyleChanges};
    use strata_core::trace::{FormEvent, ScrollEvent, ScrollSource, TraceSink};
    use strata_core::viewport::ScrollAxis;

    fn parse(bytes: &[u8]) -> Vec<Value> {
        let mut out = Vec::new();
        export(bytes, &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_scroll(&ScrollEvent {
            source: ScrollSource::Wheel,
            offset: 120.0,
        });
        rec.on_form(&FormEvent {
            at: HostTime::from_millis(250),
            valid: false,
        });

        let parsed = parse(rec.as_bytes());
        assert_eq!(parsed.len(), 2);

        assert_eq!(parsed[0]["seq"], 0);
        assert_eq!(parsed[0]["name"], "Scroll");
        assert_eq!(parsed[0]["args"]["source"], "Wheel");
        assert_eq!(parsed[0]["args"]["offset"], 120.0);

        assert_eq!(parsed[1]["name"], "Form");
        assert_eq!(parsed[1]["at_ms"], 250.0);
        assert_eq!(parsed[1]["args"]["valid"], false);
    }

    #[test]
    fn export_empty_recording() {
        assert!(parse(&[]).is_empty());
    }

    /// Copies every recorded byte into a shared buffer.
    struct Tee(std::rc::Rc<std::cell::RefCell<RecorderSink>>);

    impl TraceSink for Tee {
        fn on_scroll(&mut self, e: &ScrollEvent) {
            self.0.borrow_mut().on_scroll(e);
        }

        fn on_reveal(&mut self, e: &strata_core::trace::RevealEvent) {
            self.0.borrow_mut().on_reveal(e);
        }
    }

    struct Discard;

    impl StyleApplier for Discard {
        fn apply(&mut self, _changes: &StyleChanges) {}
    }

    #[test]
    fn page_session_exports() {
        let rec = std::rc::Rc::new(std::cell::RefCell::new(RecorderSink::new()));
        let mut reveal = RevealTracker::new(RevealConfig::panels());
        reveal.observe(ElementId(1), vec![]);
        let mut page = PageEffects::new(
            MarkupConfig::standard(),
            ScrollConfig::horizontal(),
            ParallaxSet::new(ScrollAxis::Horizontal),
            reveal,
        );
        page.set_scroller(ElementId(0), ScrollDriver::new(1000.0));
        page.set_trace_sink(Box::new(Tee(std::rc::Rc::clone(&rec))));

        let outcome = page.handle(&PageEvent::Wheel { delta_y: 40.0 }, &mut Discard);
        assert_eq!(outcome, EventOutcome::PREVENT_DEFAULT);
        assert_eq!(page.reveal_all(&mut Discard), 1);

        let parsed = parse(rec.borrow().as_bytes());
        let names: Vec<&str> = parsed.iter().filter_map(|v| v["name"].as_str()).collect();
        assert_eq!(names, ["Scroll", "Reveal"]);
        assert_eq!(parsed[1]["args"]["degraded"], true);
    }
}
