// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-driven effects of one page.
//!
//! [`PageEffects`] owns the scroll driver, the parallax set, the reveal
//! tracker and the frame throttle. An event source feeds it [`PageEvent`]s
//! through [`handle`](PageEffects::handle) and honours the returned
//! [`EventOutcome`]: when a frame is requested it calls
//! [`flush_frame`](PageEffects::flush_frame) from the next frame callback.
//!
//! Scroll and resize only ever request a frame; the parallax recompute runs
//! at most once per frame no matter how many events arrive in between.
//! Wheel, arrow-key and intersection events are applied immediately since
//! each is already a discrete step.

use alloc::boxed::Box;
use core::fmt;

use crate::event::{EventOutcome, PageEvent};
use crate::markup::MarkupConfig;
use crate::parallax::{ParallaxPass, ParallaxSet};
use crate::reveal::RevealTracker;
use crate::scroll::{ScrollConfig, ScrollDriver};
use crate::style::{ElementId, StyleApplier, StyleChanges};
use crate::throttle::FrameThrottle;
use crate::trace::{ParallaxEvent, RevealEvent, ScrollEvent, ScrollSource, TraceSink, tracer_for};
use crate::viewport::{ScrollAxis, ViewportMetrics};

/// Scroll, parallax and reveal state of a page.
pub struct PageEffects {
    markup: MarkupConfig,
    scroll: ScrollConfig,
    scroller: Option<(ElementId, ScrollDriver)>,
    parallax: ParallaxSet,
    reveal: RevealTracker,
    throttle: FrameThrottle,
    changes: StyleChanges,
    sink: Option<Box<dyn TraceSink>>,
}

impl fmt::Debug for PageEffects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageEffects")
            .field("scroll", &self.scroll)
            .field("scroller", &self.scroller)
            .field("throttle", &self.throttle)
            .finish_non_exhaustive()
    }
}

impl PageEffects {
    /// Creates the effects for a scanned page.
    #[must_use]
    pub fn new(
        markup: MarkupConfig,
        scroll: ScrollConfig,
        parallax: ParallaxSet,
        reveal: RevealTracker,
    ) -> Self {
        Self {
            markup,
            scroll,
            scroller: None,
            parallax,
            reveal,
            throttle: FrameThrottle::new(),
            changes: StyleChanges::new(),
            sink: None,
        }
    }

    /// Attaches the horizontal scroll container.
    pub fn set_scroller(&mut self, element: ElementId, driver: ScrollDriver) {
        self.scroller = Some((element, driver));
    }

    /// Routes trace events to `sink`.
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.sink = Some(sink);
    }

    /// Reveal tracker.
    #[must_use]
    pub const fn reveal(&self) -> &RevealTracker {
        &self.reveal
    }

    /// Current offset of the scroll container, if one is attached.
    #[must_use]
    pub fn scroller_offset(&self) -> Option<f64> {
        self.scroller.as_ref().map(|(_, d)| d.offset())
    }

    /// Returns `true` while a frame is requested but has not run.
    #[must_use]
    pub const fn frame_pending(&self) -> bool {
        self.throttle.is_pending()
    }

    /// Handles one event.
    pub fn handle(
        &mut self,
        event: &PageEvent<'_>,
        applier: &mut dyn StyleApplier,
    ) -> EventOutcome {
        match *event {
            PageEvent::Scroll => self.request_frame(),
            PageEvent::Resize { size } => {
                if let Some((_, driver)) = &mut self.scroller {
                    driver.set_page_width(size.width);
                }
                self.request_frame()
            }
            PageEvent::Wheel { delta_y } => {
                if !self.scroll.wheel_to_horizontal {
                    return EventOutcome::IGNORED;
                }
                let Some((element, driver)) = &mut self.scroller else {
                    return EventOutcome::IGNORED;
                };
                let offset = driver.wheel(delta_y);
                let element = *element;
                self.write_scroll(element, offset, ScrollSource::Wheel, applier);
                EventOutcome::PREVENT_DEFAULT
            }
            PageEvent::KeyDown(key) => {
                if !self.scroll.keyboard_paging {
                    return EventOutcome::IGNORED;
                }
                let Some((element, driver)) = &mut self.scroller else {
                    return EventOutcome::IGNORED;
                };
                if let Some(offset) = driver.key(key) {
                    let element = *element;
                    self.write_scroll(element, offset, ScrollSource::Key, applier);
                }
                EventOutcome::IGNORED
            }
            PageEvent::Intersection {
                element,
                ratio,
                is_intersecting,
            } => {
                if let Some(plan) = self.reveal.on_intersection(element, ratio, is_intersecting) {
                    self.changes.clear();
                    plan.write_into(self.markup.visible_class, &mut self.changes);
                    applier.apply(&self.changes);
                    #[expect(
                        clippy::cast_possible_truncation,
                        reason = "child counts come from markup and are small"
                    )]
                    let children = plan.children.len() as u32;
                    tracer_for(&mut self.sink).reveal(&RevealEvent {
                        element,
                        children,
                        degraded: false,
                    });
                }
                EventOutcome::IGNORED
            }
            PageEvent::PointerDown { .. }
            | PageEvent::PointerMove { .. }
            | PageEvent::PointerUp
            | PageEvent::ColorInput(_)
            | PageEvent::Submit { .. } => EventOutcome::IGNORED,
        }
    }

    /// Runs the throttled parallax recompute if a frame was requested.
    ///
    /// Returns `None` if nothing was pending.
    pub fn flush_frame(
        &mut self,
        metrics: &dyn ViewportMetrics,
        applier: &mut dyn StyleApplier,
    ) -> Option<ParallaxPass> {
        let Self {
            throttle,
            parallax,
            scroller,
            changes,
            sink,
            ..
        } = self;

        let pass = throttle.run(|| {
            if let Some((_, driver)) = scroller {
                driver.set_max_offset(metrics.scroll_extent().map(|e| e.x));
                driver.sync(metrics.viewport().scroll_along(ScrollAxis::Horizontal));
            }
            changes.clear();
            let pass = parallax.update(metrics, changes);
            if !changes.is_empty() {
                applier.apply(changes);
            }
            pass
        })?;

        tracer_for(sink).parallax(&ParallaxEvent {
            pass_index: throttle.runs(),
            written: pass.written,
            skipped: pass.skipped,
        });
        Some(pass)
    }

    /// Requests and immediately runs a recompute, for the initial layout.
    pub fn refresh(
        &mut self,
        metrics: &dyn ViewportMetrics,
        applier: &mut dyn StyleApplier,
    ) -> ParallaxPass {
        let _ = self.throttle.request();
        self.flush_frame(metrics, applier).unwrap_or_default()
    }

    /// Reveals every pending element at once. Used when the page has no
    /// intersection capability. Returns the number of elements revealed.
    pub fn reveal_all(&mut self, applier: &mut dyn StyleApplier) -> usize {
        let plans = self.reveal.reveal_all();
        self.changes.clear();
        for plan in &plans {
            plan.write_into(self.markup.visible_class, &mut self.changes);
        }
        if !self.changes.is_empty() {
            applier.apply(&self.changes);
        }
        let mut tracer = tracer_for(&mut self.sink);
        for plan in &plans {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "child counts come from markup and are small"
            )]
            let children = plan.children.len() as u32;
            tracer.reveal(&RevealEvent {
                element: plan.element,
                children,
                degraded: true,
            });
        }
        plans.len()
    }

    fn request_frame(&mut self) -> EventOutcome {
        if self.throttle.request() {
            EventOutcome::REQUEST_FRAME
        } else {
            EventOutcome::IGNORED
        }
    }

    fn write_scroll(
        &mut self,
        element: ElementId,
        offset: f64,
        source: ScrollSource,
        applier: &mut dyn StyleApplier,
    ) {
        self.changes.clear();
        self.changes.scroll_left(element, offset);
        applier.apply(&self.changes);
        tracer_for(&mut self.sink).scroll(&ScrollEvent { source, offset });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Key;
    use crate::parallax::{Layer, LayerDepth, LayerRole, LayeredItem};
    use crate::reveal::RevealConfig;
    use crate::style::{CssTransform, StyleWrite};
    use crate::time::Duration;
    use crate::viewport::ViewportState;
    use alloc::vec;
    use alloc::vec::Vec;
    use kurbo::{Rect, Size, Vec2};

    struct Page {
        viewport: ViewportState,
        boxes: Vec<Option<Rect>>,
        extent: Option<Vec2>,
    }

    impl ViewportMetrics for Page {
        fn viewport(&self) -> ViewportState {
            self.viewport
        }

        fn bounding_box(&self, element: ElementId) -> Option<Rect> {
            self.boxes.get(element.index()).copied().flatten()
        }

        fn scroll_extent(&self) -> Option<Vec2> {
            self.extent
        }
    }

    #[derive(Default)]
    struct Recorder {
        batches: Vec<Vec<StyleWrite>>,
    }

    impl StyleApplier for Recorder {
        fn apply(&mut self, changes: &StyleChanges) {
            self.batches.push(changes.writes.clone());
        }
    }

    impl Recorder {
        fn last(&self) -> &[StyleWrite] {
            self.batches.last().map(Vec::as_slice).unwrap_or(&[])
        }
    }

    const SCROLLER: ElementId = ElementId(0);

    /// Horizontal page: scroller 0, speed layers 1 and 2, panels 3 and 4.
    fn horizontal_page() -> (PageEffects, Page) {
        let mut parallax = ParallaxSet::new(ScrollAxis::Horizontal);
        parallax.add_speed(ElementId(1), 0.5);
        parallax.add_speed(ElementId(2), 0.2);
        let mut reveal = RevealTracker::new(RevealConfig::panels());
        reveal.observe(ElementId(3), vec![]);
        reveal.observe(ElementId(4), vec![]);

        let mut effects = PageEffects::new(
            MarkupConfig::standard(),
            ScrollConfig::horizontal(),
            parallax,
            reveal,
        );
        effects.set_scroller(SCROLLER, ScrollDriver::new(800.0));

        let page = Page {
            viewport: ViewportState::new(Vec2::ZERO, Size::new(800.0, 600.0)),
            boxes: vec![None; 5],
            extent: Some(Vec2::new(3200.0, 0.0)),
        };
        (effects, page)
    }

    #[test]
    fn scroll_burst_recomputes_once_per_frame() {
        let (mut effects, mut page) = horizontal_page();
        let mut applier = Recorder::default();

        assert_eq!(
            effects.handle(&PageEvent::Scroll, &mut applier),
            EventOutcome::REQUEST_FRAME
        );
        assert_eq!(effects.handle(&PageEvent::Scroll, &mut applier), EventOutcome::IGNORED);
        assert_eq!(effects.handle(&PageEvent::Scroll, &mut applier), EventOutcome::IGNORED);
        assert!(effects.frame_pending());
        assert!(applier.batches.is_empty());

        page.viewport.scroll.x = 400.0;
        let pass = effects.flush_frame(&page, &mut applier).unwrap();
        assert_eq!(pass.written, 2);
        assert_eq!(applier.batches.len(), 1);
        assert_eq!(
            applier.last(),
            [
                StyleWrite::Transform {
                    element: ElementId(1),
                    transform: CssTransform::TranslateX(-200.0),
                },
                StyleWrite::Transform {
                    element: ElementId(2),
                    transform: CssTransform::TranslateX(-80.0),
                },
            ]
        );

        // A second flush without a new request does nothing.
        assert_eq!(effects.flush_frame(&page, &mut applier), None);
        assert_eq!(
            effects.handle(&PageEvent::Scroll, &mut applier),
            EventOutcome::REQUEST_FRAME
        );
    }

    #[test]
    fn wheel_scrolls_container_and_prevents_default() {
        let (mut effects, page) = horizontal_page();
        let mut applier = Recorder::default();
        let _ = effects.refresh(&page, &mut applier);

        let outcome = effects.handle(&PageEvent::Wheel { delta_y: 120.0 }, &mut applier);
        assert_eq!(outcome, EventOutcome::PREVENT_DEFAULT);
        assert_eq!(
            applier.last(),
            [StyleWrite::ScrollLeft {
                element: SCROLLER,
                offset: 120.0,
            }]
        );
        assert_eq!(effects.scroller_offset(), Some(120.0));
    }

    #[test]
    fn arrow_keys_page_by_viewport_width() {
        let (mut effects, page) = horizontal_page();
        let mut applier = Recorder::default();
        let _ = effects.refresh(&page, &mut applier);

        let _ = effects.handle(&PageEvent::KeyDown(Key::ArrowRight), &mut applier);
        let _ = effects.handle(&PageEvent::KeyDown(Key::ArrowRight), &mut applier);
        let _ = effects.handle(&PageEvent::KeyDown(Key::ArrowLeft), &mut applier);
        assert_eq!(effects.scroller_offset(), Some(800.0));

        let before = applier.batches.len();
        let _ = effects.handle(&PageEvent::KeyDown(Key::Other), &mut applier);
        assert_eq!(applier.batches.len(), before);

        // Resize changes the page step.
        let _ = effects.handle(
            &PageEvent::Resize {
                size: Size::new(500.0, 600.0),
            },
            &mut applier,
        );
        let _ = effects.handle(&PageEvent::KeyDown(Key::ArrowRight), &mut applier);
        assert_eq!(effects.scroller_offset(), Some(1300.0));
    }

    #[test]
    fn scroll_extent_clamps_wheel() {
        let (mut effects, page) = horizontal_page();
        let mut applier = Recorder::default();
        let _ = effects.refresh(&page, &mut applier);
        let _ = effects.handle(&PageEvent::Wheel { delta_y: 10_000.0 }, &mut applier);
        assert_eq!(effects.scroller_offset(), Some(3200.0));
    }

    #[test]
    fn browser_scroll_resyncs_driver() {
        let (mut effects, mut page) = horizontal_page();
        let mut applier = Recorder::default();
        page.viewport.scroll.x = 640.0;
        let _ = effects.handle(&PageEvent::Scroll, &mut applier);
        let _ = effects.flush_frame(&page, &mut applier);
        assert_eq!(effects.scroller_offset(), Some(640.0));
        let _ = effects.handle(&PageEvent::Wheel { delta_y: 10.0 }, &mut applier);
        assert_eq!(effects.scroller_offset(), Some(650.0));
    }

    #[test]
    fn vertical_page_ignores_wheel_and_keys() {
        let mut effects = PageEffects::new(
            MarkupConfig::standard(),
            ScrollConfig::vertical(),
            ParallaxSet::new(ScrollAxis::Vertical),
            RevealTracker::new(RevealConfig::sections()),
        );
        let mut applier = Recorder::default();
        assert_eq!(
            effects.handle(&PageEvent::Wheel { delta_y: 50.0 }, &mut applier),
            EventOutcome::IGNORED
        );
        assert_eq!(
            effects.handle(&PageEvent::KeyDown(Key::ArrowRight), &mut applier),
            EventOutcome::IGNORED
        );
        assert!(applier.batches.is_empty());
        assert_eq!(effects.scroller_offset(), None);
    }

    #[test]
    fn intersection_reveals_once() {
        let (mut effects, _) = horizontal_page();
        let mut applier = Recorder::default();

        let enter = PageEvent::Intersection {
            element: ElementId(3),
            ratio: 0.5,
            is_intersecting: true,
        };
        let _ = effects.handle(&enter, &mut applier);
        assert_eq!(
            applier.last(),
            [StyleWrite::AddClass {
                element: ElementId(3),
                class: "visible",
                delay: Duration::ZERO,
            }]
        );

        let leave = PageEvent::Intersection {
            element: ElementId(3),
            ratio: 0.0,
            is_intersecting: false,
        };
        let _ = effects.handle(&leave, &mut applier);
        let _ = effects.handle(&enter, &mut applier);
        assert_eq!(applier.batches.len(), 1);
        assert!(!effects.reveal().is_observing(ElementId(3)));
        assert!(effects.reveal().is_observing(ElementId(4)));
    }

    #[test]
    fn degraded_reveal_shows_everything() {
        let (mut effects, _) = horizontal_page();
        let mut applier = Recorder::default();
        assert_eq!(effects.reveal_all(&mut applier), 2);
        assert_eq!(applier.last().len(), 2);
        assert_eq!(effects.reveal_all(&mut applier), 0);
        assert_eq!(applier.batches.len(), 1);
    }

    #[test]
    fn layered_vertical_page_end_to_end() {
        let mut parallax = ParallaxSet::new(ScrollAxis::Vertical);
        parallax.add_layered(LayeredItem {
            element: ElementId(0),
            layers: vec![
                Layer {
                    element: ElementId(1),
                    role: LayerRole::Background,
                    depth: LayerDepth::new(-40.0, -50.0),
                },
                Layer {
                    element: ElementId(2),
                    role: LayerRole::Foreground,
                    depth: LayerDepth::new(120.0, 40.0),
                },
            ],
        });
        let mut reveal = RevealTracker::new(RevealConfig::sections());
        reveal.observe(ElementId(3), vec![ElementId(4), ElementId(5)]);
        let mut effects = PageEffects::new(
            MarkupConfig::standard(),
            ScrollConfig::vertical(),
            parallax,
            reveal,
        );
        let mut applier = Recorder::default();

        // Item top at the viewport bottom: progress 0, adjusted -0.5.
        let mut page = Page {
            viewport: ViewportState::new(Vec2::ZERO, Size::new(800.0, 600.0)),
            boxes: vec![Some(Rect::new(0.0, 600.0, 800.0, 1000.0))],
            extent: None,
        };
        let _ = effects.refresh(&page, &mut applier);
        assert_eq!(
            applier.last(),
            [
                StyleWrite::Transform {
                    element: ElementId(1),
                    transform: CssTransform::Translate3d(0.0, 20.0, -50.0),
                },
                StyleWrite::Transform {
                    element: ElementId(2),
                    transform: CssTransform::Translate3d(0.0, -60.0, 40.0),
                },
            ]
        );

        // Scrolled far past: item above the viewport, skipped.
        page.viewport.scroll.y = 3000.0;
        page.boxes[0] = Some(Rect::new(0.0, -2400.0, 800.0, -2000.0));
        let before = applier.batches.len();
        let _ = effects.handle(&PageEvent::Scroll, &mut applier);
        let pass = effects.flush_frame(&page, &mut applier).unwrap();
        assert_eq!(pass, ParallaxPass { written: 0, skipped: 1 });
        assert_eq!(applier.batches.len(), before);

        // Section reveal cascades to children 150 ms apart.
        let _ = effects.handle(
            &PageEvent::Intersection {
                element: ElementId(3),
                ratio: 0.15,
                is_intersecting: true,
            },
            &mut applier,
        );
        let delays: Vec<u64> = applier
            .last()
            .iter()
            .filter_map(|w| match *w {
                StyleWrite::AddClass { delay, .. } => Some(delay.as_millis()),
                _ => None,
            })
            .collect();
        assert_eq!(delays, [0, 150, 300]);
    }
}
