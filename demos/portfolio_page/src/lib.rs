// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: a horizontal portfolio page driven by `strata_backend_web`.
//!
//! Wires every effect onto `index.html`: wheel and arrow-key scrolling of the
//! panel strip, speed parallax, panel fade-in on intersection, the rotating
//! hero mesh with drag and colour picker, and the contact form banner.
//!
//! Build with: `wasm-pack build --target web demos/portfolio_page`
//!
//! Then serve `demos/portfolio_page/` and open `index.html` in a browser.
//! The page loads `three.js` before the module; without it the hero canvas
//! stays empty and everything else still runs.

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::Size;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Event, EventTarget, HtmlCanvasElement, HtmlElement, HtmlFormElement,
    HtmlInputElement, KeyboardEvent, MouseEvent, WheelEvent, Window,
};

use strata_backend_web::{
    ConsoleSink, DomForm, DomMetrics, DomRegistry, DomStyleApplier, EventBinding, FrameRequest,
    RafLoop, RevealObserver, ThreeScene, Timeout, intersection_supported, scan_page,
    three_available,
};
use strata_core::event::{EventOutcome, Key, PageEvent};
use strata_core::form::{FormConfig, FormController};
use strata_core::markup::MarkupConfig;
use strata_core::mesh::{MeshAnimator, MeshConfig, SceneBackend as _};
use strata_core::page::PageEffects;
use strata_core::reveal::RevealConfig;
use strata_core::scroll::{ScrollConfig, ScrollDriver};
use strata_core::style::ElementId;
use strata_core::time::Duration;

const MARKUP: MarkupConfig = MarkupConfig::standard();
const SCROLL: ScrollConfig = ScrollConfig::horizontal();
// Panel children in index.html cascade in 150 ms apart.
const REVEAL: RevealConfig = RevealConfig {
    stagger: Duration::from_millis(150),
    ..RevealConfig::panels()
};

struct PageState {
    effects: PageEffects,
    registry: Rc<DomRegistry>,
    applier: DomStyleApplier,
    metrics: DomMetrics,
}

impl PageState {
    fn handle(&mut self, event: &PageEvent<'_>) -> EventOutcome {
        self.effects.handle(event, &mut self.applier)
    }

    fn flush(&mut self) {
        let _ = self.effects.flush_frame(&self.metrics, &mut self.applier);
    }
}

struct MeshParts {
    animator: MeshAnimator,
    scene: ThreeScene,
    canvas: HtmlCanvasElement,
}

struct FormParts {
    controller: FormController,
    surface: DomForm,
    /// Hide timer of the latest submit. Replacing it clears the older one.
    timer: Option<Timeout>,
}

/// A mounted portfolio page.
///
/// `new PortfolioPage()` mounts every effect found in the document;
/// `free()` removes all listeners and stops the mesh loop.
#[wasm_bindgen]
pub struct PortfolioPage {
    // Declared first so listeners go before the state they reference.
    bindings: Vec<EventBinding>,
    observer: Option<RevealObserver>,
    mesh_loop: Option<RafLoop>,
    frame: Rc<FrameRequest>,
    page: Rc<RefCell<PageState>>,
}

impl core::fmt::Debug for PortfolioPage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PortfolioPage")
            .field("bindings", &self.bindings.len())
            .field("mesh_running", &self.mesh_running())
            .field("mesh_frames", &self.mesh_frames())
            .finish_non_exhaustive()
    }
}

#[wasm_bindgen]
impl PortfolioPage {
    /// Scans the document and starts every effect.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let scanned = scan_page(&document, &MARKUP, SCROLL.axis, REVEAL)?;
        let registry = Rc::new(scanned.registry);
        let scroller = scanned.scroller.clone();

        let mut effects = PageEffects::new(MARKUP, SCROLL, scanned.parallax, scanned.reveal);
        effects.set_trace_sink(Box::new(ConsoleSink::new()));
        let metrics = DomMetrics::new(
            Rc::clone(&registry),
            window.clone(),
            scroller.as_ref().map(|(_, el)| el.clone()),
        );
        if let Some((id, _)) = &scroller {
            effects.set_scroller(*id, ScrollDriver::new(metrics.window_size().width));
        }

        let mut state = PageState {
            effects,
            registry: Rc::clone(&registry),
            applier: DomStyleApplier::new(Rc::clone(&registry), window.clone()),
            metrics,
        };
        let _ = state.effects.refresh(&state.metrics, &mut state.applier);
        let page = Rc::new(RefCell::new(state));

        let frame_page = Rc::clone(&page);
        let frame = Rc::new(FrameRequest::new(move |_now| {
            frame_page.borrow_mut().flush();
        }));

        let mut bindings = Vec::new();
        bind_scroll(&window, scroller.map(|(_, el)| el), &page, &frame, &mut bindings)?;

        let observer = mount_reveal(&page, &scanned.reveal_targets)?;
        let mesh_loop = mount_mesh(&window, &document, &mut bindings)?;
        mount_form(&window, &document, &mut bindings)?;

        Ok(Self {
            bindings,
            observer,
            mesh_loop,
            frame,
            page,
        })
    }

    /// Current horizontal offset of the panel strip.
    #[wasm_bindgen(js_name = scrollOffset)]
    pub fn scroll_offset(&self) -> f64 {
        self.page.borrow().effects.scroller_offset().unwrap_or(0.0)
    }

    /// Returns `true` while the hero mesh is animating.
    #[wasm_bindgen(js_name = meshRunning)]
    pub fn mesh_running(&self) -> bool {
        self.mesh_loop.as_ref().is_some_and(RafLoop::is_running)
    }

    /// Frames the hero mesh has rendered so far.
    #[wasm_bindgen(js_name = meshFrames)]
    pub fn mesh_frames(&self) -> u64 {
        self.mesh_loop.as_ref().map_or(0, RafLoop::frames)
    }

    /// Tears the page down. Equivalent to `free()`.
    pub fn unmount(self) {
        self.frame.cancel();
    }
}

fn dispatch(
    page: &Rc<RefCell<PageState>>,
    frame: &FrameRequest,
    event: &PageEvent<'_>,
) -> EventOutcome {
    let outcome = page.borrow_mut().handle(event);
    if outcome.request_frame {
        frame.schedule();
    }
    outcome
}

fn bind_scroll(
    window: &Window,
    scroller: Option<HtmlElement>,
    page: &Rc<RefCell<PageState>>,
    frame: &Rc<FrameRequest>,
    bindings: &mut Vec<EventBinding>,
) -> Result<(), JsValue> {
    let scroll_target: EventTarget = match &scroller {
        Some(el) => el.clone().into(),
        None => window.clone().into(),
    };

    let (p, f) = (Rc::clone(page), Rc::clone(frame));
    bindings.push(EventBinding::new(&scroll_target, "scroll", move |_| {
        let _ = dispatch(&p, &f, &PageEvent::Scroll);
    })?);

    let (p, f) = (Rc::clone(page), Rc::clone(frame));
    bindings.push(EventBinding::new(window, "resize", move |_| {
        let size = p.borrow().metrics.window_size();
        let _ = dispatch(&p, &f, &PageEvent::Resize { size });
    })?);

    if let Some(el) = scroller {
        let (p, f) = (Rc::clone(page), Rc::clone(frame));
        bindings.push(EventBinding::active(&el, "wheel", move |event: Event| {
            let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            let delta_y = wheel.delta_y();
            let outcome = dispatch(&p, &f, &PageEvent::Wheel { delta_y });
            if outcome.prevent_default {
                event.prevent_default();
            }
        })?);

        let (p, f) = (Rc::clone(page), Rc::clone(frame));
        bindings.push(EventBinding::new(window, "keydown", move |event: Event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                let key = Key::from_dom_key(&key.key());
                let _ = dispatch(&p, &f, &PageEvent::KeyDown(key));
            }
        })?);
    }
    Ok(())
}

fn mount_reveal(
    page: &Rc<RefCell<PageState>>,
    targets: &[ElementId],
) -> Result<Option<RevealObserver>, JsValue> {
    if targets.is_empty() {
        return Ok(None);
    }
    if !intersection_supported() {
        let mut state = page.borrow_mut();
        let PageState {
            effects, applier, ..
        } = &mut *state;
        let _ = effects.reveal_all(applier);
        return Ok(None);
    }

    let p = Rc::clone(page);
    let observer = RevealObserver::new(REVEAL.threshold, move |target, ratio, is_intersecting| {
        let mut state = p.borrow_mut();
        let Some(element) = state.registry.id_of(target) else {
            return true;
        };
        let _ = state.handle(&PageEvent::Intersection {
            element,
            ratio,
            is_intersecting,
        });
        !state.effects.reveal().is_observing(element)
    })?;

    let state = page.borrow();
    for &id in targets {
        if let Some(el) = state.registry.get(id) {
            observer.observe(el);
        }
    }
    Ok(Some(observer))
}

fn mount_mesh(
    window: &Window,
    document: &Document,
    bindings: &mut Vec<EventBinding>,
) -> Result<Option<RafLoop>, JsValue> {
    let Some(canvas) = document
        .get_element_by_id(MARKUP.hero_canvas_id)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    else {
        return Ok(None);
    };
    if !three_available() {
        web_sys::console::warn_1(&JsValue::from_str("THREE is not loaded; hero mesh disabled"));
        return Ok(None);
    }

    let config = MeshConfig::hero();
    let mut animator = MeshAnimator::new(&config);
    animator.set_trace_sink(Box::new(ConsoleSink::new()));
    let scene = ThreeScene::new(&canvas, &config)?;
    let mesh = Rc::new(RefCell::new(MeshParts {
        animator,
        scene,
        canvas: canvas.clone(),
    }));

    let pointer_x = |event: &Event| event.dyn_ref::<MouseEvent>().map(|m| f64::from(m.client_x()));

    let m = Rc::clone(&mesh);
    bindings.push(EventBinding::new(&canvas, "pointerdown", move |event: Event| {
        if let Some(x) = pointer_x(&event) {
            let _ = m.borrow_mut().animator.handle(&PageEvent::PointerDown { x });
        }
    })?);

    let m = Rc::clone(&mesh);
    bindings.push(EventBinding::new(window, "pointermove", move |event: Event| {
        if let Some(x) = pointer_x(&event) {
            let _ = m.borrow_mut().animator.handle(&PageEvent::PointerMove { x });
        }
    })?);

    let m = Rc::clone(&mesh);
    bindings.push(EventBinding::new(window, "pointerup", move |_| {
        let _ = m.borrow_mut().animator.handle(&PageEvent::PointerUp);
    })?);

    let m = Rc::clone(&mesh);
    bindings.push(EventBinding::new(window, "resize", move |_| {
        let mut parts = m.borrow_mut();
        let size = canvas_size(&parts.canvas);
        parts.scene.resize(size);
    })?);

    if let Some(input) = document
        .get_element_by_id(MARKUP.color_input_id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    {
        let m = Rc::clone(&mesh);
        let source = input.clone();
        bindings.push(EventBinding::new(&input, "input", move |_| {
            let value = source.value();
            let _ = m.borrow_mut().animator.handle(&PageEvent::ColorInput(&value));
        })?);
    }

    let m = Rc::clone(&mesh);
    let raf = RafLoop::new(move |_now| {
        let mut parts = m.borrow_mut();
        let MeshParts {
            animator, scene, ..
        } = &mut *parts;
        animator.frame(scene);
    });
    raf.start();
    Ok(Some(raf))
}

fn canvas_size(canvas: &HtmlCanvasElement) -> Size {
    Size::new(
        f64::from(canvas.client_width()),
        f64::from(canvas.client_height()),
    )
}

fn mount_form(
    window: &Window,
    document: &Document,
    bindings: &mut Vec<EventBinding>,
) -> Result<(), JsValue> {
    let Some(form) = document
        .get_element_by_id(MARKUP.form_id)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        return Ok(());
    };
    let status = document
        .get_element_by_id(MARKUP.form_status_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());

    let mut controller = FormController::new(FormConfig::contact());
    controller.set_trace_sink(Box::new(ConsoleSink::new()));
    let parts = Rc::new(RefCell::new(FormParts {
        controller,
        surface: DomForm::new(form.clone(), status, MARKUP.status_shown_class),
        timer: None,
    }));

    let window = window.clone();
    bindings.push(EventBinding::new(&form, "submit", move |event: Event| {
        event.prevent_default();
        let mut guard = parts.borrow_mut();
        let FormParts {
            controller,
            surface,
            timer,
        } = &mut *guard;

        let submit = PageEvent::Submit {
            now: strata_backend_web::now(),
        };
        let Some((_, ticket)) = controller.handle(&submit, surface) else {
            return;
        };
        let hide_after = controller.config().hide_after;

        let expire_parts = Rc::clone(&parts);
        *timer = Timeout::new(&window, hide_after, move || {
            let mut guard = expire_parts.borrow_mut();
            let FormParts {
                controller,
                surface,
                ..
            } = &mut *guard;
            let _ = controller.expire(surface, ticket, strata_backend_web::now());
        })
        .ok();
    })?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::reveal::stagger_delay;

    #[test]
    fn panel_children_cascade() {
        assert_eq!(REVEAL.threshold, 0.3);
        let delays: Vec<u64> = (0..3)
            .map(|i| stagger_delay(REVEAL.stagger, i).as_millis())
            .collect();
        assert_eq!(delays, [150, 300, 450]);
    }

    #[test]
    fn contact_form_defers_validation_to_the_handler() {
        let html = include_str!("../index.html");
        let form = html
            .lines()
            .find(|line| line.contains(r#"id="contact-form""#))
            .unwrap();
        assert!(form.contains("novalidate"), "{form}");
    }
}
