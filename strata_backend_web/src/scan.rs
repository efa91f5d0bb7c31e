// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Builds effect sets from page markup.

use alloc::format;
use alloc::vec::Vec;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, NodeList};

use strata_core::markup::MarkupConfig;
use strata_core::parallax::{Layer, LayerDepth, LayerRole, LayeredItem, ParallaxSet, parse_factor};
use strata_core::reveal::{RevealConfig, RevealTracker};
use strata_core::style::ElementId;
use strata_core::viewport::ScrollAxis;

use crate::dom::DomRegistry;

/// Everything found on a page at setup.
#[derive(Debug)]
pub struct ScannedPage {
    /// Handles for every element an effect touches.
    pub registry: DomRegistry,
    /// Speed elements and layered items.
    pub parallax: ParallaxSet,
    /// Reveal targets with their staggered children.
    pub reveal: RevealTracker,
    /// Reveal targets in markup order, for observer registration.
    pub reveal_targets: Vec<ElementId>,
    /// The horizontal scroll container, if the page has one.
    pub scroller: Option<(ElementId, HtmlElement)>,
}

/// Scans `document` for the markup described by `markup`.
///
/// Elements whose speed attribute does not parse to a finite number are
/// skipped. Missing layer attributes default to zero.
pub fn scan_page(
    document: &Document,
    markup: &MarkupConfig,
    axis: ScrollAxis,
    reveal: RevealConfig,
) -> Result<ScannedPage, JsValue> {
    let mut registry = DomRegistry::new();
    let mut parallax = ParallaxSet::new(axis);
    let mut tracker = RevealTracker::new(reveal);
    let mut reveal_targets = Vec::new();

    let scroller = document
        .get_element_by_id(markup.scroll_container_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|el| (registry.register(&el), el));

    for el in html_elements(&document.query_selector_all(&format!("[{}]", markup.speed_attr))?) {
        let Some(speed) = el.get_attribute(markup.speed_attr).as_deref().and_then(parse_factor)
        else {
            continue;
        };
        parallax.add_speed(registry.register(&el), speed);
    }

    let items = document.query_selector_all(&format!(".{}", markup.layered_item_class))?;
    for item in html_elements(&items) {
        let mut layers = Vec::new();
        for role in LayerRole::ALL {
            let Some(layer) = item
                .query_selector(&format!(".{}", role.class_name()))?
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let depth = LayerDepth::new(
                factor(&layer, markup.layer_y_speed_attr),
                factor(&layer, markup.layer_z_attr),
            );
            layers.push(Layer {
                element: registry.register(&layer),
                role,
                depth,
            });
        }
        if !layers.is_empty() {
            parallax.add_layered(LayeredItem {
                element: registry.register(&item),
                layers,
            });
        }
    }

    let panels = document.query_selector_all(&format!(".{}", markup.reveal_class))?;
    for panel in html_elements(&panels) {
        let children = panel.query_selector_all(&format!("[{}]", markup.stagger_child_attr))?;
        let children = html_elements(&children)
            .map(|child| registry.register(&child))
            .collect();
        let id = registry.register(&panel);
        tracker.observe(id, children);
        reveal_targets.push(id);
    }

    Ok(ScannedPage {
        registry,
        parallax,
        reveal: tracker,
        reveal_targets,
        scroller,
    })
}

fn factor(element: &Element, attr: &str) -> f64 {
    element
        .get_attribute(attr)
        .as_deref()
        .and_then(parse_factor)
        .unwrap_or(0.0)
}

fn html_elements(list: &NodeList) -> impl Iterator<Item = HtmlElement> + '_ {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
}
