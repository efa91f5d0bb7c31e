// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup contract.
//!
//! Pages opt into effects through attributes, classes and ids. The names are
//! collected in [`MarkupConfig`] so that the scanning code in the web backend
//! and the style writes in this crate agree on them.

/// Attribute, class and id names a page uses to opt into effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkupConfig {
    /// Attribute holding a simple parallax speed factor (`data-speed="0.3"`).
    pub speed_attr: &'static str,
    /// Class marking layered parallax items.
    pub layered_item_class: &'static str,
    /// Attribute holding a layer's vertical speed.
    pub layer_y_speed_attr: &'static str,
    /// Attribute holding a layer's depth offset.
    pub layer_z_attr: &'static str,
    /// Class marking elements revealed on intersection.
    pub reveal_class: &'static str,
    /// Attribute marking children revealed in a staggered cascade.
    pub stagger_child_attr: &'static str,
    /// Class added once an element is revealed.
    pub visible_class: &'static str,
    /// Class added while the form status is shown.
    pub status_shown_class: &'static str,
    /// Id of the horizontal scroll container.
    pub scroll_container_id: &'static str,
    /// Id of the hero canvas.
    pub hero_canvas_id: &'static str,
    /// Id of the mesh colour picker input.
    pub color_input_id: &'static str,
    /// Id of the contact form.
    pub form_id: &'static str,
    /// Id of the form status element.
    pub form_status_id: &'static str,
}

impl MarkupConfig {
    /// Names used by the bundled portfolio page.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            speed_attr: "data-speed",
            layered_item_class: "parallax-item",
            layer_y_speed_attr: "data-y-speed",
            layer_z_attr: "data-z",
            reveal_class: "panel",
            stagger_child_attr: "data-stagger-child",
            visible_class: "visible",
            status_shown_class: "show",
            scroll_container_id: "scroll-container",
            hero_canvas_id: "hero-canvas",
            color_input_id: "mesh-color",
            form_id: "contact-form",
            form_status_id: "form-status",
        }
    }
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self::standard()
    }
}
