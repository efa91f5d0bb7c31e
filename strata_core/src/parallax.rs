// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parallax mappers and the tracked element set.
//!
//! Two variants exist side by side:
//!
//! - **Simple**: every element carrying a speed factor `k` is translated by
//!   `-scroll * k` along the scroll axis. The write happens whether or not the
//!   element is on screen; off-screen translation is visually inert.
//! - **Layered**: each item exposes named child layers (background, content,
//!   foreground). The item's position relative to the viewport yields a
//!   progress value clamped to `[0, 1]`, re-centred to `[-0.5, 0.5]` and
//!   scaled by each layer's speed. Items fully outside the viewport are
//!   skipped.

use alloc::vec::Vec;

use crate::style::{CssTransform, ElementId, StyleChanges};
use crate::viewport::{ScrollAxis, ViewportMetrics};

/// Simple parallax translation for a scroll offset and speed factor.
#[inline]
#[must_use]
pub fn simple_offset(scroll: f64, speed: f64) -> f64 {
    -scroll * speed
}

/// How far an element has travelled through the viewport, in `[0, 1]`.
///
/// `0` when its top sits at the bottom edge of the viewport, `1` once its
/// bottom has left through the top edge. A non-positive span or NaN input
/// yields `0`.
#[must_use]
pub fn layer_progress(viewport_height: f64, top: f64, element_height: f64) -> f64 {
    let span = viewport_height + element_height;
    if span.is_nan() || span <= 0.0 {
        return 0.0;
    }
    let progress = (viewport_height - top) / span;
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}

/// Re-centres a progress value onto `[-0.5, 0.5]`.
#[inline]
#[must_use]
pub fn adjusted_progress(progress: f64) -> f64 {
    progress.clamp(0.0, 1.0) - 0.5
}

/// Layer translation for a progress value and layer speed.
#[inline]
#[must_use]
pub fn layer_translation(progress: f64, layer_speed: f64) -> f64 {
    adjusted_progress(progress) * layer_speed
}

/// Parses a speed or depth attribute.
///
/// Surrounding whitespace is ignored; anything that is not a finite number is
/// rejected so that no `NaNpx` ever reaches a style.
#[must_use]
pub fn parse_factor(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Named child layer of a layered parallax item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerRole {
    /// Furthest back.
    Background,
    /// Middle layer.
    Content,
    /// Closest to the viewer.
    Foreground,
}

impl LayerRole {
    /// Every role, back to front.
    pub const ALL: [Self; 3] = [Self::Background, Self::Content, Self::Foreground];

    /// Class name a page uses to mark this layer.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Content => "content",
            Self::Foreground => "foreground",
        }
    }
}

/// Vertical speed and depth of a layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerDepth {
    /// Multiplier applied to the adjusted progress.
    pub y_speed: f64,
    /// Constant `translateZ` offset in CSS pixels.
    pub z_offset: f64,
}

impl LayerDepth {
    /// Creates a layer depth.
    #[must_use]
    pub const fn new(y_speed: f64, z_offset: f64) -> Self {
        Self { y_speed, z_offset }
    }
}

/// Simple parallax element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedElement {
    /// Element to translate.
    pub element: ElementId,
    /// Speed factor read from markup.
    pub speed: f64,
}

/// One child layer of a layered item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layer {
    /// Element to translate.
    pub element: ElementId,
    /// Which named layer this is.
    pub role: LayerRole,
    /// Speed and depth.
    pub depth: LayerDepth,
}

/// Layered parallax item: measured as a whole, translated per layer.
#[derive(Clone, Debug, PartialEq)]
pub struct LayeredItem {
    /// Element whose bounding box drives progress.
    pub element: ElementId,
    /// Child layers, in markup order.
    pub layers: Vec<Layer>,
}

/// Outcome of one [`ParallaxSet::update`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParallaxPass {
    /// Style writes emitted.
    pub written: u32,
    /// Layered items skipped because they were off screen or not laid out.
    pub skipped: u32,
}

/// Every element a page tracks for parallax.
///
/// Built once from markup at setup and immutable afterwards.
#[derive(Clone, Debug)]
pub struct ParallaxSet {
    axis: ScrollAxis,
    simple: Vec<SpeedElement>,
    layered: Vec<LayeredItem>,
}

impl ParallaxSet {
    /// Creates an empty set driven by `axis`.
    #[must_use]
    pub const fn new(axis: ScrollAxis) -> Self {
        Self {
            axis,
            simple: Vec::new(),
            layered: Vec::new(),
        }
    }

    /// Tracks a simple parallax element.
    pub fn add_speed(&mut self, element: ElementId, speed: f64) {
        self.simple.push(SpeedElement { element, speed });
    }

    /// Tracks a layered item.
    pub fn add_layered(&mut self, item: LayeredItem) {
        self.layered.push(item);
    }

    /// Returns `true` if nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.simple.is_empty() && self.layered.is_empty()
    }

    /// Recomputes every tracked transform from the current viewport.
    pub fn update(&self, metrics: &dyn ViewportMetrics, changes: &mut StyleChanges) -> ParallaxPass {
        let viewport = metrics.viewport();
        let scroll = viewport.scroll_along(self.axis);
        let mut pass = ParallaxPass::default();

        for el in &self.simple {
            let offset = simple_offset(scroll, el.speed);
            let transform = match self.axis {
                ScrollAxis::Horizontal => CssTransform::TranslateX(offset),
                ScrollAxis::Vertical => CssTransform::TranslateY(offset),
            };
            changes.transform(el.element, transform);
            pass.written += 1;
        }

        for item in &self.layered {
            let Some(rect) = metrics.bounding_box(item.element) else {
                pass.skipped += 1;
                continue;
            };
            if viewport.is_outside(rect) {
                pass.skipped += 1;
                continue;
            }
            let progress = layer_progress(viewport.size.height, rect.y0, rect.height());
            for layer in &item.layers {
                let y = layer_translation(progress, layer.depth.y_speed);
                changes.transform(
                    layer.element,
                    CssTransform::Translate3d(0.0, y, layer.depth.z_offset),
                );
                pass.written += 1;
            }
        }

        pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleWrite;
    use crate::viewport::ViewportState;
    use alloc::vec;
    use kurbo::{Rect, Size, Vec2};

    struct Fixed {
        viewport: ViewportState,
        boxes: Vec<Option<Rect>>,
    }

    impl ViewportMetrics for Fixed {
        fn viewport(&self) -> ViewportState {
            self.viewport
        }

        fn bounding_box(&self, element: ElementId) -> Option<Rect> {
            self.boxes.get(element.index()).copied().flatten()
        }
    }

    fn transforms(changes: &StyleChanges) -> Vec<(ElementId, CssTransform)> {
        changes
            .writes
            .iter()
            .filter_map(|w| match *w {
                StyleWrite::Transform { element, transform } => Some((element, transform)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn simple_offset_is_negated_product() {
        for &(s, k) in &[(0.0, 0.5), (100.0, 0.5), (250.0, -0.2), (1234.5, 1.0)] {
            assert_eq!(simple_offset(s, k), -s * k);
        }
        assert_eq!(simple_offset(200.0, 0.5), -100.0);
    }

    #[test]
    fn progress_is_clamped() {
        // Far below the fold.
        assert_eq!(layer_progress(600.0, 2000.0, 200.0), 0.0);
        // Long gone above the top.
        assert_eq!(layer_progress(600.0, -2000.0, 200.0), 1.0);
        // Top at the bottom edge.
        assert_eq!(layer_progress(600.0, 600.0, 200.0), 0.0);
        // Centre of travel.
        assert_eq!(layer_progress(600.0, 200.0, 200.0), 0.5);
    }

    #[test]
    fn progress_degenerate_inputs() {
        assert_eq!(layer_progress(0.0, 10.0, 0.0), 0.0);
        assert_eq!(layer_progress(600.0, f64::NAN, 200.0), 0.0);
        assert_eq!(layer_progress(f64::NAN, 0.0, 200.0), 0.0);
    }

    #[test]
    fn adjusted_progress_range() {
        for &p in &[-3.0, 0.0, 0.25, 0.5, 1.0, 7.0] {
            let a = adjusted_progress(p);
            assert!((-0.5..=0.5).contains(&a), "{a} out of range for {p}");
        }
        assert_eq!(adjusted_progress(0.0), -0.5);
        assert_eq!(adjusted_progress(1.0), 0.5);
        assert_eq!(layer_translation(1.0, 80.0), 40.0);
    }

    #[test]
    fn parse_factor_rejects_garbage() {
        assert_eq!(parse_factor(" 0.3 "), Some(0.3));
        assert_eq!(parse_factor("-1"), Some(-1.0));
        assert_eq!(parse_factor("fast"), None);
        assert_eq!(parse_factor("NaN"), None);
        assert_eq!(parse_factor("inf"), None);
    }

    #[test]
    fn simple_variant_writes_even_off_screen() {
        let mut set = ParallaxSet::new(ScrollAxis::Horizontal);
        set.add_speed(ElementId(0), 0.5);
        set.add_speed(ElementId(1), 0.1);
        let metrics = Fixed {
            viewport: ViewportState::new(Vec2::new(400.0, 0.0), Size::new(800.0, 600.0)),
            boxes: vec![Some(Rect::new(5000.0, 0.0, 5100.0, 100.0)), None],
        };

        let mut changes = StyleChanges::new();
        let pass = set.update(&metrics, &mut changes);

        assert_eq!(pass, ParallaxPass { written: 2, skipped: 0 });
        assert_eq!(
            transforms(&changes),
            [
                (ElementId(0), CssTransform::TranslateX(-200.0)),
                (ElementId(1), CssTransform::TranslateX(-40.0)),
            ]
        );
    }

    #[test]
    fn vertical_axis_uses_translate_y() {
        let mut set = ParallaxSet::new(ScrollAxis::Vertical);
        set.add_speed(ElementId(0), 0.25);
        let metrics = Fixed {
            viewport: ViewportState::new(Vec2::new(999.0, 400.0), Size::new(800.0, 600.0)),
            boxes: vec![],
        };
        let mut changes = StyleChanges::new();
        let _ = set.update(&metrics, &mut changes);
        assert_eq!(transforms(&changes), [(ElementId(0), CssTransform::TranslateY(-100.0))]);
    }

    #[test]
    fn layered_variant_skips_off_screen_items() {
        let mut set = ParallaxSet::new(ScrollAxis::Vertical);
        let layers = |base: u32| {
            LayerRole::ALL
                .iter()
                .enumerate()
                .map(|(i, &role)| Layer {
                    element: ElementId(base + i as u32),
                    role,
                    depth: LayerDepth::new(100.0 * (i as f64 + 1.0), -10.0 * i as f64),
                })
                .collect::<Vec<_>>()
        };
        // Item 0 at the centre of its travel, item 4 far below the fold,
        // item 8 not laid out.
        set.add_layered(LayeredItem {
            element: ElementId(0),
            layers: layers(1),
        });
        set.add_layered(LayeredItem {
            element: ElementId(4),
            layers: layers(5),
        });
        set.add_layered(LayeredItem {
            element: ElementId(8),
            layers: layers(9),
        });

        let mut boxes = vec![None; 12];
        boxes[0] = Some(Rect::new(0.0, 200.0, 800.0, 400.0));
        boxes[4] = Some(Rect::new(0.0, 1500.0, 800.0, 1700.0));
        let metrics = Fixed {
            viewport: ViewportState::new(Vec2::ZERO, Size::new(800.0, 600.0)),
            boxes,
        };

        let mut changes = StyleChanges::new();
        let pass = set.update(&metrics, &mut changes);

        assert_eq!(pass, ParallaxPass { written: 3, skipped: 2 });
        // progress = 0.5 → adjusted 0 → no vertical travel, depth kept.
        assert_eq!(
            transforms(&changes),
            [
                (ElementId(1), CssTransform::Translate3d(0.0, 0.0, 0.0)),
                (ElementId(2), CssTransform::Translate3d(0.0, 0.0, -10.0)),
                (ElementId(3), CssTransform::Translate3d(0.0, 0.0, -20.0)),
            ]
        );
    }

    #[test]
    fn layered_translation_follows_progress() {
        let mut set = ParallaxSet::new(ScrollAxis::Vertical);
        set.add_layered(LayeredItem {
            element: ElementId(0),
            layers: vec![Layer {
                element: ElementId(1),
                role: LayerRole::Foreground,
                depth: LayerDepth::new(80.0, 30.0),
            }],
        });
        // top = 600 - 0 → bottom edge → progress 0 → adjusted -0.5.
        let metrics = Fixed {
            viewport: ViewportState::new(Vec2::ZERO, Size::new(800.0, 600.0)),
            boxes: vec![Some(Rect::new(0.0, 600.0, 800.0, 800.0))],
        };
        let mut changes = StyleChanges::new();
        let _ = set.update(&metrics, &mut changes);
        assert_eq!(
            transforms(&changes),
            [(ElementId(1), CssTransform::Translate3d(0.0, -40.0, 30.0))]
        );
    }
}
