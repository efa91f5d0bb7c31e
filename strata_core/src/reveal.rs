// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot reveal on intersection.
//!
//! [`RevealTracker`] holds every element observed for an entrance animation.
//! Visibility is write-once: the first intersection at or above the
//! threshold moves an element from [`Visibility::Hidden`] to
//! [`Visibility::Revealed`], produces a [`RevealPlan`] (the element itself
//! plus its staggered children), and stops observing it. Every later event for
//! that element is a no-op.
//!
//! Pages without an intersection capability call
//! [`reveal_all`](RevealTracker::reveal_all): everything becomes visible at
//! once, so a missing observer never leaves content hidden.

use alloc::vec::Vec;

use crate::style::{ElementId, StyleChanges};
use crate::time::Duration;

/// Reveal threshold and child cascade timing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealConfig {
    /// Visible fraction at which an element is revealed, in `[0, 1]`.
    pub threshold: f64,
    /// Delay step between staggered children.
    pub stagger: Duration,
}

impl RevealConfig {
    /// Panels on a horizontal scroller: reveal at 30 %, no cascade.
    #[must_use]
    pub const fn panels() -> Self {
        Self {
            threshold: 0.3,
            stagger: Duration::ZERO,
        }
    }

    /// Sections on a vertical page: reveal at 15 %, children 150 ms apart.
    #[must_use]
    pub const fn sections() -> Self {
        Self {
            threshold: 0.15,
            stagger: Duration::from_millis(150),
        }
    }

    /// Returns a copy with the threshold clamped to `[0, 1]` (NaN becomes 0).
    #[must_use]
    pub fn normalized(self) -> Self {
        let threshold = if self.threshold.is_nan() {
            0.0
        } else {
            self.threshold.clamp(0.0, 1.0)
        };
        Self { threshold, ..self }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::panels()
    }
}

/// Delay before the child at `index` is revealed: `stagger × (index + 1)`.
#[must_use]
pub const fn stagger_delay(stagger: Duration, index: usize) -> Duration {
    stagger.saturating_mul(index as u64 + 1)
}

/// Reveal state of an observed element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Not yet revealed.
    Hidden,
    /// Revealed; never reverts.
    Revealed,
}

/// Elements to mark visible as the result of one reveal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealPlan {
    /// Element that crossed the threshold.
    pub element: ElementId,
    /// Children with their cascade delays, in markup order.
    pub children: Vec<(ElementId, Duration)>,
}

impl RevealPlan {
    /// Appends the class writes for this plan.
    pub fn write_into(&self, class: &'static str, changes: &mut StyleChanges) {
        changes.add_class(self.element, class, Duration::ZERO);
        for &(child, delay) in &self.children {
            changes.add_class(child, class, delay);
        }
    }
}

#[derive(Clone, Debug)]
struct Observed {
    element: ElementId,
    children: Vec<ElementId>,
    visibility: Visibility,
}

/// Tracks observed elements and their write-once visibility.
#[derive(Clone, Debug)]
pub struct RevealTracker {
    config: RevealConfig,
    observed: Vec<Observed>,
}

impl RevealTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config: config.normalized(),
            observed: Vec::new(),
        }
    }

    /// Effective (normalized) configuration.
    #[must_use]
    pub const fn config(&self) -> RevealConfig {
        self.config
    }

    /// Starts observing `element` with the given staggered children.
    ///
    /// Observing an element twice keeps the first registration.
    pub fn observe(&mut self, element: ElementId, children: Vec<ElementId>) {
        if self.find(element).is_some() {
            return;
        }
        self.observed.push(Observed {
            element,
            children,
            visibility: Visibility::Hidden,
        });
    }

    /// Visibility of an element, or `None` if it was never observed.
    #[must_use]
    pub fn visibility(&self, element: ElementId) -> Option<Visibility> {
        self.find(element).map(|i| self.observed[i].visibility)
    }

    /// Returns `true` while `element` is observed and still hidden.
    #[must_use]
    pub fn is_observing(&self, element: ElementId) -> bool {
        self.visibility(element) == Some(Visibility::Hidden)
    }

    /// Elements still waiting to be revealed.
    pub fn pending(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.observed
            .iter()
            .filter(|o| o.visibility == Visibility::Hidden)
            .map(|o| o.element)
    }

    /// Handles an intersection report for `element`.
    ///
    /// Returns a plan the first time the element intersects with a visible
    /// fraction at or above the threshold, `None` otherwise.
    pub fn on_intersection(
        &mut self,
        element: ElementId,
        ratio: f64,
        is_intersecting: bool,
    ) -> Option<RevealPlan> {
        let idx = self.find(element)?;
        if self.observed[idx].visibility == Visibility::Revealed {
            return None;
        }
        if !is_intersecting || ratio.is_nan() || ratio < self.config.threshold {
            return None;
        }
        let stagger = self.config.stagger;
        Some(self.reveal_at(idx, |i| stagger_delay(stagger, i)))
    }

    /// Reveals every pending element immediately, children included.
    ///
    /// Used when no intersection capability exists.
    pub fn reveal_all(&mut self) -> Vec<RevealPlan> {
        let pending: Vec<usize> = (0..self.observed.len())
            .filter(|&i| self.observed[i].visibility == Visibility::Hidden)
            .collect();
        pending
            .into_iter()
            .map(|idx| self.reveal_at(idx, |_| Duration::ZERO))
            .collect()
    }

    fn reveal_at(&mut self, idx: usize, delay: impl Fn(usize) -> Duration) -> RevealPlan {
        let observed = &mut self.observed[idx];
        observed.visibility = Visibility::Revealed;
        RevealPlan {
            element: observed.element,
            children: observed
                .children
                .iter()
                .enumerate()
                .map(|(i, &child)| (child, delay(i)))
                .collect(),
        }
    }

    fn find(&self, element: ElementId) -> Option<usize> {
        self.observed.iter().position(|o| o.element == element)
    }
}
