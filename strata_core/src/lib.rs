// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless effect pipeline for scroll-driven portfolio pages.
//!
//! `strata_core` holds every piece of page-effect logic that does not need a
//! browser: viewport metrics, parallax mappers, one-shot reveal tracking, the
//! rotating-mesh state machine and the contact-form validator. It is `no_std`
//! compatible (with `alloc`). Browser glue lives in `strata_backend_web`.
//!
//! # Architecture
//!
//! ```text
//!   Event source (scroll, resize, wheel, key, intersection)
//!       │
//!       ▼
//!   PageEvent ──► PageEffects::handle() ──► FrameThrottle
//!                                               │ (once per frame)
//!                 ┌─────────────────────────────┘
//!                 ▼
//!   ViewportMetrics ──► ParallaxSet::update() ──► StyleChanges
//!                                                     │
//!                                                     ▼
//!                                          StyleApplier::apply()
//! ```
//!
//! The mesh demo runs on its own per-frame cadence through
//! [`MeshAnimator`](mesh::MeshAnimator) and a [`SceneBackend`](mesh::SceneBackend);
//! the contact form is driven by [`FormController`](form::FormController)
//! against a [`FormSurface`](form::FormSurface).
//!
//! **[`page`]** — [`PageEffects`](page::PageEffects), the per-page orchestrator
//! tying the scroll driver, parallax, reveal and frame throttle together.
//!
//! **[`viewport`]** — Scroll offset, viewport size and the
//! [`ViewportMetrics`](viewport::ViewportMetrics) reader trait.
//!
//! **[`parallax`]** — Pure offset mappers and the tracked element set.
//!
//! **[`scroll`]** — Wheel and arrow-key driver for a horizontal scroller.
//!
//! **[`reveal`]** — Write-once visibility tracking with staggered children.
//!
//! **[`mesh`]** — Rotation, drag and colour state for the hero mesh.
//!
//! **[`form`]** — Field constraints, submit outcomes and the timed status banner.
//!
//! **[`style`]** — Style write lists and the [`StyleApplier`](style::StyleApplier) trait.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod event;
pub mod form;
pub mod markup;
pub mod mesh;
pub mod page;
pub mod parallax;
pub mod reveal;
pub mod scroll;
pub mod style;
pub mod throttle;
pub mod time;
pub mod trace;
pub mod viewport;
