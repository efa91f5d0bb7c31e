// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Once-per-frame coalescing for high-frequency events.

/// Coalesces bursts of events into at most one recompute per frame.
///
/// [`request`](Self::request) returns `true` only for the first request since
/// the last [`run`](Self::run); the caller schedules a frame callback in that
/// case and nothing otherwise. The pending flag is cleared after the work has
/// executed, so requests made before the frame fires are absorbed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameThrottle {
    pending: bool,
    runs: u64,
}

impl FrameThrottle {
    /// Creates an idle throttle.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: false,
            runs: 0,
        }
    }

    /// Marks work as pending. Returns `true` if the caller must schedule a
    /// frame.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Runs the pending work and clears the flag afterwards.
    ///
    /// Returns `None` without calling `work` if nothing was requested.
    pub fn run<R>(&mut self, work: impl FnOnce() -> R) -> Option<R> {
        if !self.pending {
            return None;
        }
        let out = work();
        self.pending = false;
        self.runs += 1;
        Some(out)
    }

    /// Returns `true` while a frame is scheduled but has not run.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Number of frames that ran work.
    #[must_use]
    pub const fn runs(&self) -> u64 {
        self.runs
    }
}
