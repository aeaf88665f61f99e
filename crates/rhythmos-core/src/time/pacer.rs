// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Frame pacing for the render loop.
//!
//! The [`FramePacer`] measures the elapsed time of each loop iteration,
//! clamps stalls, tracks the number of frames produced in the current
//! one-second window, and computes how long the loop should sleep to hold its
//! target rate. It is owned and driven by the render-loop driver; mid-session
//! rate changes normally come from the governor.

use std::thread;
use std::time::Duration;

use crate::time::Stopwatch;

/// The maximum per-tick delta, in seconds. Elapsed time beyond this (e.g.
/// after a debugger break or OS stall) is clamped so the pacing math does not
/// try to catch up on a runaway delta.
pub const MAX_DELTA_SECS: f64 = 0.1;

/// Paces a real-time loop towards a target execution rate.
///
/// Typical usage per loop iteration:
/// 1. [`FramePacer::tick`] at the top of the frame,
/// 2. frame work,
/// 3. [`FramePacer::wait`] at the bottom of the frame.
#[derive(Debug)]
pub struct FramePacer {
    /// Measures the wall-clock span of the current frame; `None` until
    /// `start()` or the first `tick()`.
    watch: Option<Stopwatch>,
    /// Frames per second the loop is being paced towards.
    target_rate: f64,
    /// Smallest supported rate; non-positive rate requests clamp to this.
    min_rate: f64,
    /// Clamped elapsed time of the last tick, in seconds.
    last_delta: f64,
    /// Sleep needed to hold the target rate, computed by the last tick.
    sleep_amount: f64,
    /// Accumulated elapsed time of the rolling one-second window.
    one_sec_timer: f64,
    /// Frames counted in the current one-second window.
    frames_in_second: u32,
}

impl FramePacer {
    /// Creates a pacer targeting `target_rate` frames per second.
    ///
    /// `min_rate` is the smallest rate the session supports; any non-positive
    /// rate handed to the pacer (here or later through
    /// [`FramePacer::set_target_rate`]) is clamped to it.
    pub fn new(target_rate: f64, min_rate: f64) -> Self {
        debug_assert!(min_rate > 0.0, "min_rate must be positive");
        let rate = if target_rate > 0.0 {
            target_rate
        } else {
            log::warn!(
                "Pacer: non-positive target rate {} at construction, clamping to {}",
                target_rate,
                min_rate
            );
            min_rate
        };
        Self {
            watch: None,
            target_rate: rate,
            min_rate,
            last_delta: 0.0,
            sleep_amount: 0.0,
            one_sec_timer: 0.0,
            frames_in_second: 0,
        }
    }

    /// Captures the timing reference and resets the one-second window.
    ///
    /// The first `tick()` after `start()` measures from here.
    pub fn start(&mut self) {
        self.watch = Some(Stopwatch::new());
        self.last_delta = 0.0;
        self.sleep_amount = 0.0;
        self.one_sec_timer = 0.0;
        self.frames_in_second = 0;
    }

    /// Advances the pacer by the wall-clock time elapsed since the previous
    /// tick (or since [`FramePacer::start`]).
    ///
    /// The measured delta is clamped to [`MAX_DELTA_SECS`] before entering
    /// the pacing math. A `tick()` without a prior `start()` establishes the
    /// reference with a zero delta.
    pub fn tick(&mut self) {
        let dt = self
            .watch
            .as_ref()
            .and_then(|w| w.elapsed_secs_f64())
            .unwrap_or(0.0);
        self.watch = Some(Stopwatch::new());
        self.apply_delta(dt);
    }

    /// The pure pacing math, separated from wall-clock measurement so the
    /// stall-clamping behavior can be tested with injected deltas.
    fn apply_delta(&mut self, dt: f64) {
        let dt = dt.min(MAX_DELTA_SECS);
        self.last_delta = dt;

        self.sleep_amount = (1.0 / self.target_rate - dt).max(0.0);

        self.one_sec_timer += dt;
        self.frames_in_second += 1;
        if self.one_sec_timer > 1.0 {
            self.frames_in_second = 0;
            self.one_sec_timer = 0.0;
        }
    }

    /// Blocks for the sleep amount computed by the last tick, if positive.
    ///
    /// This is a coarse OS-granularity sleep, not a precision guarantee, and
    /// it is bounded by the period of the smallest supported rate.
    pub fn wait(&self) {
        if self.sleep_amount > 0.0 {
            thread::sleep(Duration::from_secs_f64(self.sleep_amount));
        }
    }

    /// Sets the target rate in frames per second.
    ///
    /// A non-positive rate is a configuration error; it is clamped to the
    /// smallest supported rate rather than propagated.
    pub fn set_target_rate(&mut self, rate: f64) {
        if rate > 0.0 {
            self.target_rate = rate;
        } else {
            log::warn!(
                "Pacer: rejecting non-positive target rate {}, clamping to {}",
                rate,
                self.min_rate
            );
            self.target_rate = self.min_rate;
        }
    }

    /// Returns the current target rate in frames per second.
    #[inline]
    pub fn target_rate(&self) -> f64 {
        self.target_rate
    }

    /// Returns the clamped elapsed time of the last tick, in seconds.
    #[inline]
    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }

    /// Returns the sleep computed by the last tick, in seconds.
    #[inline]
    pub fn sleep_amount(&self) -> f64 {
        self.sleep_amount
    }

    /// Returns `true` when the current one-second window has already counted
    /// more frames than the target rate.
    ///
    /// Advisory only: hosts use it to drop optional per-object work, never to
    /// skip pacing itself.
    #[inline]
    pub fn should_skip_frame(&self) -> bool {
        f64::from(self.frames_in_second) > self.target_rate
    }
}
