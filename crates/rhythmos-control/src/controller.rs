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

//! The per-tick orchestration of pacing, occupancy sampling, scoring and
//! governing.
//!
//! A [`CadenceController`] is constructed once per session from a validated
//! [`CadenceConfig`] and driven by the host's render loop. Each tick it
//! advances the pacer, builds a fresh occupancy quadtree from the frame's
//! screen-space footprints, diffs it against the previous tick's tree, steps
//! the governor with the resulting score and pushes any tier change into the
//! pacer before the tick returns. At most two trees are alive at any moment;
//! the older one is dropped as soon as it has been diffed.

use rhythmos_core::math::Rect2;
use rhythmos_core::spatial::QuadTree;
use rhythmos_core::time::FramePacer;

use crate::config::{CadenceConfig, ConfigError};
use crate::governor::RateGovernor;
use crate::score;

/// Supplies the current frame's screen-space object footprints.
///
/// Implemented by the host over whatever tracks its visible objects; the
/// controller only ever sees normalized rectangles in the configured view.
/// Objects that are off screen or otherwise unplaceable should be reported as
/// [`Rect2::INVALID`], which the occupancy pass ignores.
pub trait ScreenBoundsSource {
    /// Returns one footprint per tracked object, in view coordinates.
    fn screen_bounds(&self) -> Vec<Rect2>;
}

/// Adapts the render cadence of a real-time loop to how much its scene moves.
///
/// Typical usage per loop iteration:
/// 1. [`CadenceController::tick`] (or [`CadenceController::tick_from`]) at
///    the top of the frame,
/// 2. frame work, consulting [`CadenceController::should_skip_frame`] for
///    optional per-object effort,
/// 3. [`CadenceController::wait`] at the bottom of the frame.
#[derive(Debug)]
pub struct CadenceController {
    pacer: FramePacer,
    governor: RateGovernor,
    view: Rect2,
    max_depth: u16,
    /// The previous tick's occupancy tree, handed forward one tick and
    /// dropped right after it has been diffed.
    previous: Option<QuadTree>,
    /// Score produced by the most recent successful diff.
    last_score: Option<f64>,
}

impl CadenceController {
    /// Creates a controller for the session described by `config`.
    ///
    /// The configuration is validated here; a controller never exists in an
    /// invalid state.
    pub fn new(config: CadenceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let min_rate = config.min_rate();
        let initial_rate = config.tiers[config.initial_tier];
        log::info!(
            "Controller: session started at {} FPS over {} tiers",
            initial_rate,
            config.tiers.len()
        );
        Ok(Self {
            pacer: FramePacer::new(initial_rate, min_rate),
            governor: RateGovernor::new(
                config.tiers,
                config.high_threshold,
                config.low_threshold,
                config.initial_tier,
            ),
            view: config.view,
            max_depth: config.max_depth,
            previous: None,
            last_score: None,
        })
    }

    /// Captures the pacing reference.
    ///
    /// Call once right before entering the render loop; the first tick
    /// measures from here.
    pub fn start(&mut self) {
        self.pacer.start();
    }

    /// Advances the controller by one frame.
    ///
    /// `bounds` are this frame's screen-space footprints. The tick paces,
    /// rebuilds the occupancy tree, scores the change since the previous tick
    /// and lets the governor adjust the target rate. Any tier change is
    /// visible through [`CadenceController::fps`] as soon as this
    /// returns.
    ///
    /// The very first tick of a session has nothing to diff against and
    /// never transitions.
    pub fn tick(&mut self, bounds: &[Rect2]) {
        self.pacer.tick();

        let current = QuadTree::build(bounds, self.view, self.max_depth);
        if let Some(previous) = self.previous.take() {
            match score::evaluate(&previous, &current) {
                Some(value) => {
                    self.last_score = Some(value);
                    if let Some(rate) = self.governor.step(value) {
                        self.pacer.set_target_rate(rate);
                    }
                }
                None => {
                    log::warn!("Controller: no score this tick, holding the current tier");
                }
            }
        }
        self.previous = Some(current);
    }

    /// Like [`CadenceController::tick`], pulling the footprints from a
    /// [`ScreenBoundsSource`].
    pub fn tick_from<S: ScreenBoundsSource + ?Sized>(&mut self, source: &S) {
        self.tick(&source.screen_bounds());
    }

    /// Blocks for the remainder of the current frame's budget, if any.
    pub fn wait(&self) {
        self.pacer.wait();
    }

    /// Returns the current target rate in frames per second.
    #[inline]
    pub fn fps(&self) -> f64 {
        self.pacer.target_rate()
    }

    /// Overrides the target rate directly.
    ///
    /// The governor keeps stepping from its own tier state afterwards, so a
    /// manual override normally lasts until the next transition. Non-positive
    /// rates clamp to the lowest configured tier.
    pub fn set_framerate(&mut self, rate: f64) {
        self.pacer.set_target_rate(rate);
    }

    /// Returns the index of the governor's current tier.
    #[inline]
    pub fn current_tier(&self) -> usize {
        self.governor.current_tier()
    }

    /// Returns the clamped elapsed time of the last tick, in seconds.
    #[inline]
    pub fn delta_time(&self) -> f64 {
        self.pacer.last_delta()
    }

    /// Returns the score of the most recent successful diff, `None` before
    /// the second tick of the session.
    #[inline]
    pub fn last_score(&self) -> Option<f64> {
        self.last_score
    }

    /// Returns `true` when more frames than the target rate have already
    /// been produced in the current one-second window.
    ///
    /// Advisory only: hosts use it to drop optional per-object work, never to
    /// skip pacing itself.
    #[inline]
    pub fn should_skip_frame(&self) -> bool {
        self.pacer.should_skip_frame()
    }
}
