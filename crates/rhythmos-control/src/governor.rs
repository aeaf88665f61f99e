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

//! Hysteresis state machine over the discrete rate tiers.
//!
//! The governor holds a single current-tier index for the whole session and
//! advances it by at most one tier per tick. Scores inside the band between
//! the low and high thresholds hold the current tier steady; at intermediate
//! tiers the rise condition is evaluated before the drop condition, and that
//! ordering is part of the contract.

/// Steps the target rate among a fixed ordered tier list, driven by the
/// per-tick dynamism score.
#[derive(Debug, Clone)]
pub struct RateGovernor {
    /// Supported rates in frames per second, ascending.
    tiers: Vec<f64>,
    /// Score above which the governor rises one tier.
    high_threshold: f64,
    /// Score below which the governor drops one tier.
    low_threshold: f64,
    /// Index of the current tier.
    current: usize,
}

impl RateGovernor {
    /// Creates a governor over `tiers`, starting at `initial_tier`.
    ///
    /// The caller is responsible for handing in validated parameters (see
    /// [`crate::CadenceConfig::validate`]); the governor itself performs no
    /// per-tick validation.
    pub fn new(tiers: Vec<f64>, high_threshold: f64, low_threshold: f64, initial_tier: usize) -> Self {
        debug_assert!(!tiers.is_empty());
        debug_assert!(initial_tier < tiers.len());
        debug_assert!(low_threshold < high_threshold);
        Self {
            tiers,
            high_threshold,
            low_threshold,
            current: initial_tier,
        }
    }

    /// Advances the state machine by one tick.
    ///
    /// Returns `Some(rate)` with the new target rate when a transition
    /// occurred, `None` when the tier held. Rise is checked before drop; a
    /// score inside the hysteresis band, or pushing past a tier-list bound,
    /// leaves the tier unchanged.
    pub fn step(&mut self, score: f64) -> Option<f64> {
        let next = if self.current + 1 < self.tiers.len() && score > self.high_threshold {
            self.current + 1
        } else if self.current > 0 && score < self.low_threshold {
            self.current - 1
        } else {
            self.current
        };

        if next == self.current {
            return None;
        }

        log::debug!(
            "Governor: score {:.3} moved tier {} -> {} ({} FPS)",
            score,
            self.current,
            next,
            self.tiers[next]
        );
        self.current = next;
        Some(self.tiers[next])
    }

    /// Returns the rate of the current tier in frames per second.
    #[inline]
    pub fn current_rate(&self) -> f64 {
        self.tiers[self.current]
    }

    /// Returns the index of the current tier.
    #[inline]
    pub fn current_tier(&self) -> usize {
        self.current
    }
}
