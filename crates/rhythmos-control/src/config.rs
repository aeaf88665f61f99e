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

//! Session configuration for the cadence controller.
//!
//! The tier list and hysteresis thresholds are fixed at session start and
//! validated before the controller is constructed; malformed configuration is
//! rejected up front, never handled per tick.

use rhythmos_core::math::Rect2;
use rhythmos_core::spatial::{DEFAULT_MAX_DEPTH, DEFAULT_VIEW};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime configuration for a cadence session.
///
/// Replaces the compile-time presets of earlier revisions: a host chooses the
/// tier list and thresholds at startup and hands the value to
/// [`crate::CadenceController::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CadenceConfig {
    /// Supported target rates in frames per second, ascending.
    pub tiers: Vec<f64>,
    /// Score above which the governor rises one tier.
    pub high_threshold: f64,
    /// Score below which the governor drops one tier.
    pub low_threshold: f64,
    /// Maximum subdivision depth of the occupancy quadtrees.
    pub max_depth: u16,
    /// Normalized view rectangle the quadtrees are built over.
    pub view: Rect2,
    /// Index into `tiers` of the rate the session starts at.
    pub initial_tier: usize,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            tiers: vec![15.0, 30.0, 60.0],
            high_threshold: 0.5,
            low_threshold: 0.3,
            max_depth: DEFAULT_MAX_DEPTH,
            view: DEFAULT_VIEW,
            initial_tier: 2,
        }
    }
}

impl CadenceConfig {
    /// Creates a configuration with the given tiers and thresholds, starting
    /// at the highest tier. Other fields take their defaults.
    pub fn new(tiers: Vec<f64>, high_threshold: f64, low_threshold: f64) -> Self {
        let initial_tier = tiers.len().saturating_sub(1);
        Self {
            tiers,
            high_threshold,
            low_threshold,
            initial_tier,
            ..Default::default()
        }
    }

    /// Returns the same configuration starting at tier `index`.
    pub fn with_initial_tier(mut self, index: usize) -> Self {
        self.initial_tier = index;
        self
    }

    /// Validates the configuration.
    ///
    /// Called once before the session starts; a controller is never
    /// constructed from an invalid configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tiers.is_empty() {
            return Err(ConfigError::EmptyTierList);
        }
        for (index, &tier) in self.tiers.iter().enumerate() {
            if tier <= 0.0 {
                return Err(ConfigError::NonPositiveTier { index, value: tier });
            }
            if index > 0 && tier <= self.tiers[index - 1] {
                return Err(ConfigError::UnorderedTiers { index });
            }
        }
        if !(0.0..=1.0).contains(&self.low_threshold)
            || !(0.0..=1.0).contains(&self.high_threshold)
        {
            return Err(ConfigError::ThresholdOutOfRange {
                low: self.low_threshold,
                high: self.high_threshold,
            });
        }
        if self.low_threshold >= self.high_threshold {
            return Err(ConfigError::ThresholdOrder {
                low: self.low_threshold,
                high: self.high_threshold,
            });
        }
        if self.initial_tier >= self.tiers.len() {
            return Err(ConfigError::InitialTierOutOfRange {
                index: self.initial_tier,
                tier_count: self.tiers.len(),
            });
        }
        Ok(())
    }

    /// Returns the lowest supported rate.
    ///
    /// # Panics
    /// Panics if the tier list is empty; call [`CadenceConfig::validate`] first.
    pub fn min_rate(&self) -> f64 {
        self.tiers[0]
    }
}

/// An error in the session configuration, detected at startup.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The tier list contains no entries.
    EmptyTierList,
    /// A tier is zero or negative.
    NonPositiveTier {
        /// Index of the offending tier.
        index: usize,
        /// The offending rate value.
        value: f64,
    },
    /// The tier list is not strictly ascending.
    UnorderedTiers {
        /// Index of the first tier that is not greater than its predecessor.
        index: usize,
    },
    /// A threshold lies outside the `[0, 1]` range.
    ThresholdOutOfRange {
        /// The configured low threshold.
        low: f64,
        /// The configured high threshold.
        high: f64,
    },
    /// The low threshold is not strictly below the high threshold.
    ThresholdOrder {
        /// The configured low threshold.
        low: f64,
        /// The configured high threshold.
        high: f64,
    },
    /// The initial tier index does not refer to a configured tier.
    InitialTierOutOfRange {
        /// The configured initial tier index.
        index: usize,
        /// The number of configured tiers.
        tier_count: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyTierList => {
                write!(f, "Tier list must contain at least one rate")
            }
            ConfigError::NonPositiveTier { index, value } => {
                write!(f, "Tier {index} has non-positive rate {value}")
            }
            ConfigError::UnorderedTiers { index } => {
                write!(f, "Tier {index} is not greater than its predecessor")
            }
            ConfigError::ThresholdOutOfRange { low, high } => {
                write!(
                    f,
                    "Thresholds must lie in [0, 1], got low={low}, high={high}"
                )
            }
            ConfigError::ThresholdOrder { low, high } => {
                write!(
                    f,
                    "Low threshold must be strictly below high threshold, got low={low}, high={high}"
                )
            }
            ConfigError::InitialTierOutOfRange { index, tier_count } => {
                write!(
                    f,
                    "Initial tier index {index} out of range for {tier_count} tiers"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(CadenceConfig::default().validate(), Ok(()));
    }

    #[test]
    fn new_starts_at_highest_tier() {
        let config = CadenceConfig::new(vec![15.0, 30.0, 60.0], 0.5, 0.3);
        assert_eq!(config.initial_tier, 2);
        assert_eq!(config.validate(), Ok(()));

        let lowest = config.with_initial_tier(0);
        assert_eq!(lowest.initial_tier, 0);
        assert_eq!(lowest.validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_tier_list() {
        let config = CadenceConfig::new(vec![], 0.5, 0.3);
        assert_eq!(config.validate(), Err(ConfigError::EmptyTierList));
    }

    #[test]
    fn rejects_non_positive_tier() {
        let config = CadenceConfig::new(vec![0.0, 30.0], 0.5, 0.3);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveTier { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_unordered_tiers() {
        let config = CadenceConfig::new(vec![30.0, 15.0, 60.0], 0.5, 0.3);
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnorderedTiers { index: 1 })
        );

        let duplicated = CadenceConfig::new(vec![30.0, 30.0], 0.5, 0.3);
        assert_eq!(
            duplicated.validate(),
            Err(ConfigError::UnorderedTiers { index: 1 })
        );
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let config = CadenceConfig::new(vec![15.0, 30.0], 0.3, 0.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOrder { .. })
        ));

        let equal = CadenceConfig::new(vec![15.0, 30.0], 0.4, 0.4);
        assert!(matches!(
            equal.validate(),
            Err(ConfigError::ThresholdOrder { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        let config = CadenceConfig::new(vec![15.0, 30.0], 1.5, 0.3);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOutOfRange { .. })
        ));

        let negative = CadenceConfig::new(vec![15.0, 30.0], 0.5, -0.1);
        assert!(matches!(
            negative.validate(),
            Err(ConfigError::ThresholdOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_initial_tier() {
        let config = CadenceConfig::new(vec![15.0, 30.0], 0.5, 0.3).with_initial_tier(5);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InitialTierOutOfRange {
                index: 5,
                tier_count: 2
            })
        );
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = CadenceConfig::new(vec![24.0, 48.0], 0.6, 0.2).with_initial_tier(0);
        let json = serde_json::to_string(&config).expect("serialization should succeed");
        let back: CadenceConfig =
            serde_json::from_str(&json).expect("deserialization should succeed");
        assert_eq!(back, config);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: CadenceConfig =
            serde_json::from_str(r#"{"high_threshold": 0.7}"#).expect("partial config");
        assert_eq!(config.high_threshold, 0.7);
        assert_eq!(config.tiers, vec![15.0, 30.0, 60.0]);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = CadenceConfig::new(vec![15.0, 30.0], 0.3, 0.5)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("strictly below"));
    }
}
