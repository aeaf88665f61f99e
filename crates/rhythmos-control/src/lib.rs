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

//! # Rhythmos Control
//!
//! The adaptive layer of the frame-cadence controller. Each tick it scores
//! how much the scene changed since the previous frame by diffing occupancy
//! quadtrees, feeds the score through a hysteresis state machine over
//! discrete rate tiers, and writes the resulting target rate back into the
//! pacer owned by the render-loop driver.

#![warn(missing_docs)]

pub mod config;
pub mod controller;
pub mod governor;
pub mod score;

pub use config::{CadenceConfig, ConfigError};
pub use controller::{CadenceController, ScreenBoundsSource};
pub use governor::RateGovernor;
