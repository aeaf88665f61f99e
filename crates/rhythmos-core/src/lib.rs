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

//! # Rhythmos Core
//!
//! Foundational crate for the adaptive frame-cadence controller: 2D math
//! primitives, the pacing frame timer, and the arena-backed spatial quadtree
//! used to fingerprint a frame's on-screen object footprints.

#![warn(missing_docs)]

pub mod math;
pub mod spatial;
pub mod time;

pub use math::{Rect2, Vec2};
pub use spatial::QuadTree;
pub use time::{FramePacer, Stopwatch};
