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

//! Provides the axis-aligned 2D rectangle used for screen-space footprints.
//!
//! Tracked renderables report their footprint each frame as a `Rect2` in
//! normalized clip space. The quadtree build consumes these rectangles through
//! the cheap [`Rect2::probes`] presence test.

use serde::{Deserialize, Serialize};

use super::Vec2;

/// Represents an axis-aligned 2D rectangle.
///
/// A `Rect2` is defined by its minimum and maximum corner points. It is the
/// screen-space footprint primitive for the spatial quadtree and is cheap to
/// copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Rect2 {
    /// The corner of the rectangle with the smallest coordinates on both axes.
    pub min: Vec2,
    /// The corner of the rectangle with the largest coordinates on both axes.
    pub max: Vec2,
}

impl Rect2 {
    /// An invalid `Rect2` where `min` components are positive infinity and `max` are negative infinity.
    ///
    /// This is the canonical representation of a degenerate/empty footprint.
    /// Merging any valid `Rect2` with `INVALID` yields that valid `Rect2`, and
    /// invalid rectangles are excluded from spatial insertion.
    pub const INVALID: Self = Self {
        min: Vec2::new(f32::INFINITY, f32::INFINITY),
        max: Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
    };

    /// Creates a new `Rect2` from two corner points.
    ///
    /// This constructor automatically ensures that the `min` field holds the
    /// component-wise minimum and `max` holds the component-wise maximum,
    /// regardless of the order the points are passed in.
    #[inline]
    pub fn from_min_max(min_pt: Vec2, max_pt: Vec2) -> Self {
        Self {
            min: Vec2::new(min_pt.x.min(max_pt.x), min_pt.y.min(max_pt.y)),
            max: Vec2::new(min_pt.x.max(max_pt.x), min_pt.y.max(max_pt.y)),
        }
    }

    /// Creates a new `Rect2` from a center point and its half-extents.
    ///
    /// The half-extents represent the distance from the center to the edges of
    /// the rectangle. The provided `half_extents` will be made non-negative.
    #[inline]
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        let safe_half_extents = half_extents.abs();
        Self {
            min: center - safe_half_extents,
            max: center + safe_half_extents,
        }
    }

    /// Creates a degenerate `Rect2` containing a single point (min and max are the same).
    #[inline]
    pub fn from_point(point: Vec2) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Creates a `Rect2` that tightly encloses a given set of points.
    ///
    /// # Returns
    ///
    /// Returns `Some(Rect2)` if the input slice is not empty, otherwise `None`.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut min_pt = points[0];
        let mut max_pt = points[0];

        for point in points.iter().skip(1) {
            min_pt.x = min_pt.x.min(point.x);
            min_pt.y = min_pt.y.min(point.y);

            max_pt.x = max_pt.x.max(point.x);
            max_pt.y = max_pt.y.max(point.y);
        }

        Some(Self {
            min: min_pt,
            max: max_pt,
        })
    }

    /// Calculates the center point of the `Rect2`.
    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Calculates the half-extents (half the size on each axis) of the `Rect2`.
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Calculates the full size (width, height) of the `Rect2`.
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Checks if the `Rect2` is valid (i.e., `min` <= `max` on both axes).
    /// Degenerate rectangles where `min == max` are considered valid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Checks if a point is contained within or on the boundary of the `Rect2`.
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Performs the cheap corner presence probe against another `Rect2`.
    ///
    /// Returns `true` iff any corner of `self` lies inside `other`, or any
    /// corner of `other` lies inside `self`. This is NOT an exact overlap
    /// test: two rectangles crossing each other without either containing a
    /// corner of the other are reported as non-probing. The quadtree build
    /// relies on exactly this behavior for quadrant presence, so it must not
    /// be replaced by a separating-axis test.
    ///
    /// Invalid rectangles never probe anything.
    pub fn probes(&self, other: &Rect2) -> bool {
        if !self.is_valid() || !other.is_valid() {
            return false;
        }
        for corner in self.corners() {
            if other.contains_point(corner) {
                return true;
            }
        }
        for corner in other.corners() {
            if self.contains_point(corner) {
                return true;
            }
        }
        false
    }

    /// Returns the four corners of the rectangle.
    ///
    /// Order: min, (max.x, min.y), (min.x, max.y), max.
    #[inline]
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            Vec2::new(self.min.x, self.max.y),
            self.max,
        ]
    }

    /// Creates a new `Rect2` that encompasses both this `Rect2` and another one.
    #[inline]
    pub fn merge(&self, other: &Rect2) -> Self {
        Self {
            min: Vec2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vec2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

impl Default for Rect2 {
    /// Returns the default `Rect2`, which is `Rect2::INVALID`.
    #[inline]
    fn default() -> Self {
        Self::INVALID
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    fn vec2_approx_eq(a: Vec2, b: Vec2) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
    }

    #[test]
    fn test_rect2_from_min_max() {
        let rect = Rect2::from_min_max(Vec2::new(1.0, 2.0), Vec2::new(4.0, 5.0));
        assert_eq!(rect.min, Vec2::new(1.0, 2.0));
        assert_eq!(rect.max, Vec2::new(4.0, 5.0));

        // Test swapped min/max
        let rect_swapped = Rect2::from_min_max(Vec2::new(4.0, 5.0), Vec2::new(1.0, 2.0));
        assert_eq!(rect_swapped.min, Vec2::new(1.0, 2.0));
        assert_eq!(rect_swapped.max, Vec2::new(4.0, 5.0));
    }

    #[test]
    fn test_rect2_from_center_half_extents() {
        let rect = Rect2::from_center_half_extents(Vec2::new(10.0, 20.0), Vec2::new(1.0, 2.0));
        assert_eq!(rect.min, Vec2::new(9.0, 18.0));
        assert_eq!(rect.max, Vec2::new(11.0, 22.0));

        // Negative half-extents are made non-negative.
        let rect_neg = Rect2::from_center_half_extents(Vec2::ZERO, Vec2::new(-1.0, -1.0));
        assert_eq!(rect_neg.min, Vec2::new(-1.0, -1.0));
        assert_eq!(rect_neg.max, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_rect2_from_points() {
        assert!(Rect2::from_points(&[]).is_none());

        let points = [
            Vec2::new(1.0, 5.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(4.0, 8.0),
        ];
        let rect = Rect2::from_points(&points).unwrap();

        assert_eq!(rect.min, Vec2::new(0.0, 2.0));
        assert_eq!(rect.max, Vec2::new(4.0, 8.0));
    }

    #[test]
    fn test_rect2_utils() {
        let rect = Rect2::from_min_max(Vec2::new(-1.0, 0.0), Vec2::new(3.0, 2.0));

        assert!(vec2_approx_eq(rect.center(), Vec2::new(1.0, 1.0)));
        assert!(vec2_approx_eq(rect.size(), Vec2::new(4.0, 2.0)));
        assert!(vec2_approx_eq(rect.half_extents(), Vec2::new(2.0, 1.0)));
        assert!(rect.is_valid());
        assert!(!Rect2::INVALID.is_valid());
        assert!(Rect2::from_point(Vec2::ZERO).is_valid());
        assert!(!Rect2::default().is_valid());
    }

    #[test]
    fn test_rect2_contains_point() {
        let rect = Rect2::from_min_max(Vec2::ZERO, Vec2::ONE);

        // Inside
        assert!(rect.contains_point(Vec2::new(0.5, 0.5)));

        // On boundary
        assert!(rect.contains_point(Vec2::new(0.0, 0.5)));
        assert!(rect.contains_point(Vec2::new(1.0, 0.5)));
        assert!(rect.contains_point(Vec2::new(0.5, 0.0)));
        assert!(rect.contains_point(Vec2::new(0.5, 1.0)));
        assert!(rect.contains_point(Vec2::ZERO));
        assert!(rect.contains_point(Vec2::ONE));

        // Outside
        assert!(!rect.contains_point(Vec2::new(1.1, 0.5)));
        assert!(!rect.contains_point(Vec2::new(-0.1, 0.5)));
        assert!(!rect.contains_point(Vec2::new(0.5, 1.1)));
        assert!(!rect.contains_point(Vec2::new(0.5, -0.1)));
    }

    #[test]
    fn test_rect2_probes_overlapping() {
        let a = Rect2::from_min_max(Vec2::ZERO, Vec2::new(2.0, 2.0));

        // Identical
        assert!(a.probes(&a));

        // Overlapping corner
        let b = Rect2::from_min_max(Vec2::new(1.0, 1.0), Vec2::new(3.0, 3.0));
        assert!(a.probes(&b));
        assert!(b.probes(&a));

        // Touching boundary
        let c = Rect2::from_min_max(Vec2::new(2.0, 0.0), Vec2::new(3.0, 2.0));
        assert!(a.probes(&c));
        assert!(c.probes(&a));

        // Fully contained (only the inner rect's corners are inside)
        let d = Rect2::from_min_max(Vec2::new(0.5, 0.5), Vec2::new(1.5, 1.5));
        assert!(a.probes(&d));
        assert!(d.probes(&a));

        // Disjoint
        let e = Rect2::from_min_max(Vec2::new(2.1, 0.0), Vec2::new(3.0, 2.0));
        assert!(!a.probes(&e));
        assert!(!e.probes(&a));
    }

    #[test]
    fn test_rect2_probes_misses_cross_overlap() {
        // A tall thin rectangle crossing a wide flat one: they overlap but
        // neither contains a corner of the other. The probe intentionally
        // reports false here.
        let tall = Rect2::from_min_max(Vec2::new(-0.1, -1.0), Vec2::new(0.1, 1.0));
        let wide = Rect2::from_min_max(Vec2::new(-1.0, -0.1), Vec2::new(1.0, 0.1));

        assert!(!tall.probes(&wide));
        assert!(!wide.probes(&tall));
    }

    #[test]
    fn test_rect2_probes_invalid_never_probes() {
        let rect = Rect2::from_min_max(Vec2::ZERO, Vec2::ONE);

        assert!(!Rect2::INVALID.probes(&rect));
        assert!(!rect.probes(&Rect2::INVALID));
        assert!(!Rect2::INVALID.probes(&Rect2::INVALID));
    }

    #[test]
    fn test_rect2_merge() {
        let a = Rect2::from_min_max(Vec2::ZERO, Vec2::ONE);
        let b = Rect2::from_min_max(Vec2::new(0.5, 0.5), Vec2::new(1.5, 1.5));
        let merged = a.merge(&b);

        assert_eq!(merged.min, Vec2::ZERO);
        assert_eq!(merged.max, Vec2::new(1.5, 1.5));

        // Merging with INVALID yields the valid rectangle.
        let merged_with_invalid = Rect2::INVALID.merge(&a);
        assert_eq!(merged_with_invalid, a);
    }
}
