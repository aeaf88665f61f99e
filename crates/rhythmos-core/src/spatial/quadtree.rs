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

//! # Occupancy Quadtree
//!
//! A fixed-depth quadtree over a frame's 2D object footprints within a
//! normalized view rectangle. The tree's *shape* is the payload: a child
//! exists for a quadrant iff some tracked footprint probes it, so diffing two
//! trees measures frame-to-frame spatial change.
//!
//! Nodes live in an arena `Vec` and reference each other by index, so the
//! whole tree is dropped in one deallocation at the end of its two-tick
//! lifetime. Parent links are diagnostic-only and never used for traversal.

use crate::math::{Rect2, Vec2};

/// Sentinel index for an absent node reference.
pub const NULL_NODE: i32 = -1;

/// Default maximum subdivision depth.
pub const DEFAULT_MAX_DEPTH: u16 = 16;

/// Default view rectangle: normalized clip space `[-1, 1]²`.
pub const DEFAULT_VIEW: Rect2 = Rect2 {
    min: Vec2::new(-1.0, -1.0),
    max: Vec2::new(1.0, 1.0),
};

/// A node in the occupancy quadtree.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadNode {
    /// Subdivision depth of this node; the root is depth 0.
    pub depth: u16,
    /// Index of the parent node. Diagnostic only, never used for traversal.
    pub parent: i32,
    /// Indices of child nodes, one per quadrant slot.
    pub children: [i32; 4],
    /// `true` iff all four children are present.
    pub full: bool,
}

impl QuadNode {
    /// Returns `true` if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children == [NULL_NODE; 4]
    }

    /// Returns the number of present children.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.iter().filter(|&&c| c != NULL_NODE).count()
    }
}

/// A fixed-depth occupancy quadtree built fresh each tick.
///
/// The root is synthetic: depth 0, no spatial test is performed for it. An
/// empty (or all-invalid) footprint set yields a valid root-only tree.
#[derive(Debug, Clone)]
pub struct QuadTree {
    nodes: Vec<QuadNode>,
    view: Rect2,
    max_depth: u16,
}

impl QuadTree {
    /// Builds a quadtree over `bounds` within `view`, subdividing to at most
    /// `max_depth`.
    ///
    /// Each quadrant is tested against the full unfiltered footprint set with
    /// the cheap corner probe ([`Rect2::probes`]); invalid footprints never
    /// probe and are thereby excluded. A quadrant that probes positive gets a
    /// child node, and the recursion descends into it with the same set until
    /// `max_depth` is reached.
    pub fn build(bounds: &[Rect2], view: Rect2, max_depth: u16) -> Self {
        let root = QuadNode {
            depth: 0,
            parent: NULL_NODE,
            children: [NULL_NODE; 4],
            full: false,
        };
        let mut tree = Self {
            nodes: vec![root],
            view,
            max_depth,
        };
        tree.subdivide(0, view, bounds);
        tree
    }

    /// Builds a quadtree with the default view and maximum depth.
    pub fn build_default(bounds: &[Rect2]) -> Self {
        Self::build(bounds, DEFAULT_VIEW, DEFAULT_MAX_DEPTH)
    }

    /// Returns the index of the root node.
    #[inline]
    pub fn root(&self) -> i32 {
        0
    }

    /// Returns the node at `index`.
    ///
    /// # Panics
    /// Panics if `index` does not refer to a node of this tree.
    #[inline]
    pub fn node(&self, index: i32) -> &QuadNode {
        &self.nodes[index as usize]
    }

    /// Returns the total number of nodes, including the root.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree consists of the root alone.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Returns the view rectangle the tree was built over.
    #[inline]
    pub fn view(&self) -> Rect2 {
        self.view
    }

    /// Returns the maximum subdivision depth the tree was built with.
    #[inline]
    pub fn max_depth(&self) -> u16 {
        self.max_depth
    }

    /// Returns the deepest node depth actually present in the tree.
    pub fn deepest(&self) -> u16 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Recursively subdivides `area` under `node`, creating a child for each
    /// quadrant that some footprint probes.
    fn subdivide(&mut self, node: i32, area: Rect2, bounds: &[Rect2]) {
        let depth = self.nodes[node as usize].depth;
        if depth >= self.max_depth {
            return;
        }

        for (slot, quadrant) in Self::quarter(area).into_iter().enumerate() {
            if bounds.iter().any(|rect| rect.probes(&quadrant)) {
                let child = self.allocate(depth + 1, node);
                self.nodes[node as usize].children[slot] = child;
                self.subdivide(child, quadrant, bounds);
            }
        }

        let full = self.nodes[node as usize]
            .children
            .iter()
            .all(|&c| c != NULL_NODE);
        self.nodes[node as usize].full = full;
    }

    /// Splits `area` into four equal sub-rectangles.
    ///
    /// Slot order: bottom-left, bottom-right, top-left, top-right.
    fn quarter(area: Rect2) -> [Rect2; 4] {
        let center = area.center();
        [
            Rect2 {
                min: area.min,
                max: center,
            },
            Rect2 {
                min: Vec2::new(center.x, area.min.y),
                max: Vec2::new(area.max.x, center.y),
            },
            Rect2 {
                min: Vec2::new(area.min.x, center.y),
                max: Vec2::new(center.x, area.max.y),
            },
            Rect2 {
                min: center,
                max: area.max,
            },
        ]
    }

    fn allocate(&mut self, depth: u16, parent: i32) -> i32 {
        let index = self.nodes.len() as i32;
        self.nodes.push(QuadNode {
            depth,
            parent,
            children: [NULL_NODE; 4],
            full: false,
        });
        index
    }
}
