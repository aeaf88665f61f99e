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

//! Scene dynamism scoring via quadtree structural diff.
//!
//! Two consecutive occupancy quadtrees are walked in lockstep; every quadrant
//! present in exactly one of them contributes `1 / (4 × d)`, where `d` is the
//! depth of the present child node. Coarse discrepancies (children of the
//! root, depth 1) therefore weigh 1/4 each, while localized flicker near fine
//! quadrant boundaries is down-weighted. Quadrants present in both trees are
//! recursed into; quadrants absent from both contribute nothing.
//!
//! The score is a non-negative scalar without a normalized range: only its
//! magnitude relative to the governor thresholds matters.

use rhythmos_core::spatial::{QuadTree, NULL_NODE};

/// Diffs two occupancy quadtrees into a scene dynamism score.
///
/// Both trees must have been built with the same maximum depth and view
/// rectangle. A mismatch is an internal invariant violation, not a
/// recoverable input: it is logged and `None` is returned so the caller can
/// skip governor stepping for the tick instead of faulting the render loop.
///
/// `evaluate(t, t)` is 0 for any tree, and the result is symmetric in its
/// arguments.
pub fn evaluate(prev: &QuadTree, curr: &QuadTree) -> Option<f64> {
    if prev.max_depth() != curr.max_depth() || prev.view() != curr.view() {
        log::warn!(
            "Score: trees built with mismatched parameters (max depth {} vs {}), skipping",
            prev.max_depth(),
            curr.max_depth()
        );
        return None;
    }
    diff_children(prev, prev.root(), curr, curr.root())
}

/// Scores the four child slots of a corresponding node pair.
fn diff_children(a: &QuadTree, a_index: i32, b: &QuadTree, b_index: i32) -> Option<f64> {
    let node_a = a.node(a_index);
    let node_b = b.node(b_index);

    if node_a.depth != node_b.depth {
        log::warn!(
            "Score: corresponding nodes at mismatched depths ({} vs {}), skipping",
            node_a.depth,
            node_b.depth
        );
        return None;
    }

    let child_weight = 1.0 / (4.0 * f64::from(node_a.depth + 1));
    let mut total = 0.0;

    for slot in 0..4 {
        match (node_a.children[slot], node_b.children[slot]) {
            (NULL_NODE, NULL_NODE) => {}
            (NULL_NODE, _) | (_, NULL_NODE) => total += child_weight,
            (child_a, child_b) => total += diff_children(a, child_a, b, child_b)?,
        }
    }

    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhythmos_core::math::{Rect2, Vec2};
    use rhythmos_core::spatial::DEFAULT_VIEW;

    /// A point-like footprint strictly inside the bottom-left depth-2 cell.
    fn deep_footprint() -> Rect2 {
        Rect2::from_point(Vec2::new(-0.75, -0.75))
    }

    /// A point-like footprint inside the depth-2 cell adjacent to the
    /// bottom-left one (top-right sub-cell of the bottom-left quadrant).
    fn sibling_footprint() -> Rect2 {
        Rect2::from_point(Vec2::new(-0.2, -0.2))
    }

    fn covering_rect() -> Rect2 {
        Rect2::from_min_max(Vec2::new(-2.0, -2.0), Vec2::new(2.0, 2.0))
    }

    #[test]
    fn identical_trees_score_zero() {
        let bounds = [deep_footprint(), sibling_footprint()];
        let a = QuadTree::build(&bounds, DEFAULT_VIEW, 4);
        let b = QuadTree::build(&bounds, DEFAULT_VIEW, 4);

        assert_eq!(evaluate(&a, &b), Some(0.0));
        assert_eq!(evaluate(&a, &a), Some(0.0));
    }

    #[test]
    fn root_only_trees_score_zero() {
        let a = QuadTree::build(&[], DEFAULT_VIEW, 4);
        let b = QuadTree::build(&[], DEFAULT_VIEW, 4);

        assert_eq!(evaluate(&a, &b), Some(0.0));
    }

    #[test]
    fn score_is_symmetric() {
        let a = QuadTree::build(&[deep_footprint()], DEFAULT_VIEW, 3);
        let b = QuadTree::build(&[sibling_footprint(), covering_rect()], DEFAULT_VIEW, 3);

        assert_eq!(evaluate(&a, &b), evaluate(&b, &a));
    }

    #[test]
    fn depth_one_toggle_contributes_quarter() {
        // Root-only vs a single depth-1 chain: the lone toggled quadrant is
        // a child of the root, weight 1/4. The subtree below it does not add
        // anything because absent subtrees are counted at their top node.
        let empty = QuadTree::build(&[], DEFAULT_VIEW, 1);
        let one = QuadTree::build(&[deep_footprint()], DEFAULT_VIEW, 1);

        let score = evaluate(&empty, &one).unwrap();
        assert!((score - 0.25).abs() < 1e-12, "score was {score}");
    }

    #[test]
    fn depth_two_toggle_contributes_eighth() {
        // Both trees share the depth-1 bottom-left child; only one of them
        // has the extra depth-2 cell. Toggle weight: 1 / (4 × 2).
        let prev = QuadTree::build(&[deep_footprint()], DEFAULT_VIEW, 2);
        let curr = QuadTree::build(&[deep_footprint(), sibling_footprint()], DEFAULT_VIEW, 2);

        let score = evaluate(&prev, &curr).unwrap();
        assert!((score - 0.125).abs() < 1e-12, "score was {score}");
    }

    #[test]
    fn four_coarse_toggles_sum_to_one() {
        let empty = QuadTree::build(&[], DEFAULT_VIEW, 2);
        let complete = QuadTree::build(&[covering_rect()], DEFAULT_VIEW, 2);

        // All four depth-1 quadrants toggle at 1/4 each; their subtrees are
        // not descended into.
        let score = evaluate(&empty, &complete).unwrap();
        assert!((score - 1.0).abs() < 1e-12, "score was {score}");
    }

    #[test]
    fn mismatched_max_depth_skips_scoring() {
        let a = QuadTree::build(&[deep_footprint()], DEFAULT_VIEW, 2);
        let b = QuadTree::build(&[deep_footprint()], DEFAULT_VIEW, 3);

        assert_eq!(evaluate(&a, &b), None);
    }

    #[test]
    fn mismatched_view_skips_scoring() {
        let other_view = Rect2::from_min_max(Vec2::ZERO, Vec2::ONE);
        let a = QuadTree::build(&[deep_footprint()], DEFAULT_VIEW, 2);
        let b = QuadTree::build(&[deep_footprint()], other_view, 2);

        assert_eq!(evaluate(&a, &b), None);
    }
}
