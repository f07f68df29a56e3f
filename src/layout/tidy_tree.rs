//! Buchheim-Junger-Leipert tidy tree layout algorithm.
//!
//! Implements the O(n) algorithm from "Improving Walker's Algorithm to Run in
//! Linear Time" (Buchheim, Junger, Leipert, 2002) for laying out arbitrary
//! m-ary trees with compact, aesthetically pleasing positioning.
//!
//! The algorithm produces a sibling-axis coordinate `x` and a depth-axis
//! coordinate `y` per node. `x` is measured in multiples of
//! [`TidyTreeConfig::node_spacing`] with the root at 0, and
//! `y = depth * level_spacing`.
//!
//! # Algorithm Overview
//!
//! 1. **First walk (bottom-up):** In post-order, assign preliminary x-coordinates
//!    to each node by merging subtree contours. Uses threads for O(1) amortized
//!    contour traversal.
//! 2. **Second walk (top-down):** Apply accumulated modifiers to convert
//!    preliminary x-coordinates to final positions.
//! 3. **Scaling:** Multiply by node and level spacing.

use serde::{Deserialize, Serialize};

use crate::error::{LineageError, Result};
use crate::graph::Identifier;
use crate::hierarchy::HierarchyNode;

/// Configuration for the tidy tree layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TidyTreeConfig {
    /// Sibling-axis distance for one unit of separation.
    pub node_spacing: f32,
    /// Depth-axis distance between tree levels.
    pub level_spacing: f32,
    /// Separation (in node_spacing units) between nodes sharing a parent.
    pub sibling_separation: f32,
    /// Separation (in node_spacing units) between neighbouring subtrees.
    pub subtree_separation: f32,
}

impl Default for TidyTreeConfig {
    fn default() -> Self {
        Self {
            node_spacing: 100.0,
            level_spacing: 200.0,
            sibling_separation: 1.0,
            subtree_separation: 2.0,
        }
    }
}

impl TidyTreeConfig {
    /// Reject spacings that would collapse or flip the layout.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("nodeSpacing", self.node_spacing),
            ("levelSpacing", self.level_spacing),
            ("siblingSeparation", self.sibling_separation),
            ("subtreeSeparation", self.subtree_separation),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(LineageError::invalid_config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Internal node data used during the Buchheim algorithm.
#[derive(Debug)]
struct LayoutNode {
    /// Depth in the tree (root = 0).
    depth: u32,
    /// Parent layout index (None for root).
    parent: Option<usize>,
    /// Children in hierarchy order.
    children: Vec<usize>,
    /// Preliminary x-coordinate (from first walk).
    prelim: f32,
    /// Modifier for subtree shift (accumulated in first walk, applied in second).
    modifier: f32,
    /// Contour thread for leaves (next node on the left or right contour).
    thread: Option<usize>,
    /// Ancestor pointer used to find the greatest distinct ancestors.
    ancestor: usize,
    /// Default ancestor for apportioning this node's children.
    default_ancestor: Option<usize>,
    /// Shift value for even spacing of intermediate children.
    shift: f32,
    /// Change value for even spacing of intermediate children.
    change: f32,
    /// Number (left-to-right index among siblings).
    number: usize,
}

/// One laid-out node, tree-relative.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutNode {
    pub id: Identifier,
    /// Index of the parent in [`TidyTreeResult::nodes`].
    pub parent: Option<usize>,
    pub depth: u32,
    /// Sibling-axis coordinate.
    pub x: f32,
    /// Depth-axis coordinate.
    pub y: f32,
}

/// Result of the tidy tree layout computation.
#[derive(Debug, Clone)]
pub struct TidyTreeResult {
    /// Nodes in pre-order; index 0 is the root.
    pub nodes: Vec<LaidOutNode>,
}

/// The tidy tree layout engine.
pub struct TidyTreeLayout {
    config: TidyTreeConfig,
}

impl TidyTreeLayout {
    /// Create a new tidy tree layout with the given configuration.
    pub fn new(config: TidyTreeConfig) -> Self {
        Self { config }
    }

    /// Create a tidy tree layout with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TidyTreeConfig::default())
    }

    /// Compute the tidy tree layout for one tree.
    ///
    /// All walks run over the pre-order arena with explicit loops, so tree
    /// depth is bounded by memory rather than by the call stack.
    pub fn compute(&self, tree: &HierarchyNode) -> TidyTreeResult {
        let (mut layout_nodes, ids) = Self::build_layout_tree(tree);

        // Run Buchheim's algorithm
        for v in Self::post_order(&layout_nodes) {
            self.first_walk(v, &mut layout_nodes);
        }
        let final_x = Self::second_walk(&layout_nodes);

        let nodes = layout_nodes
            .iter()
            .zip(ids)
            .zip(final_x)
            .map(|((node, id), x)| LaidOutNode {
                id: id.clone(),
                parent: node.parent,
                depth: node.depth,
                x: x * self.config.node_spacing,
                y: node.depth as f32 * self.config.level_spacing,
            })
            .collect();

        TidyTreeResult { nodes }
    }

    /// Flatten the hierarchy into the arena in pre-order.
    fn build_layout_tree(tree: &HierarchyNode) -> (Vec<LayoutNode>, Vec<&Identifier>) {
        let size = tree.size();
        let mut layout_nodes: Vec<LayoutNode> = Vec::with_capacity(size);
        let mut ids: Vec<&Identifier> = Vec::with_capacity(size);

        // (node, parent index, depth, sibling number)
        let mut stack = vec![(tree, None, 0u32, 0usize)];
        while let Some((node, parent, depth, number)) = stack.pop() {
            let layout_idx = layout_nodes.len();
            layout_nodes.push(LayoutNode {
                depth,
                parent,
                children: Vec::new(),
                prelim: 0.0,
                modifier: 0.0,
                thread: None,
                ancestor: layout_idx,
                default_ancestor: None,
                shift: 0.0,
                change: 0.0,
                number,
            });
            ids.push(&node.id);

            // Siblings pop left to right, each after its left neighbour's subtree
            if let Some(parent) = parent {
                layout_nodes[parent].children.push(layout_idx);
            }
            stack.extend(
                node.children()
                    .iter()
                    .enumerate()
                    .rev()
                    .map(|(number, child)| (child, Some(layout_idx), depth + 1, number)),
            );
        }

        (layout_nodes, ids)
    }

    /// Left-to-right post-order: every subtree is finished before its right
    /// sibling starts, and children before their parent.
    fn post_order(nodes: &[LayoutNode]) -> Vec<usize> {
        let mut order = Vec::with_capacity(nodes.len());
        let mut stack = vec![0];
        while let Some(v) = stack.pop() {
            order.push(v);
            stack.extend(nodes[v].children.iter().copied());
        }
        order.reverse();
        order
    }

    /// Buchheim first walk for one node whose children are already placed.
    fn first_walk(&self, v: usize, nodes: &mut [LayoutNode]) {
        let left_sibling = Self::left_sibling(v, nodes);

        let first = nodes[v].children.first().copied();
        let last = nodes[v].children.last().copied();
        if let (Some(first), Some(last)) = (first, last) {
            // Distribute extra space evenly among intermediate children
            self.execute_shifts(v, nodes);

            let midpoint = (nodes[first].prelim + nodes[last].prelim) / 2.0;
            match left_sibling {
                Some(w) => {
                    nodes[v].prelim = nodes[w].prelim + self.separation(v, w, nodes);
                    nodes[v].modifier = nodes[v].prelim - midpoint;
                }
                None => nodes[v].prelim = midpoint,
            }
        } else if let Some(w) = left_sibling {
            nodes[v].prelim = nodes[w].prelim + self.separation(v, w, nodes);
        }

        if let Some(parent) = nodes[v].parent {
            let default_ancestor = nodes[parent]
                .default_ancestor
                .or_else(|| nodes[parent].children.first().copied())
                .unwrap_or(v);
            let next = self.apportion(v, left_sibling, default_ancestor, nodes);
            nodes[parent].default_ancestor = Some(next);
        }
    }

    fn left_sibling(v: usize, nodes: &[LayoutNode]) -> Option<usize> {
        let parent = nodes[v].parent?;
        let number = nodes[v].number.checked_sub(1)?;
        nodes[parent].children.get(number).copied()
    }

    /// Minimum separation between two contour nodes, in node_spacing units.
    fn separation(&self, a: usize, b: usize, nodes: &[LayoutNode]) -> f32 {
        if self.are_siblings(a, b, nodes) {
            self.config.sibling_separation
        } else {
            self.config.subtree_separation
        }
    }

    /// Check if two layout nodes are siblings (share the same parent).
    fn are_siblings(&self, a: usize, b: usize, nodes: &[LayoutNode]) -> bool {
        nodes[a].parent.is_some() && nodes[a].parent == nodes[b].parent
    }

    /// Get the next node on the right contour of a subtree.
    fn next_right(&self, v: usize, nodes: &[LayoutNode]) -> Option<usize> {
        match nodes[v].children.last() {
            Some(&last_child) => Some(last_child),
            None => nodes[v].thread,
        }
    }

    /// Get the next node on the left contour of a subtree.
    fn next_left(&self, v: usize, nodes: &[LayoutNode]) -> Option<usize> {
        match nodes[v].children.first() {
            Some(&first_child) => Some(first_child),
            None => nodes[v].thread,
        }
    }

    /// Apportion: push `v`'s subtree right until it clears everything to its
    /// left, and thread the shorter contour onto the longer one.
    ///
    /// This is the core of Buchheim's linear-time improvement over Walker's algorithm.
    fn apportion(
        &self,
        v: usize,
        left_sibling: Option<usize>,
        mut default_ancestor: usize,
        nodes: &mut [LayoutNode],
    ) -> usize {
        let Some(w) = left_sibling else {
            return default_ancestor;
        };
        let Some(parent) = nodes[v].parent else {
            return default_ancestor;
        };

        // inner/outer contours of the right (v) and left (siblings) parts
        let mut v_inner_right = v;
        let mut v_outer_right = v;
        let mut v_inner_left = w;
        let mut v_outer_left = nodes[parent].children.first().copied().unwrap_or(w);

        let mut s_inner_right = nodes[v_inner_right].modifier;
        let mut s_outer_right = nodes[v_outer_right].modifier;
        let mut s_inner_left = nodes[v_inner_left].modifier;
        let mut s_outer_left = nodes[v_outer_left].modifier;

        loop {
            let next_inner_left = self.next_right(v_inner_left, nodes);
            let next_inner_right = self.next_left(v_inner_right, nodes);

            let (Some(il), Some(ir)) = (next_inner_left, next_inner_right) else {
                if let Some(il) = next_inner_left {
                    if self.next_right(v_outer_right, nodes).is_none() {
                        nodes[v_outer_right].thread = Some(il);
                        nodes[v_outer_right].modifier += s_inner_left - s_outer_right;
                    }
                }
                if let Some(ir) = next_inner_right {
                    if self.next_left(v_outer_left, nodes).is_none() {
                        nodes[v_outer_left].thread = Some(ir);
                        nodes[v_outer_left].modifier += s_inner_right - s_outer_left;
                        default_ancestor = v;
                    }
                }
                break;
            };

            let (Some(ol), Some(or)) = (
                self.next_left(v_outer_left, nodes),
                self.next_right(v_outer_right, nodes),
            ) else {
                break;
            };

            v_inner_left = il;
            v_inner_right = ir;
            v_outer_left = ol;
            v_outer_right = or;

            nodes[v_outer_right].ancestor = v;

            let shift = (nodes[v_inner_left].prelim + s_inner_left)
                - (nodes[v_inner_right].prelim + s_inner_right)
                + self.separation(v_inner_left, v_inner_right, nodes);

            if shift > 0.0 {
                let ancestor = self.next_ancestor(v_inner_left, v, default_ancestor, nodes);
                self.move_subtree(ancestor, v, shift, nodes);
                s_inner_right += shift;
                s_outer_right += shift;
            }

            s_inner_left += nodes[v_inner_left].modifier;
            s_inner_right += nodes[v_inner_right].modifier;
            s_outer_left += nodes[v_outer_left].modifier;
            s_outer_right += nodes[v_outer_right].modifier;
        }

        default_ancestor
    }

    /// The greatest distinct ancestor of `v_inner_left` among `v`'s left
    /// siblings, or the default ancestor if it lies outside that sibling group.
    fn next_ancestor(
        &self,
        v_inner_left: usize,
        v: usize,
        default_ancestor: usize,
        nodes: &[LayoutNode],
    ) -> usize {
        let candidate = nodes[v_inner_left].ancestor;
        if nodes[candidate].parent == nodes[v].parent {
            candidate
        } else {
            default_ancestor
        }
    }

    /// Move subtree: shift node wr and record spacing for the siblings between wl and wr.
    fn move_subtree(&self, wl: usize, wr: usize, shift: f32, nodes: &mut [LayoutNode]) {
        let subtrees = nodes[wr].number.saturating_sub(nodes[wl].number).max(1) as f32;
        let per_subtree = shift / subtrees;

        nodes[wr].change -= per_subtree;
        nodes[wr].shift += shift;
        nodes[wl].change += per_subtree;
        nodes[wr].prelim += shift;
        nodes[wr].modifier += shift;
    }

    /// Execute accumulated shifts for children of node v.
    fn execute_shifts(&self, v: usize, nodes: &mut [LayoutNode]) {
        // Clone children indices to avoid borrow conflict
        let children: Vec<usize> = nodes[v].children.clone();
        let mut shift = 0.0f32;
        let mut change = 0.0f32;

        for &child in children.iter().rev() {
            nodes[child].prelim += shift;
            nodes[child].modifier += shift;
            change += nodes[child].change;
            shift += nodes[child].shift + change;
        }
    }

    /// Second walk: apply accumulated modifiers to get final x-coordinates.
    ///
    /// Pre-order guarantees a parent's modifier sum is known before its
    /// children are visited. The root is shifted to 0.
    fn second_walk(nodes: &[LayoutNode]) -> Vec<f32> {
        let mut modifier_sums = vec![0.0f32; nodes.len()];
        let mut final_x = vec![0.0f32; nodes.len()];
        if let Some(root) = nodes.first() {
            modifier_sums[0] = -root.prelim;
        }

        for (v, node) in nodes.iter().enumerate() {
            final_x[v] = node.prelim + modifier_sums[v];
            let child_sum = modifier_sums[v] + node.modifier;
            for &child in &node.children {
                modifier_sums[child] = child_sum;
            }
        }
        final_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str) -> HierarchyNode {
        HierarchyNode::leaf(id)
    }

    fn node(id: &str, children: Vec<HierarchyNode>) -> HierarchyNode {
        HierarchyNode::branch(id, children)
    }

    fn find<'r>(result: &'r TidyTreeResult, id: &str) -> &'r LaidOutNode {
        let id = Identifier::from(id);
        result.nodes.iter().find(|n| n.id == id).unwrap()
    }

    /// Every pair of nodes on the same level must be at least one node
    /// spacing apart.
    fn assert_levels_separated(result: &TidyTreeResult, min_gap: f32) {
        let max_depth = result.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        for depth in 0..=max_depth {
            let mut xs: Vec<f32> = result
                .nodes
                .iter()
                .filter(|n| n.depth == depth)
                .map(|n| n.x)
                .collect();
            xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
            for pair in xs.windows(2) {
                assert!(
                    pair[1] - pair[0] >= min_gap - 0.01,
                    "Nodes at depth {depth} overlap: {} and {}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    /// Every parent sits midway between its first and last child.
    fn assert_parents_centered(result: &TidyTreeResult) {
        for (idx, parent) in result.nodes.iter().enumerate() {
            let xs: Vec<f32> = result
                .nodes
                .iter()
                .filter(|n| n.parent == Some(idx))
                .map(|n| n.x)
                .collect();
            if let (Some(first), Some(last)) = (xs.first(), xs.last()) {
                let midpoint = (first + last) / 2.0;
                assert!(
                    (parent.x - midpoint).abs() < 0.01,
                    "{} at {} should be centered at {midpoint}",
                    parent.id,
                    parent.x
                );
            }
        }
    }

    #[test]
    fn test_single_node() {
        let layout = TidyTreeLayout::with_defaults();
        let result = layout.compute(&leaf("A"));

        assert_eq!(result.nodes.len(), 1);
        assert_eq!(result.nodes[0].x, 0.0);
        assert_eq!(result.nodes[0].y, 0.0);
        assert_eq!(result.nodes[0].parent, None);
    }

    #[test]
    fn test_simple_tree() {
        let layout = TidyTreeLayout::with_defaults();
        let result = layout.compute(&node("A", vec![leaf("B"), leaf("C")]));

        assert_eq!(result.nodes.len(), 3);

        let root = find(&result, "A");
        let b = find(&result, "B");
        let c = find(&result, "C");

        // Root stays at the origin, children straddle it one spacing apart
        assert!(root.x.abs() < 0.01);
        assert!((b.x + 50.0).abs() < 0.01, "B x should be -50, got {}", b.x);
        assert!((c.x - 50.0).abs() < 0.01, "C x should be 50, got {}", c.x);

        assert!(root.y.abs() < 0.01);
        assert!((b.y - 200.0).abs() < 0.01);
        assert!((c.y - 200.0).abs() < 0.01);
    }

    #[test]
    fn test_siblings_keep_traversal_order() {
        let layout = TidyTreeLayout::with_defaults();
        let result = layout.compute(&node("R", vec![leaf("c"), leaf("a"), leaf("b")]));

        let xs: Vec<f32> = ["c", "a", "b"].iter().map(|id| find(&result, id).x).collect();
        assert!(xs[0] < xs[1] && xs[1] < xs[2], "Order not preserved: {xs:?}");
    }

    #[test]
    fn test_deeper_tree() {
        let layout = TidyTreeLayout::new(TidyTreeConfig {
            level_spacing: 50.0,
            ..Default::default()
        });

        // 0 → 1, 0 → 2, 1 → 3, 1 → 4, 2 → 5
        let tree = node(
            "0",
            vec![node("1", vec![leaf("3"), leaf("4")]), node("2", vec![leaf("5")])],
        );
        let result = layout.compute(&tree);

        assert_eq!(result.nodes.len(), 6);
        assert!(find(&result, "0").y.abs() < 0.01, "Root at depth 0");
        assert!((find(&result, "1").y - 50.0).abs() < 0.01, "Node 1 at depth 1");
        assert!((find(&result, "2").y - 50.0).abs() < 0.01, "Node 2 at depth 1");
        for id in ["3", "4", "5"] {
            assert!((find(&result, id).y - 100.0).abs() < 0.01, "Node {id} at depth 2");
        }

        assert_levels_separated(&result, 100.0);
        assert_parents_centered(&result);
    }

    #[test]
    fn test_cousins_use_subtree_separation() {
        let layout = TidyTreeLayout::with_defaults();
        let tree = node(
            "R",
            vec![node("A", vec![leaf("A1")]), node("B", vec![leaf("B1")])],
        );
        let result = layout.compute(&tree);

        let gap = find(&result, "B1").x - find(&result, "A1").x;
        assert!(gap >= 200.0 - 0.01, "Cousins should be two spacings apart, got {gap}");
    }

    #[test]
    fn test_asymmetric_tree() {
        let layout = TidyTreeLayout::new(TidyTreeConfig {
            level_spacing: 50.0,
            ..Default::default()
        });

        // Left subtree deeper than right: 0 → 1, 0 → 2, 1 → 3, 3 → 4
        let tree = node(
            "0",
            vec![node("1", vec![node("3", vec![leaf("4")])]), leaf("2")],
        );
        let result = layout.compute(&tree);

        assert!(
            (find(&result, "4").y - 150.0).abs() < 0.01,
            "Deep node at depth 3, got {}",
            find(&result, "4").y
        );

        let left_max_x = find(&result, "1")
            .x
            .max(find(&result, "3").x)
            .max(find(&result, "4").x);
        let right_min_x = find(&result, "2").x;
        assert!(
            left_max_x < right_min_x,
            "Subtrees should not overlap: left max x = {left_max_x}, right min x = {right_min_x}"
        );
    }

    #[test]
    fn test_small_subtrees_between_wide_ones_are_spread() {
        let layout = TidyTreeLayout::with_defaults();
        let wide = |id: &str| {
            node(
                id,
                (0..4).map(|i| leaf(&format!("{id}{i}"))).collect(),
            )
        };
        let tree = node("R", vec![wide("L"), leaf("m1"), leaf("m2"), wide("W")]);
        let result = layout.compute(&tree);

        assert_levels_separated(&result, 100.0);
        assert_parents_centered(&result);

        // middle leaves are evenly distributed between the wide subtrees
        let l = find(&result, "L").x;
        let m1 = find(&result, "m1").x;
        let m2 = find(&result, "m2").x;
        let w = find(&result, "W").x;
        assert!(((m1 - l) - (m2 - m1)).abs() < 0.01);
        assert!(((m2 - m1) - (w - m2)).abs() < 0.01);
    }

    #[test]
    fn test_large_hierarchical_tree() {
        // Asymmetric branching: some nodes get 0 children, some get many
        fn grow(id: u32, depth: u32) -> HierarchyNode {
            let count = if depth >= 5 {
                0
            } else {
                match id % 5 {
                    0 => 4,
                    1 => 3,
                    2 => 2,
                    3 => 1,
                    _ => 0,
                }
            };
            let children = (0..count).map(|i| grow(id * 7 + i + 1, depth + 1)).collect();
            HierarchyNode::branch(format!("n{id}_{depth}"), children)
        }

        let tree = grow(0, 0);
        let layout = TidyTreeLayout::with_defaults();
        let result = layout.compute(&tree);

        assert_eq!(result.nodes.len(), tree.size());
        assert_levels_separated(&result, 100.0);
        assert_parents_centered(&result);
    }

    #[test]
    fn test_three_children_straddle_root() {
        let layout = TidyTreeLayout::with_defaults();
        let result = layout.compute(&node("A", vec![leaf("B"), leaf("C"), leaf("D")]));
        assert!((find(&result, "B").x + 100.0).abs() < 0.01);
        assert!(find(&result, "C").x.abs() < 0.01);
        assert!((find(&result, "D").x - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_very_deep_chain() {
        let depth = 8_000;
        let mut tree = leaf(&format!("n{}", depth - 1));
        for i in (0..depth - 1).rev() {
            tree = node(&format!("n{i}"), vec![tree]);
        }

        let layout = TidyTreeLayout::with_defaults();
        let result = layout.compute(&tree);

        assert_eq!(result.nodes.len(), depth);
        assert!(result.nodes.iter().all(|n| n.x.abs() < 0.01), "a chain stays on one line");
        let last = &result.nodes[depth - 1];
        assert_eq!(last.depth as usize, depth - 1);
        assert_eq!(last.parent, Some(depth - 2));
        assert!((last.y - (depth - 1) as f32 * 200.0).abs() < 1.0);
    }

    #[test]
    fn test_wide_fan_out() {
        let width = 2_000;
        let tree = node(
            "R",
            (0..width).map(|i| leaf(&format!("c{i}"))).collect(),
        );

        let layout = TidyTreeLayout::with_defaults();
        let result = layout.compute(&tree);

        assert_eq!(result.nodes.len(), width + 1);
        assert_levels_separated(&result, 100.0);
        assert_parents_centered(&result);

        let first = find(&result, "c0").x;
        let last = find(&result, &format!("c{}", width - 1)).x;
        assert!((last - first - (width - 1) as f32 * 100.0).abs() < 1.0);
    }

    #[test]
    fn test_deep_subtrees_under_wide_root() {
        // Several long chains side by side: contours are threaded across
        // thousands of levels.
        let chain = |name: &str, len: usize| {
            let mut tree = leaf(&format!("{name}{}", len - 1));
            for i in (0..len - 1).rev() {
                tree = node(&format!("{name}{i}"), vec![tree]);
            }
            tree
        };
        let tree = node("R", vec![chain("a", 3_000), chain("b", 1_000), chain("c", 3_000)]);

        let layout = TidyTreeLayout::with_defaults();
        let result = layout.compute(&tree);

        assert_eq!(result.nodes.len(), 7_001);
        assert_parents_centered(&result);
        let a = find(&result, "a2999").x;
        let c = find(&result, "c2999").x;
        assert!(c - a >= 200.0 - 0.01, "chains a and c must stay apart, got {}", c - a);
    }

    #[test]
    fn test_validate_rejects_bad_spacing() {
        let config = TidyTreeConfig {
            node_spacing: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LineageError::InvalidConfig { .. })
        ));

        let config = TidyTreeConfig {
            level_spacing: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(TidyTreeConfig::default().validate().is_ok());
    }
}
