//! Forest layout: one tidy tree per root, stacked on a shared canvas.
//!
//! Each tree is laid out on its own with its root at sibling coordinate 0.
//! Tree `k` of `n` is then shifted along the sibling axis by
//! `k * canvas.height / n`, so every root gets an equal band regardless of
//! how many nodes it has.
//!
//! On the canvas the depth axis runs left to right and the sibling axis top
//! to bottom: a node at `(x, y)` with offset `o` is drawn at `(y, x + o)`.

use serde::{Deserialize, Serialize};

use super::tidy_tree::{TidyTreeConfig, TidyTreeLayout};
use crate::error::{LineageError, Result};
use crate::graph::Identifier;
use crate::hierarchy::HierarchyNode;

/// Canvas dimensions the forest is stacked into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
        }
    }
}

impl CanvasSize {
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(LineageError::invalid_config(format!(
                "canvas width must be a positive number, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(LineageError::invalid_config(format!(
                "canvas height must be a positive number, got {}",
                self.height
            )));
        }
        Ok(())
    }
}

/// A canvas-space point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// A laid-out node of one tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    pub id: Identifier,
    /// Index of the parent within the tree's node list.
    pub parent: Option<usize>,
    pub depth: u32,
    /// Sibling-axis coordinate relative to the tree's own origin.
    pub x: f32,
    /// Depth-axis coordinate.
    pub y: f32,
    /// Sibling-axis offset of the tree this node belongs to.
    pub offset: f32,
}

impl PositionedNode {
    /// Sibling coordinate after stacking.
    #[inline]
    pub fn stacked_x(&self) -> f32 {
        self.x + self.offset
    }

    /// Where the node is drawn on the canvas.
    #[inline]
    pub fn canvas_point(&self) -> Point {
        Point {
            x: self.y,
            y: self.stacked_x(),
        }
    }
}

/// A parent→child connection inside one tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedLink {
    /// Node index of the parent.
    pub source: usize,
    /// Node index of the child.
    pub target: usize,
    pub source_point: Point,
    pub target_point: Point,
    /// SVG path data for the link curve.
    pub path: String,
}

impl PositionedLink {
    fn new(source: usize, target: usize, source_point: Point, target_point: Point) -> Self {
        let path = link_path(source_point, target_point);
        Self {
            source,
            target,
            source_point,
            target_point,
            path,
        }
    }
}

/// Horizontal cubic curve: leaves the source and enters the target level,
/// bending halfway along the depth axis.
pub fn link_path(source: Point, target: Point) -> String {
    let mid = (source.x + target.x) / 2.0;
    format!(
        "M{},{}C{},{} {},{} {},{}",
        source.x, source.y, mid, source.y, mid, target.y, target.x, target.y
    )
}

/// One root's laid-out tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedTree {
    pub root: Identifier,
    pub offset: f32,
    /// Nodes in pre-order; index 0 is the root.
    pub nodes: Vec<PositionedNode>,
    pub links: Vec<PositionedLink>,
}

impl PositionedTree {
    /// Smallest and largest stacked sibling coordinate.
    pub fn sibling_extent(&self) -> (f32, f32) {
        self.nodes
            .iter()
            .map(PositionedNode::stacked_x)
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), x| {
                (lo.min(x), hi.max(x))
            })
    }
}

/// All trees of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedForest {
    pub canvas: CanvasSize,
    /// Sibling-axis band given to each tree (`canvas.height / trees`).
    pub band_height: f32,
    pub trees: Vec<PositionedTree>,
}

impl PositionedForest {
    /// Total number of laid-out nodes.
    pub fn node_count(&self) -> usize {
        self.trees.iter().map(|tree| tree.nodes.len()).sum()
    }

    /// Canvas points of every node as `[x0, y0, x1, y1, ...]`, tree by tree.
    pub fn canvas_positions(&self) -> Vec<f32> {
        let mut positions = Vec::with_capacity(self.node_count() * 2);
        for node in self.trees.iter().flat_map(|tree| &tree.nodes) {
            let point = node.canvas_point();
            positions.push(point.x);
            positions.push(point.y);
        }
        positions
    }
}

/// Lays out and stacks a forest.
pub struct ForestLayout {
    tree_layout: TidyTreeLayout,
    canvas: CanvasSize,
}

impl ForestLayout {
    pub fn new(config: TidyTreeConfig, canvas: CanvasSize) -> Self {
        Self {
            tree_layout: TidyTreeLayout::new(config),
            canvas,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(TidyTreeConfig::default(), CanvasSize::default())
    }

    /// Lay out every tree and apply the per-tree stacking offset.
    pub fn compute(&self, trees: &[HierarchyNode]) -> PositionedForest {
        let band_height = if trees.is_empty() {
            self.canvas.height
        } else {
            self.canvas.height / trees.len() as f32
        };

        let trees = trees
            .iter()
            .enumerate()
            .map(|(k, tree)| self.place(tree, k as f32 * band_height))
            .collect();

        PositionedForest {
            canvas: self.canvas,
            band_height,
            trees,
        }
    }

    fn place(&self, tree: &HierarchyNode, offset: f32) -> PositionedTree {
        let result = self.tree_layout.compute(tree);

        let nodes: Vec<PositionedNode> = result
            .nodes
            .into_iter()
            .map(|node| PositionedNode {
                id: node.id,
                parent: node.parent,
                depth: node.depth,
                x: node.x,
                y: node.y,
                offset,
            })
            .collect();

        let links = nodes
            .iter()
            .enumerate()
            .filter_map(|(target, node)| {
                let source = node.parent?;
                let parent = nodes.get(source)?;
                Some(PositionedLink::new(
                    source,
                    target,
                    parent.canvas_point(),
                    node.canvas_point(),
                ))
            })
            .collect();

        PositionedTree {
            root: tree.id.clone(),
            offset,
            nodes,
            links,
        }
    }
}
