//! Layout algorithms for lineage diagrams.
//!
//! `tidy_tree` positions a single tree; `forest` runs it once per root and
//! stacks the results on one canvas.

pub mod forest;
pub mod tidy_tree;

pub use forest::{
    CanvasSize, ForestLayout, Point, PositionedForest, PositionedLink, PositionedNode,
    PositionedTree,
};
pub use tidy_tree::{TidyTreeConfig, TidyTreeLayout};
