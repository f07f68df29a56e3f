//! Pipeline orchestration and the replace-on-change session.
//!
//! [`compute_lineage`] is the whole transform: bind columns, extract the
//! graph, validate its structure, build one hierarchy per root and lay the
//! forest out. It is pure; the host calls it again whenever the data or the
//! column selection changes.
//!
//! [`LineageSession`] keeps the last successful output. A failed update is
//! logged and leaves the previous output in place, so the host keeps showing
//! the last good diagram.

use serde::Serialize;

use crate::config::{LineageConfig, MultiParentPolicy};
use crate::error::{LineageError, Result};
use crate::graph::{GraphData, Identifier, LineageGraph, extract_graph};
use crate::hierarchy::{HierarchyNode, build_forest};
use crate::layout::{ForestLayout, PositionedForest};
use crate::source::{ColumnSelection, ColumnSource, resolve};

/// Everything one render pass needs.
///
/// Only the flat parts are serialized. The nested hierarchies stay on the
/// Rust side; the forest carries the same shape as parent indices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineageOutput {
    pub graph: GraphData,
    pub roots: Vec<Identifier>,
    #[serde(skip)]
    pub hierarchies: Vec<HierarchyNode>,
    pub forest: PositionedForest,
}

/// Run the full pipeline on bound element data.
pub fn compute_lineage(
    selection: &ColumnSelection,
    source: &ColumnSource,
    config: &LineageConfig,
) -> Result<LineageOutput> {
    config.validate()?;
    let columns = resolve(selection, source)?;
    let graph = extract_graph(columns.parents, columns.children)?;
    lay_out_graph(&graph, config)
}

/// Validate, expand and lay out an already extracted graph.
pub fn lay_out_graph(graph: &LineageGraph, config: &LineageConfig) -> Result<LineageOutput> {
    if let Some(node) = graph.find_cycle() {
        return Err(LineageError::CycleDetected { node: node.clone() });
    }
    check_parents(graph, config.multi_parent)?;

    let hierarchies = build_forest(graph)?;
    let forest = ForestLayout::new(config.layout.clone(), config.canvas).compute(&hierarchies);

    log::debug!(
        "laid out {} nodes in {} trees (band height {})",
        forest.node_count(),
        forest.trees.len(),
        forest.band_height
    );

    Ok(LineageOutput {
        graph: graph.to_data(),
        roots: hierarchies.iter().map(|tree| tree.id.clone()).collect(),
        hierarchies,
        forest,
    })
}

fn check_parents(graph: &LineageGraph, policy: MultiParentPolicy) -> Result<()> {
    let Some((node, parents)) = graph.multi_parent_nodes().into_iter().next() else {
        return Ok(());
    };

    match policy {
        MultiParentPolicy::Reject => Err(LineageError::MultipleParents {
            node: node.clone(),
            parents: parents.into_iter().cloned().collect(),
        }),
        MultiParentPolicy::Duplicate => {
            log::warn!("node {node} has several parents; its subtree is drawn under each");
            Ok(())
        }
    }
}

/// Holds the latest lineage output across input changes.
#[derive(Debug, Default)]
pub struct LineageSession {
    config: LineageConfig,
    current: Option<LineageOutput>,
}

impl LineageSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with a validated configuration.
    pub fn with_config(config: LineageConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            current: None,
        })
    }

    pub fn config(&self) -> &LineageConfig {
        &self.config
    }

    /// Recompute from scratch and replace the stored output.
    ///
    /// On error the previous output is kept and the error is returned.
    pub fn update(
        &mut self,
        selection: &ColumnSelection,
        source: &ColumnSource,
    ) -> Result<&LineageOutput> {
        match compute_lineage(selection, source, &self.config) {
            Ok(output) => Ok(&*self.current.insert(output)),
            Err(err) => {
                log::error!("lineage update failed: {err}");
                Err(err)
            }
        }
    }

    /// The last successful output.
    pub fn output(&self) -> Option<&LineageOutput> {
        self.current.as_ref()
    }

    /// Drop the stored output.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
