//! LineageGraph - deduplicated nodes, row-ordered links and a petgraph index.
//!
//! The graph keeps the table's view (nodes in first-seen order, links in row
//! order) next to a petgraph `StableGraph` built from the same data. The index
//! answers child, parent and root queries in O(degree) instead of filtering
//! the full link list for every node.

use indexmap::IndexSet;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use serde::{Deserialize, Serialize};

use super::identifier::Identifier;
use super::link::Link;

/// Serializable node record `{ id }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: Identifier,
}

/// Serializable `{ nodes, links }` view handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<NodeData>,
    pub links: Vec<Link>,
}

/// The extracted lineage graph.
pub struct LineageGraph {
    /// Distinct identifiers in first-seen order.
    nodes: IndexSet<Identifier>,

    /// Links in row order.
    links: Vec<Link>,

    /// Topology index. Node weights are identifiers, edge weights are the
    /// position of the link in `links`.
    index: StableGraph<Identifier, usize, Directed>,
}

impl LineageGraph {
    /// Build a graph from a node set and links whose endpoints are all in it.
    ///
    /// Link endpoints missing from `nodes` are added to the end of the set so
    /// the index never holds a dangling edge.
    pub fn new(mut nodes: IndexSet<Identifier>, links: Vec<Link>) -> Self {
        for link in &links {
            nodes.insert(link.source.clone());
            nodes.insert(link.target.clone());
        }

        let mut index = StableGraph::with_capacity(nodes.len(), links.len());
        for id in &nodes {
            index.add_node(id.clone());
        }
        for (position, link) in links.iter().enumerate() {
            // Both lookups succeed: endpoints were inserted above.
            if let (Some(source), Some(target)) = (
                nodes.get_index_of(&link.source),
                nodes.get_index_of(&link.target),
            ) {
                index.add_edge(NodeIndex::new(source), NodeIndex::new(target), position);
            }
        }

        Self {
            nodes,
            links,
            index,
        }
    }

    // =========================================================================
    // Node / Link Access
    // =========================================================================

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of links.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Iterate node identifiers in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &Identifier> {
        self.nodes.iter()
    }

    /// Links in row order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Check whether `id` is a node of this graph.
    pub fn contains(&self, id: &Identifier) -> bool {
        self.nodes.contains(id)
    }

    /// The graph's own copy of `id`, if present.
    pub fn node(&self, id: &Identifier) -> Option<&Identifier> {
        self.nodes.get(id)
    }

    fn node_index(&self, id: &Identifier) -> Option<NodeIndex> {
        self.nodes.get_index_of(id).map(NodeIndex::new)
    }

    // =========================================================================
    // Topology Queries
    // =========================================================================

    /// Children of `id` in link (row) order. Empty for unknown ids and leaves.
    pub fn children(&self, id: &Identifier) -> Vec<&Identifier> {
        let Some(index) = self.node_index(id) else {
            return Vec::new();
        };

        let mut outgoing: Vec<(usize, NodeIndex)> = self
            .index
            .edges_directed(index, Direction::Outgoing)
            .map(|edge| (*edge.weight(), edge.target()))
            .collect();
        // petgraph yields the most recently added edge first
        outgoing.sort_unstable_by_key(|&(position, _)| position);

        outgoing
            .into_iter()
            .filter_map(|(_, target)| self.index.node_weight(target))
            .collect()
    }

    /// Distinct parents of `id`, in the order of their first link.
    pub fn parents(&self, id: &Identifier) -> Vec<&Identifier> {
        let Some(index) = self.node_index(id) else {
            return Vec::new();
        };

        let mut positions: Vec<usize> = self
            .index
            .edges_directed(index, Direction::Incoming)
            .map(|edge| *edge.weight())
            .collect();
        positions.sort_unstable();

        let mut parents: IndexSet<&Identifier> = IndexSet::new();
        for position in positions {
            if let Some(link) = self.links.get(position) {
                parents.insert(&link.source);
            }
        }
        parents.into_iter().collect()
    }

    /// Nodes that are never the target of a link, in first-seen order.
    pub fn roots(&self) -> Vec<&Identifier> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|&(i, _)| {
                self.index
                    .neighbors_directed(NodeIndex::new(i), Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|(_, id)| id)
            .collect()
    }

    /// A node lying on a directed cycle, if the graph has one.
    ///
    /// Self-loops count as cycles.
    pub fn find_cycle(&self) -> Option<&Identifier> {
        petgraph::algo::toposort(&self.index, None)
            .err()
            .and_then(|cycle| self.index.node_weight(cycle.node_id()))
    }

    /// Nodes with more than one distinct parent, with those parents.
    pub fn multi_parent_nodes(&self) -> Vec<(&Identifier, Vec<&Identifier>)> {
        self.nodes
            .iter()
            .filter_map(|id| {
                let parents = self.parents(id);
                (parents.len() > 1).then_some((id, parents))
            })
            .collect()
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Serializable `{ nodes, links }` snapshot.
    pub fn to_data(&self) -> GraphData {
        GraphData {
            nodes: self
                .nodes
                .iter()
                .map(|id| NodeData { id: id.clone() })
                .collect(),
            links: self.links.clone(),
        }
    }
}
