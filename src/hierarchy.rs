//! Hierarchy building: nested child trees per root.
//!
//! Each root is expanded on its own. A node reachable from two roots is
//! copied into both trees; nothing is shared between roots. Expansion keeps
//! the current root-to-node path and stops with
//! [`LineageError::CycleDetected`] as soon as a node reappears on it.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{LineageError, Result};
use crate::graph::{Identifier, LineageGraph};

/// Children of a hierarchy node.
///
/// Serializes as `null` for leaves and as an array otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Children {
    /// No outgoing links.
    Leaf,
    /// One or more children, in link order. Never empty.
    Branch(Vec<HierarchyNode>),
}

/// A node of a per-root tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyNode {
    pub id: Identifier,
    pub children: Children,
}

impl HierarchyNode {
    /// Create a leaf.
    pub fn leaf(id: impl Into<Identifier>) -> Self {
        Self {
            id: id.into(),
            children: Children::Leaf,
        }
    }

    /// Create a node with the given children. An empty list yields a leaf.
    pub fn branch(id: impl Into<Identifier>, children: Vec<HierarchyNode>) -> Self {
        Self {
            id: id.into(),
            children: if children.is_empty() {
                Children::Leaf
            } else {
                Children::Branch(children)
            },
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.children, Children::Leaf)
    }

    /// Children as a slice (empty for leaves).
    pub fn children(&self) -> &[HierarchyNode] {
        match &self.children {
            Children::Leaf => &[],
            Children::Branch(children) => children,
        }
    }

    /// Number of nodes in this subtree, including itself.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children());
        }
        count
    }
}

impl Drop for HierarchyNode {
    fn drop(&mut self) {
        // Detach descendants onto a flat list so a long chain is not freed
        // one stack frame per level.
        let Children::Branch(children) = std::mem::replace(&mut self.children, Children::Leaf)
        else {
            return;
        };
        let mut pending = children;
        while let Some(mut node) = pending.pop() {
            if let Children::Branch(children) = std::mem::replace(&mut node.children, Children::Leaf) {
                pending.extend(children);
            }
        }
    }
}

/// Expand the tree below `root`.
pub fn build_hierarchy(root: &Identifier, graph: &LineageGraph) -> Result<HierarchyNode> {
    let root = graph.node(root).ok_or_else(|| LineageError::UnknownNode {
        node: root.clone(),
    })?;
    expand(root, graph)
}

/// Expand one tree per root, in root order.
pub fn build_forest(graph: &LineageGraph) -> Result<Vec<HierarchyNode>> {
    let roots = graph.roots();
    log::debug!("building {} hierarchies", roots.len());

    roots
        .into_iter()
        .map(|root| build_hierarchy(root, graph))
        .collect()
}

/// A node whose children are still being expanded.
struct Frame<'g> {
    id: &'g Identifier,
    pending: std::vec::IntoIter<&'g Identifier>,
    built: Vec<HierarchyNode>,
}

impl<'g> Frame<'g> {
    fn open(id: &'g Identifier, graph: &'g LineageGraph) -> Self {
        let pending = graph.children(id);
        Self {
            id,
            built: Vec::with_capacity(pending.len()),
            pending: pending.into_iter(),
        }
    }
}

/// Depth-first expansion with an explicit stack.
///
/// `ancestors` plus `current` is the root-to-node path; `on_path` holds the
/// same ids for constant-time cycle checks.
fn expand<'g>(root: &'g Identifier, graph: &'g LineageGraph) -> Result<HierarchyNode> {
    let mut on_path: HashSet<&'g Identifier> = HashSet::from([root]);
    let mut ancestors: Vec<Frame<'g>> = Vec::new();
    let mut current = Frame::open(root, graph);

    loop {
        if let Some(child) = current.pending.next() {
            if !on_path.insert(child) {
                return Err(LineageError::CycleDetected { node: child.clone() });
            }
            ancestors.push(std::mem::replace(&mut current, Frame::open(child, graph)));
            continue;
        }

        on_path.remove(current.id);
        let node = HierarchyNode::branch(current.id.clone(), std::mem::take(&mut current.built));
        match ancestors.pop() {
            Some(parent) => {
                current = parent;
                current.built.push(node);
            }
            None => return Ok(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::extract_graph;

    fn table(rows: &[(Option<&str>, &str)]) -> LineageGraph {
        let parents: Vec<_> = rows.iter().map(|(p, _)| p.map(Identifier::from)).collect();
        let children: Vec<_> = rows.iter().map(|(_, c)| Some(Identifier::from(*c))).collect();
        extract_graph(&parents, &children).unwrap()
    }

    #[test]
    fn test_example_hierarchies() {
        let graph = table(&[(None, "A"), (Some("A"), "B"), (Some("A"), "C"), (None, "D")]);

        let forest = build_forest(&graph).unwrap();
        assert_eq!(forest.len(), 2);
        assert_eq!(
            forest[0],
            HierarchyNode::branch("A", vec![HierarchyNode::leaf("B"), HierarchyNode::leaf("C")])
        );
        assert_eq!(forest[1], HierarchyNode::leaf("D"));
    }

    #[test]
    fn test_leaf_serializes_children_as_null() {
        let tree = HierarchyNode::branch("A", vec![HierarchyNode::leaf("B")]);
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(
            json,
            r#"{"id":"A","children":[{"id":"B","children":null}]}"#
        );
    }

    #[test]
    fn test_short_chain() {
        let graph = table(&[(Some("A"), "B"), (Some("B"), "C"), (Some("C"), "D")]);
        let tree = build_hierarchy(&Identifier::from("A"), &graph).unwrap();
        assert_eq!(tree.size(), 4);
        assert_eq!(
            tree,
            HierarchyNode::branch(
                "A",
                vec![HierarchyNode::branch(
                    "B",
                    vec![HierarchyNode::branch("C", vec![HierarchyNode::leaf("D")])]
                )]
            )
        );
    }

    #[test]
    fn test_very_deep_chain() {
        let depth = 10_000;
        let parents: Vec<_> = (0..depth)
            .map(|i| (i > 0).then(|| Identifier::from(format!("n{}", i - 1))))
            .collect();
        let children: Vec<_> = (0..depth)
            .map(|i| Some(Identifier::from(format!("n{i}"))))
            .collect();
        let graph = extract_graph(&parents, &children).unwrap();

        let forest = build_forest(&graph).unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].size(), depth);

        let mut node = &forest[0];
        let mut levels = 1;
        while let [child] = node.children() {
            node = child;
            levels += 1;
        }
        assert_eq!(levels, depth);
        assert_eq!(node.id, Identifier::from(format!("n{}", depth - 1)));
    }

    #[test]
    fn test_cycle_deep_below_root_is_detected() {
        // R -> n0 -> ... -> n2999 -> n1500
        let mut rows: Vec<(Option<String>, String)> = vec![(None, "R".into()), (Some("R".into()), "n0".into())];
        for i in 1..3000 {
            rows.push((Some(format!("n{}", i - 1)), format!("n{i}")));
        }
        rows.push((Some("n2999".into()), "n1500".into()));

        let parents: Vec<_> = rows.iter().map(|(p, _)| p.as_deref().map(Identifier::from)).collect();
        let children: Vec<_> = rows.iter().map(|(_, c)| Some(Identifier::from(c.as_str()))).collect();
        let graph = extract_graph(&parents, &children).unwrap();

        let err = build_hierarchy(&Identifier::from("R"), &graph).err().unwrap();
        assert!(matches!(err, LineageError::CycleDetected { node } if node == Identifier::from("n1500")));
    }

    #[test]
    fn test_node_under_two_roots_is_duplicated() {
        let graph = table(&[(Some("A"), "C"), (Some("B"), "C"), (Some("C"), "D")]);
        let forest = build_forest(&graph).unwrap();

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].size(), 3);
        assert_eq!(forest[1].size(), 3);
        assert_eq!(forest[0].children(), forest[1].children());
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        // D is reached twice from A but never through itself
        let graph = table(&[
            (Some("A"), "B"),
            (Some("A"), "C"),
            (Some("B"), "D"),
            (Some("C"), "D"),
        ]);
        let tree = build_hierarchy(&Identifier::from("A"), &graph).unwrap();
        assert_eq!(tree.size(), 5);
    }

    #[test]
    fn test_cycle_below_root_is_detected() {
        let graph = table(&[(None, "R"), (Some("R"), "A"), (Some("A"), "B"), (Some("B"), "A")]);
        let err = build_hierarchy(&Identifier::from("R"), &graph).err().unwrap();
        assert!(matches!(err, LineageError::CycleDetected { node } if node == Identifier::from("A")));
    }

    #[test]
    fn test_cycle_through_explicit_root() {
        let graph = table(&[(Some("A"), "B"), (Some("B"), "A")]);
        // no roots, so the forest is empty; expanding A directly hits the guard
        assert!(build_forest(&graph).unwrap().is_empty());
        let err = build_hierarchy(&Identifier::from("A"), &graph).err().unwrap();
        assert!(matches!(err, LineageError::CycleDetected { .. }));
    }

    #[test]
    fn test_unknown_root() {
        let graph = table(&[(None, "A")]);
        let err = build_hierarchy(&Identifier::from("Z"), &graph).err().unwrap();
        assert!(matches!(err, LineageError::UnknownNode { .. }));
    }
}
