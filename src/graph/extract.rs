//! Edge extraction: two aligned columns into nodes and links.

use indexmap::IndexSet;

use super::engine::LineageGraph;
use super::identifier::Identifier;
use super::link::Link;
use crate::error::{LineageError, Result};

/// Build a [`LineageGraph`] from parallel parent/child columns.
///
/// Row `i` always registers `children[i]` as a node. When `parents[i]` is
/// present it is registered too and a `parents[i] -> children[i]` link is
/// emitted; a null parent marks a top-level row and produces no link.
///
/// Fails if the columns differ in length or a child cell is null.
pub fn extract_graph(
    parents: &[Option<Identifier>],
    children: &[Option<Identifier>],
) -> Result<LineageGraph> {
    if parents.len() != children.len() {
        return Err(LineageError::LengthMismatch {
            parents: parents.len(),
            children: children.len(),
        });
    }

    let mut nodes: IndexSet<Identifier> = IndexSet::with_capacity(children.len());
    let mut links: Vec<Link> = Vec::with_capacity(children.len());

    for (row, (parent, child)) in parents.iter().zip(children).enumerate() {
        let child = child.as_ref().ok_or(LineageError::NullChild { row })?;
        nodes.insert(child.clone());

        if let Some(parent) = parent {
            nodes.insert(parent.clone());
            links.push(Link {
                source: parent.clone(),
                target: child.clone(),
            });
        }
    }

    log::debug!(
        "extracted {} nodes and {} links from {} rows",
        nodes.len(),
        links.len(),
        children.len()
    );

    Ok(LineageGraph::new(nodes, links))
}
