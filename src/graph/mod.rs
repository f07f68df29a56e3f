//! Graph data structures and extraction.
//!
//! This module turns parent/child columns into a [`LineageGraph`]: distinct
//! nodes, row-ordered links, and a petgraph index for topology queries.

mod engine;
mod extract;
mod identifier;
mod link;

pub use engine::{GraphData, LineageGraph, NodeData};
pub use extract::extract_graph;
pub use identifier::Identifier;
pub use link::Link;
