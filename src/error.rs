//! Error types for the lineage pipeline.
//!
//! Every failure aborts the whole recomputation; nothing partial is ever
//! handed to the renderer. Errors are grouped into three kinds so the host can
//! decide how loudly to report them.

use thiserror::Error;

use crate::graph::Identifier;

/// Broad category of a [`LineageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Columns not selected, not present, or invalid layout settings.
    Configuration,
    /// The bound data cannot describe a graph (ragged or null columns).
    DataIntegrity,
    /// The data describes a graph that cannot be laid out as a forest.
    StructuralHazard,
}

/// Column role in the parent/child selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Parent,
    Child,
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRole::Parent => f.write_str("parent"),
            ColumnRole::Child => f.write_str("child"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LineageError {
    #[error("{role} column is not configured")]
    MissingColumn { role: ColumnRole },

    #[error("column '{column}' is missing from the bound data")]
    ColumnNotFound { column: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("parent column has {parents} rows but child column has {children}")]
    LengthMismatch { parents: usize, children: usize },

    #[error("child value is null at row {row}")]
    NullChild { row: usize },

    #[error("element data is not a table of text or number cells: {reason}")]
    UnreadableData { reason: String },

    #[error("node {node} is not part of the graph")]
    UnknownNode { node: Identifier },

    #[error("cycle detected at node {node}")]
    CycleDetected { node: Identifier },

    #[error("node {node} has {} parents", .parents.len())]
    MultipleParents {
        node: Identifier,
        parents: Vec<Identifier>,
    },
}

impl LineageError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingColumn { .. } | Self::ColumnNotFound { .. } | Self::InvalidConfig { .. } => {
                ErrorKind::Configuration
            }
            Self::LengthMismatch { .. }
            | Self::NullChild { .. }
            | Self::UnreadableData { .. }
            | Self::UnknownNode { .. } => ErrorKind::DataIntegrity,
            Self::CycleDetected { .. } | Self::MultipleParents { .. } => {
                ErrorKind::StructuralHazard
            }
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub(crate) fn unreadable_data(reason: impl std::fmt::Display) -> Self {
        Self::UnreadableData {
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LineageError>;
