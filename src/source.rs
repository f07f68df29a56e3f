//! Column binding between the host's data element and the pipeline.
//!
//! The host hands over its element data as an object keyed by column id,
//! each holding one cell per row, plus the user's choice of parent and child
//! column. Resolving the two produces the aligned columns the extractor reads.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ColumnRole, LineageError, Result};
use crate::graph::Identifier;

/// The user's parent/child column choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSelection {
    pub parent: Option<String>,
    pub child: Option<String>,
}

impl ColumnSelection {
    pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            parent: Some(parent.into()),
            child: Some(child.into()),
        }
    }
}

/// Bound element data: column id to cells, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSource {
    columns: IndexMap<String, Vec<Option<Identifier>>>,
}

impl ColumnSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a column.
    pub fn insert(&mut self, name: impl Into<String>, cells: Vec<Option<Identifier>>) {
        self.columns.insert(name.into(), cells);
    }

    /// Builder form of [`ColumnSource::insert`].
    pub fn with_column(mut self, name: impl Into<String>, cells: Vec<Option<Identifier>>) -> Self {
        self.insert(name, cells);
        self
    }

    pub fn column(&self, name: &str) -> Option<&[Option<Identifier>]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Read element data from any serde format. Cells that are neither text,
    /// number, boolean nor null fail with [`LineageError::UnreadableData`].
    pub fn read<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self> {
        Self::deserialize(deserializer).map_err(LineageError::unreadable_data)
    }
}

/// Parent and child cells, row-aligned.
#[derive(Debug, Clone, Copy)]
pub struct BoundColumns<'a> {
    pub parents: &'a [Option<Identifier>],
    pub children: &'a [Option<Identifier>],
}

/// Look up the selected columns in `source`.
pub fn resolve<'a>(selection: &ColumnSelection, source: &'a ColumnSource) -> Result<BoundColumns<'a>> {
    let parent = selection.parent.as_deref().ok_or(LineageError::MissingColumn {
        role: ColumnRole::Parent,
    })?;
    let child = selection.child.as_deref().ok_or(LineageError::MissingColumn {
        role: ColumnRole::Child,
    })?;

    let lookup = |name: &str| {
        source.column(name).ok_or_else(|| {
            let available: Vec<&str> = source.column_names().collect();
            log::debug!("column '{name}' not found; data has [{}]", available.join(", "));
            LineageError::ColumnNotFound {
                column: name.to_owned(),
            }
        })
    };

    Ok(BoundColumns {
        parents: lookup(parent)?,
        children: lookup(child)?,
    })
}
