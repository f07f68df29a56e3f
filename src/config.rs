//! Pipeline configuration.
//!
//! Deserialized from the host as a camelCase object; every field is optional
//! and falls back to its default:
//!
//! ```json
//! {
//!   "layout": { "nodeSpacing": 100, "levelSpacing": 200 },
//!   "canvas": { "width": 1000, "height": 600 },
//!   "multiParent": "duplicate"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{CanvasSize, TidyTreeConfig};

/// What to do with a node that has more than one distinct parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MultiParentPolicy {
    /// Lay the node's subtree out once under every parent.
    #[default]
    Duplicate,
    /// Fail with [`crate::LineageError::MultipleParents`].
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineageConfig {
    pub layout: TidyTreeConfig,
    pub canvas: CanvasSize,
    pub multi_parent: MultiParentPolicy,
}

impl LineageConfig {
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        self.canvas.validate()
    }
}
