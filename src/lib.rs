//! Lineage Graph - WASM Module
//!
//! This module turns a parent/child table into a forest of laid-out trees for
//! lineage diagrams. It is compiled to WebAssembly and exposes a
//! JavaScript-friendly API via wasm-bindgen; the drawing itself (circles,
//! curves, labels, pan/zoom) stays on the JavaScript side.
//!
//! # Architecture
//!
//! - `source`: Column selection and bound element data
//! - `graph`: Node/link extraction and a petgraph topology index
//! - `hierarchy`: Per-root nested trees with a cycle guard
//! - `layout`: Tidy tree layout and forest stacking
//! - `session`: The full pipeline and the replace-on-change session

use js_sys::Float32Array;
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod layout;
pub mod session;
pub mod source;

pub use config::{LineageConfig, MultiParentPolicy};
pub use error::{ErrorKind, LineageError, Result};
pub use graph::{Identifier, LineageGraph, Link, extract_graph};
pub use hierarchy::{Children, HierarchyNode, build_forest, build_hierarchy};
pub use session::{LineageOutput, LineageSession, compute_lineage};
pub use source::{ColumnSelection, ColumnSource};

/// Initialize the WASM module: route `log` to the browser console and
/// report panics there too.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// Convert a pipeline error into the message string thrown to JavaScript.
fn to_js_error(err: LineageError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Serialize with plain objects and `null` (not `undefined`) for leaves.
fn to_js<T: Serialize>(value: &T) -> std::result::Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(JsValue::from)
}

/// Main entry point for the lineage engine.
///
/// Wraps a [`LineageSession`]: every `update` recomputes the whole forest from
/// the current column selection and element data.
#[wasm_bindgen]
pub struct LineageGraphWasm {
    session: LineageSession,
}

#[wasm_bindgen]
impl LineageGraphWasm {
    /// Create an engine with the default layout configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: LineageSession::new(),
        }
    }

    /// Create an engine from a configuration object.
    ///
    /// `undefined`/`null` selects the defaults; missing fields fall back to
    /// their defaults individually.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> std::result::Result<LineageGraphWasm, JsValue> {
        let config: LineageConfig = if config.is_undefined() || config.is_null() {
            LineageConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|err| to_js_error(LineageError::invalid_config(err.to_string())))?
        };
        let session = LineageSession::with_config(config).map_err(to_js_error)?;
        Ok(Self { session })
    }

    /// Recompute from a column selection `{ parent, child }` and element
    /// data `{ [columnId]: cells[] }`.
    ///
    /// Returns the new output. On failure the previous output is kept and
    /// the error is thrown.
    pub fn update(
        &mut self,
        selection: JsValue,
        data: JsValue,
    ) -> std::result::Result<JsValue, JsValue> {
        let selection: ColumnSelection = serde_wasm_bindgen::from_value(selection)
            .map_err(|err| to_js_error(LineageError::invalid_config(err.to_string())))?;
        let source = ColumnSource::read(serde_wasm_bindgen::Deserializer::from(data))
            .map_err(to_js_error)?;
        let output = self
            .session
            .update(&selection, &source)
            .map_err(to_js_error)?;
        to_js(output)
    }

    /// The effective configuration, with defaults filled in.
    pub fn config(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(self.session.config())
    }

    /// Whether a successful update is stored.
    #[wasm_bindgen(js_name = hasOutput)]
    pub fn has_output(&self) -> bool {
        self.session.output().is_some()
    }

    /// The `{ nodes, links }` graph of the last update, or `null`.
    pub fn graph(&self) -> std::result::Result<JsValue, JsValue> {
        match self.session.output() {
            Some(output) => to_js(&output.graph),
            None => Ok(JsValue::NULL),
        }
    }

    /// The positioned forest of the last update, or `null`.
    pub fn forest(&self) -> std::result::Result<JsValue, JsValue> {
        match self.session.output() {
            Some(output) => to_js(&output.forest),
            None => Ok(JsValue::NULL),
        }
    }

    /// Root identifiers of the last update, in tree order.
    pub fn roots(&self) -> std::result::Result<JsValue, JsValue> {
        match self.session.output() {
            Some(output) => to_js(&output.roots),
            None => Ok(JsValue::NULL),
        }
    }

    /// Canvas positions [x0, y0, x1, y1, ...] of every laid-out node.
    #[wasm_bindgen(js_name = positionsView)]
    pub fn positions_view(&self) -> Float32Array {
        let positions = self
            .session
            .output()
            .map(|output| output.forest.canvas_positions())
            .unwrap_or_default();
        Float32Array::from(&positions[..])
    }

    /// Number of laid-out nodes (duplicates under several roots included).
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> usize {
        self.session
            .output()
            .map(|output| output.forest.node_count())
            .unwrap_or(0)
    }

    /// Drop the stored output.
    pub fn clear(&mut self) {
        self.session.clear();
    }
}

impl Default for LineageGraphWasm {
    fn default() -> Self {
        Self::new()
    }
}
