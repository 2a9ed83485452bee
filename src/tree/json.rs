use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Align, Edges, Size};
use crate::foundation::error::{LayoutError, LayoutResult};
use crate::tree::builder::TreeBuilder;
use crate::tree::model::{ContainerKind, ContainerStyle, LayoutTree, NodeId, SizeMode, Sizing};

/// JSON-facing node description.
///
/// A leaf carries `content`; a container carries `kind` and optionally `children`, `gap`,
/// `padding`, `align` and `arrange`. Having both or neither is rejected when converting to a
/// tree. Either may carry `width` and `height` size modes.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeDef {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    content: Option<Size>,
    #[serde(default)]
    kind: Option<ContainerKind>,
    #[serde(default)]
    children: Option<Vec<NodeDef>>,
    #[serde(default)]
    gap: Option<f64>,
    #[serde(default)]
    padding: Option<PaddingDef>,
    #[serde(default)]
    align: Option<Align>,
    #[serde(default)]
    arrange: Option<Align>,
    #[serde(default)]
    width: Option<SizeMode>,
    #[serde(default)]
    height: Option<SizeMode>,
}

#[derive(Debug, Clone, Copy, serde::Deserialize)]
#[serde(untagged)]
enum PaddingDef {
    Uniform(f64),
    Edges(Edges),
}

impl From<PaddingDef> for Edges {
    fn from(value: PaddingDef) -> Self {
        match value {
            PaddingDef::Uniform(v) => Edges::all(v),
            PaddingDef::Edges(e) => e,
        }
    }
}

impl NodeDef {
    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    fn has_style(&self) -> bool {
        self.gap.is_some()
            || self.padding.is_some()
            || self.align.is_some()
            || self.arrange.is_some()
    }

    fn lower(self, b: &mut TreeBuilder) -> LayoutResult<NodeId> {
        let label = self.label().to_string();
        let style_on_leaf = self.has_style();
        let sizing = Sizing {
            width: self.width.unwrap_or_default(),
            height: self.height.unwrap_or_default(),
        };
        sizing
            .check()
            .map_err(|msg| LayoutError::malformed(format!("node '{label}': {msg}")))?;
        let id = match (self.content, self.kind, self.children) {
            (Some(_), _, Some(_)) | (Some(_), Some(_), None) => {
                return Err(LayoutError::malformed(format!(
                    "node '{label}' has both content and container fields"
                )));
            }
            (Some(_), None, None) if style_on_leaf => {
                return Err(LayoutError::malformed(format!(
                    "leaf '{label}' cannot carry gap, padding, align or arrange"
                )));
            }
            (Some(content), None, None) => b.leaf(content),
            (None, None, Some(_)) => {
                return Err(LayoutError::malformed(format!(
                    "container '{label}' is missing its kind"
                )));
            }
            (None, None, None) => {
                return Err(LayoutError::malformed(format!(
                    "node '{label}' is neither a leaf nor a container"
                )));
            }
            (None, Some(kind), children) => {
                let style = ContainerStyle {
                    gap: self.gap.unwrap_or(0.0),
                    padding: self.padding.map(Edges::from).unwrap_or_default(),
                    align: self.align.unwrap_or_default(),
                    arrange: self.arrange.unwrap_or_default(),
                };
                style.check().map_err(|msg| {
                    LayoutError::malformed(format!("container '{label}': {msg}"))
                })?;
                let mut ids = Vec::new();
                for child in children.unwrap_or_default() {
                    ids.push(child.lower(b)?);
                }
                b.styled_container(kind, style, ids)
            }
        };
        if let Some(name) = self.name {
            b.name(id, name)?;
        }
        b.sizing(id, sizing)?;
        Ok(id)
    }
}

impl LayoutTree {
    /// Parse a nested JSON tree description from a reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> LayoutResult<Self> {
        let def: NodeDef = serde_json::from_reader(r)
            .map_err(|e| LayoutError::serde(format!("parse layout tree JSON: {e}")))?;
        Self::from_def(def)
    }

    /// Parse a nested JSON tree description from a string.
    pub fn from_json_str(s: &str) -> LayoutResult<Self> {
        let def: NodeDef = serde_json::from_str(s)
            .map_err(|e| LayoutError::serde(format!("parse layout tree JSON: {e}")))?;
        Self::from_def(def)
    }

    /// Parse a nested JSON tree description from a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> LayoutResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open layout tree JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    fn from_def(def: NodeDef) -> LayoutResult<Self> {
        let mut b = TreeBuilder::new();
        let root = def.lower(&mut b)?;
        b.build(root)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/json.rs"]
mod tests;
