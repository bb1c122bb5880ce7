//! Declarative document construction and JSON page fixtures.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::FixtureError;
use crate::layout::{BoundingBox, LayoutBox, ViewportInfo};
use crate::node::{NodeId, RecordedAx};

/// A child in an [`ElementSpec`]: bare strings are text nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    Text(String),
    Element(ElementSpec),
}

/// Declarative element description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementSpec {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ax: Option<RecordedAx>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.children.push(NodeSpec::Text(text.to_string()));
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(NodeSpec::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ElementSpec>) -> Self {
        self.children
            .extend(children.into_iter().map(NodeSpec::Element));
        self
    }

    pub fn bounds(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        let paint_order = self.layout.map(|l| l.paint_order).unwrap_or(0);
        self.layout = Some(LayoutBox::new(BoundingBox::new(x, y, width, height), paint_order));
        self
    }

    pub fn paint_order(mut self, paint_order: i32) -> Self {
        let mut layout = self
            .layout
            .unwrap_or_else(|| LayoutBox::new(BoundingBox::default(), 0));
        layout.paint_order = paint_order;
        self.layout = Some(layout);
        self
    }

    pub fn ax(mut self, role: Option<&str>, name: Option<&str>) -> Self {
        self.ax = Some(RecordedAx {
            role: role.map(str::to_string),
            name: name.map(str::to_string),
        });
        self
    }

    /// `<html><head></head><body>children</body></html>`.
    pub fn page(body_children: impl IntoIterator<Item = ElementSpec>) -> Self {
        ElementSpec::new("html")
            .child(ElementSpec::new("head"))
            .child(ElementSpec::new("body").children(body_children))
    }
}

impl Document {
    /// Build a document whose document element is `root`.
    pub fn from_spec(root: &ElementSpec) -> Self {
        let mut doc = Document::new();
        let document_node = doc.document_node();
        doc.append_spec(document_node, root);
        doc
    }

    /// Build `html > (head, body > children)`.
    pub fn from_body(children: impl IntoIterator<Item = ElementSpec>) -> Self {
        Self::from_spec(&ElementSpec::page(children))
    }

    /// Append `spec` (and its subtree) under `parent`, returning the new element.
    pub fn append_spec(&mut self, parent: NodeId, spec: &ElementSpec) -> NodeId {
        let element = self.create_element(&spec.tag);
        for (name, value) in &spec.attributes {
            self.set_attribute(element, name, value);
        }
        if let Some(layout) = spec.layout {
            self.set_layout(element, layout);
        }
        if let Some(ax) = &spec.ax {
            self.set_recorded_ax(element, ax.clone());
        }
        self.append_child(parent, element);

        for child in &spec.children {
            match child {
                NodeSpec::Text(text) => {
                    let node = self.create_text(text);
                    self.append_child(element, node);
                }
                NodeSpec::Element(child_spec) => {
                    self.append_spec(element, child_spec);
                }
            }
        }
        element
    }
}

/// A captured page: location, viewport and document tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFixture {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub viewport: ViewportInfo,
    pub document: ElementSpec,
}

impl PageFixture {
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn into_document(self) -> Result<Document, FixtureError> {
        if !self.document.tag.eq_ignore_ascii_case("html") {
            return Err(FixtureError::InvalidRoot(self.document.tag));
        }
        let mut doc = Document::from_spec(&self.document);
        doc.set_viewport(self.viewport);
        doc.set_location(self.url, self.title);
        Ok(doc)
    }
}
