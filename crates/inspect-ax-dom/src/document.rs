//! The document arena and its tree primitives.

use crate::error::{SelectorError, XPathError};
use crate::layout::{LayoutBox, ViewportInfo};
use crate::node::{ElementData, Node, NodeData, NodeId, RecordedAx};
use crate::selector::SelectorList;
use crate::xpath::XPath;

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;

/// Elements whose subtrees never contribute rendered text.
const NON_RENDERED_TAGS: &[&str] = &["head", "script", "style", "template", "noscript"];

/// Elements rendered as blocks; rendered text breaks around them.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary", "table",
    "tr", "ul",
];

/// An in-memory document.
///
/// Node 0 is the document node; its element child is the document element.
/// Detached nodes stay in the arena but are no longer connected.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    viewport: ViewportInfo,
    url: String,
    title: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document (document node only).
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
            viewport: ViewportInfo::default(),
            url: String::new(),
            title: String::new(),
        }
    }

    pub fn document_node(&self) -> NodeId {
        NodeId(0)
    }

    pub fn viewport(&self) -> ViewportInfo {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: ViewportInfo) {
        self.viewport = viewport;
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_location(&mut self, url: impl Into<String>, title: impl Into<String>) {
        self.url = url.into();
        self.title = title.into();
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.push(NodeData::Element(ElementData::new(tag_name)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(Node::new(data));
        NodeId(self.nodes.len() - 1)
    }

    /// Append `child` as the last child of `parent`, moving it if attached
    /// elsewhere. Appending an ancestor into its own subtree is ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_before(parent, child, None);
    }

    /// Insert `child` before `reference` (or last when `None`).
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        if parent == child || self.contains(child, parent) {
            return;
        }
        self.remove(child);
        let siblings = &mut self.nodes[parent.0].children;
        let position = reference
            .and_then(|r| siblings.iter().position(|&c| c == r))
            .unwrap_or(siblings.len());
        siblings.insert(position, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Detach a node (and its subtree) from its parent.
    pub fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeData::Element(data) = &mut self.nodes[node.0].data {
            data.set_attribute(name, value);
        }
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let NodeData::Element(data) = &mut self.nodes[node.0].data {
            data.remove_attribute(name);
        }
    }

    pub fn set_layout(&mut self, node: NodeId, layout: LayoutBox) {
        if let NodeData::Element(data) = &mut self.nodes[node.0].data {
            data.layout = Some(layout);
        }
    }

    pub fn set_recorded_ax(&mut self, node: NodeId, recorded: RecordedAx) {
        if let NodeData::Element(data) = &mut self.nodes[node.0].data {
            data.recorded_ax = Some(recorded);
        }
    }

    // ------------------------------------------------------------------
    // Node access
    // ------------------------------------------------------------------

    pub fn data(&self, node: NodeId) -> &NodeData {
        &self.nodes[node.0].data
    }

    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        match self.nodes.get(node.0).map(|n| &n.data) {
            Some(NodeData::Element(data)) => Some(data),
            _ => None,
        }
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.tag_name.as_str())
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|e| e.attribute(name))
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    // ------------------------------------------------------------------
    // Tree navigation
    // ------------------------------------------------------------------

    pub fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.parent_node(node).filter(|&p| self.is_element(p))
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn element_children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(node).iter().copied().filter(|&c| self.is_element(c))
    }

    pub fn previous_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent_node(node)?;
        let siblings = self.children(parent);
        let position = siblings.iter().position(|&c| c == node)?;
        siblings[..position]
            .iter()
            .rev()
            .copied()
            .find(|&c| self.is_element(c))
    }

    /// Ancestor elements, nearest first.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent_element(node), move |&n| self.parent_element(n))
    }

    pub fn document_element(&self) -> Option<NodeId> {
        self.element_children(self.document_node()).next()
    }

    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.element_children(html)
            .find(|&c| self.tag_name(c) == Some("body"))
    }

    /// Whether `node` is reachable from the document node.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == self.document_node() {
                return true;
            }
            current = self.parent_node(n);
        }
        false
    }

    /// Inclusive containment: `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent_node(n);
        }
        false
    }

    /// Number of ancestors up to the document node.
    pub fn depth(&self, node: NodeId) -> usize {
        std::iter::successors(self.parent_node(node), |&n| self.parent_node(n)).count()
    }

    /// Descendants of `node` in document order, excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    /// Connected elements in document order.
    pub fn elements(&self) -> Vec<NodeId> {
        self.descendants(self.document_node())
            .into_iter()
            .filter(|&n| self.is_element(n))
            .collect()
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.elements()
            .into_iter()
            .find(|&n| self.attribute(n, "id") == Some(id))
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, node: NodeId) -> String {
        if let NodeData::Text(text) = self.data(node) {
            return text.clone();
        }
        self.descendants(node)
            .into_iter()
            .filter_map(|n| match self.data(n) {
                NodeData::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Approximation of rendered text: skips non-rendered and `hidden`
    /// subtrees and breaks lines around block elements.
    pub fn inner_text(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_rendered_text(node, &mut out);
        out
    }

    fn collect_rendered_text(&self, node: NodeId, out: &mut String) {
        match self.data(node) {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Element(data) => {
                if NON_RENDERED_TAGS.contains(&data.tag_name.as_str())
                    || data.has_attribute("hidden")
                {
                    return;
                }
                if data.tag_name == "br" {
                    out.push('\n');
                    return;
                }
                let block = BLOCK_TAGS.contains(&data.tag_name.as_str());
                if block {
                    out.push('\n');
                }
                for &child in self.children(node) {
                    self.collect_rendered_text(child, out);
                }
                if block {
                    out.push('\n');
                }
            }
            NodeData::Document => {
                for &child in self.children(node) {
                    self.collect_rendered_text(child, out);
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// First element matching `selector`, in document order.
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        Ok(list.query_first(self))
    }

    /// All elements matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        Ok(list.query_all(self))
    }

    /// First element selected by an XPath expression, in document order.
    pub fn evaluate_xpath(&self, expression: &str) -> Result<Option<NodeId>, XPathError> {
        let xpath = XPath::parse(expression)?;
        Ok(xpath.first_element(self))
    }

    /// Topmost visible element whose layout box contains the point.
    ///
    /// Highest paint order wins, then smallest area, then deepest node.
    pub fn element_from_point(&self, x: f64, y: f64) -> Option<NodeId> {
        let mut candidates: Vec<(NodeId, LayoutBox)> = self
            .elements()
            .into_iter()
            .filter_map(|n| self.element(n)?.layout.map(|layout| (n, layout)))
            .filter(|(_, layout)| layout.visible && layout.bounding_box.contains(x, y))
            .collect();

        candidates.sort_by(|(a, la), (b, lb)| {
            lb.paint_order
                .cmp(&la.paint_order)
                .then_with(|| {
                    la.bounding_box
                        .area()
                        .partial_cmp(&lb.bounding_box.area())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| self.depth(*b).cmp(&self.depth(*a)))
        });

        candidates.first().map(|(n, _)| *n)
    }
}
