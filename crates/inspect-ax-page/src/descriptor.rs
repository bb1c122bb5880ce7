//! Descriptor Builder: turns a right-clicked element into a serializable
//! recipe that can find it again after a message round trip.
//!
//! Construction never fails. A node that is not an element yields empty
//! fields, which the background registry then rejects.

use std::collections::VecDeque;

use inspect_ax_dom::{css_escape, Document, NodeId};
use inspect_ax_protocols::{Pointer, TargetDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;

/// Raw client coordinates of a pointer event.
///
/// Kept as floats; non-finite values serialize as `null` and are coerced
/// by the background sanitizer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientPoint {
    pub x: f64,
    pub y: f64,
}

impl ClientPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Payload of a `record-context-target` message.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturePayload {
    pub selector: String,
    pub xpath: String,
    pub tag_name: String,
    pub pointer: ClientPoint,
}

impl CapturePayload {
    /// Wire form sent to the background.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Descriptor with integer coordinates, for in-page use without the
    /// registry hop.
    pub fn to_descriptor(&self) -> TargetDescriptor {
        let pointer = self
            .pointer
            .is_finite()
            .then(|| Pointer::new(round_half_up(self.pointer.x), round_half_up(self.pointer.y)));
        TargetDescriptor {
            selector: self.selector.clone(),
            xpath: self.xpath.clone(),
            tag_name: self.tag_name.clone(),
            pointer,
        }
    }
}

/// Rounds .5 towards positive infinity.
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Builds selectors, XPaths and capture payloads.
pub struct DescriptorBuilder;

impl DescriptorBuilder {
    /// Capture the target of a context-menu event.
    ///
    /// A text-node target is replaced by its parent element. Returns `None`
    /// when there is no element to capture.
    pub fn capture(
        doc: &Document,
        target: Option<NodeId>,
        point: ClientPoint,
    ) -> Option<CapturePayload> {
        let target = target?;
        let element = if doc.is_element(target) {
            target
        } else {
            doc.parent_element(target)?
        };
        Some(Self::build(doc, element, point))
    }

    pub fn build(doc: &Document, element: NodeId, point: ClientPoint) -> CapturePayload {
        CapturePayload {
            selector: Self::build_selector(doc, element),
            xpath: Self::build_xpath(doc, element),
            tag_name: doc.tag_name(element).unwrap_or_default().to_string(),
            pointer: point,
        }
    }

    /// CSS selector for `element`.
    ///
    /// `#id` when the element has an id. Otherwise one
    /// `tag[.firstClass][:nth-of-type(k)]` segment per ancestor below
    /// `body`, stopping as soon as the joined path matches exactly one
    /// element in the document.
    pub fn build_selector(doc: &Document, element: NodeId) -> String {
        let Some(data) = doc.element(element) else {
            return String::new();
        };
        if let Some(id) = data.attribute("id").filter(|id| !id.is_empty()) {
            return format!("#{}", css_escape(id));
        }

        let body = doc.body();
        let mut segments = VecDeque::new();
        let mut node = Some(element);

        while let Some(current) = node.filter(|&n| doc.is_element(n) && Some(n) != body) {
            segments.push_front(Self::selector_segment(doc, current));
            let candidate = join(&segments, " > ");
            if matches_exactly_one(doc, &candidate) {
                return candidate;
            }
            node = doc.parent_element(current);
        }

        join(&segments, " > ")
    }

    fn selector_segment(doc: &Document, node: NodeId) -> String {
        let Some(data) = doc.element(node) else {
            return String::new();
        };
        let mut segment = data.tag_name.clone();

        if let Some(class) = data.class_list().next() {
            segment.push('.');
            segment.push_str(&css_escape(class));
        }

        if let Some(parent) = doc.parent_element(node) {
            let same_tag: Vec<NodeId> = doc
                .element_children(parent)
                .filter(|&c| doc.tag_name(c) == Some(data.tag_name.as_str()))
                .collect();
            if same_tag.len() > 1 {
                if let Some(index) = same_tag.iter().position(|&c| c == node) {
                    segment.push_str(&format!(":nth-of-type({})", index + 1));
                }
            }
        }

        segment
    }

    /// XPath for `element`.
    ///
    /// `//*[@id="..."]` when the id contains no double quote, otherwise an
    /// absolute `/tag[index]` path from the document element down.
    pub fn build_xpath(doc: &Document, element: NodeId) -> String {
        let Some(data) = doc.element(element) else {
            return String::new();
        };
        if let Some(id) = data
            .attribute("id")
            .filter(|id| !id.is_empty() && !id.contains('"'))
        {
            return format!("//*[@id=\"{}\"]", id);
        }

        let mut segments = VecDeque::new();
        let mut node = Some(element);

        while let Some(current) = node {
            let Some(tag) = doc.tag_name(current) else {
                break;
            };
            let mut index = 1;
            let mut sibling = doc.previous_element_sibling(current);
            while let Some(prev) = sibling {
                if doc.tag_name(prev) == Some(tag) {
                    index += 1;
                }
                sibling = doc.previous_element_sibling(prev);
            }
            segments.push_front(format!("{}[{}]", tag, index));
            node = doc.parent_element(current);
        }

        format!("/{}", join(&segments, "/"))
    }
}

fn join(segments: &VecDeque<String>, separator: &str) -> String {
    segments
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Uniqueness probe; a selector that fails to parse counts as no match.
fn matches_exactly_one(doc: &Document, selector: &str) -> bool {
    doc.query_selector_all(selector)
        .map(|found| found.len() == 1)
        .unwrap_or(false)
}
