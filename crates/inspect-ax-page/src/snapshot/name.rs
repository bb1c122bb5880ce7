//! Heuristic accessible-name sources.

use inspect_ax_dom::{css_escape, normalize_text, Document, NodeId};

use super::read_attribute;

/// Elements that expose a `labels` collection.
const LABELABLE_TAGS: &[&str] = &[
    "button", "input", "meter", "output", "progress", "select", "textarea",
];

/// One place an accessible name can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    AriaLabel,
    AriaLabelledBy,
    Alt,
    AssociatedLabel,
    Placeholder,
    Title,
    RenderedText,
}

impl NameSource {
    /// Lookup order; the first non-empty value wins.
    pub const DEFAULT_ORDER: [NameSource; 7] = [
        NameSource::AriaLabel,
        NameSource::AriaLabelledBy,
        NameSource::Alt,
        NameSource::AssociatedLabel,
        NameSource::Placeholder,
        NameSource::Title,
        NameSource::RenderedText,
    ];

    /// Value from this source, or `None` when it is empty.
    pub fn resolve(&self, doc: &Document, element: NodeId, max_len: usize) -> Option<String> {
        let value = match self {
            NameSource::AriaLabel => read_attribute(doc, element, "aria-label"),
            NameSource::AriaLabelledBy => labelled_by_text(doc, element, max_len),
            NameSource::Alt => read_attribute(doc, element, "alt"),
            NameSource::AssociatedLabel => associated_label_text(doc, element, max_len),
            NameSource::Placeholder => read_attribute(doc, element, "placeholder"),
            NameSource::Title => read_attribute(doc, element, "title"),
            NameSource::RenderedText => {
                let rendered = doc.inner_text(element);
                let text = if rendered.is_empty() {
                    doc.text_content(element)
                } else {
                    rendered
                };
                normalize_text(&text, max_len)
            }
        };
        (!value.is_empty()).then_some(value)
    }
}

/// Texts of the elements named by `aria-labelledby`, joined by spaces.
fn labelled_by_text(doc: &Document, element: NodeId, max_len: usize) -> String {
    read_attribute(doc, element, "aria-labelledby")
        .split_whitespace()
        .filter_map(|id| doc.get_element_by_id(id))
        .map(|node| normalize_text(&doc.text_content(node), max_len))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// First non-empty of: the `labels` collection, `label[for=id]`, the
/// closest enclosing `label`.
fn associated_label_text(doc: &Document, element: NodeId, max_len: usize) -> String {
    let label_text = |label: NodeId| normalize_text(&doc.text_content(label), max_len);

    let from_collection = labels(doc, element)
        .into_iter()
        .map(label_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if !from_collection.is_empty() {
        return from_collection;
    }

    let id = read_attribute(doc, element, "id");
    if !id.is_empty() {
        let selector = format!("label[for=\"{}\"]", css_escape(&id));
        if let Ok(Some(label)) = doc.query_selector(&selector) {
            let text = label_text(label);
            if !text.is_empty() {
                return text;
            }
        }
    }

    std::iter::once(element)
        .chain(doc.ancestors(element))
        .find(|&n| doc.tag_name(n) == Some("label"))
        .map(label_text)
        .unwrap_or_default()
}

/// The `labels` collection of a labelable element: labels whose `for`
/// names its id, then an enclosing label without a `for` attribute.
fn labels(doc: &Document, element: NodeId) -> Vec<NodeId> {
    let labelable = doc
        .tag_name(element)
        .is_some_and(|tag| LABELABLE_TAGS.contains(&tag));
    if !labelable {
        return Vec::new();
    }

    let id = doc.attribute(element, "id").unwrap_or_default();
    let mut found: Vec<NodeId> = if id.is_empty() {
        Vec::new()
    } else {
        doc.elements()
            .into_iter()
            .filter(|&n| doc.tag_name(n) == Some("label") && doc.attribute(n, "for") == Some(id))
            .collect()
    };

    if let Some(wrapper) = doc
        .ancestors(element)
        .find(|&n| doc.tag_name(n) == Some("label"))
    {
        if !doc.has_attribute(wrapper, "for") && !found.contains(&wrapper) {
            found.push(wrapper);
        }
    }
    found
}
