//! Overlay view model and its DOM subtree.

use std::fmt;

use inspect_ax_dom::{BoundingBox, Document, LayoutBox, NodeId};
use inspect_ax_protocols::{InspectionResult, Pointer, MISSING_VALUE};
use serde::Serialize;

use super::position::OverlayPosition;

pub const POPUP_ID: &str = "inspect-ax-popup";
pub const STYLE_ID: &str = "inspect-ax-popup-style";
pub const DEFAULT_ERROR: &str = "Unable to inspect AX data.";
const VALUE_HINT: &str = "Click or select text to copy";

/// Topmost paint order, as `z-index: 2147483647`.
const POPUP_PAINT_ORDER: i32 = i32::MAX;

// Approximate metrics of the stylesheet below.
const CHROME_HEIGHT: f64 = 18.0;
const HEADER_HEIGHT: f64 = 21.0;
const LINE_HEIGHT: f64 = 15.0;
const ROW_GAP: f64 = 5.0;
const STATUS_HEIGHT: f64 = 16.0;
const CHAR_WIDTH: f64 = 6.5;
const LABEL_COLUMN: f64 = 44.0;
const HORIZONTAL_CHROME: f64 = 18.0;

const STYLESHEET: &str = "\
#inspect-ax-popup { position: fixed; width: min(220px, calc(100vw - 12px)); \
z-index: 2147483647; padding: 8px; border-radius: 10px; line-height: 1.3; }
#inspect-ax-popup .ia-row { display: grid; grid-template-columns: 38px 1fr; gap: 6px; }
#inspect-ax-popup .ia-value { overflow-wrap: anywhere; cursor: copy; user-select: text; }
#inspect-ax-popup .ia-copy-status { opacity: 0; min-height: 14px; }
#inspect-ax-popup .ia-copy-status.is-visible { opacity: 1; }
#inspect-ax-popup .ia-error { margin: 0; overflow-wrap: anywhere; }
";

/// A copyable value row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueField {
    Role,
    Name,
}

impl ValueField {
    pub fn label(&self) -> &'static str {
        match self {
            ValueField::Role => "Role",
            ValueField::Name => "Name",
        }
    }
}

/// Overlay content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OverlayBody {
    Info { role: String, name: String },
    Error { message: String },
}

/// Everything the overlay shows, plus where.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayView {
    pub title: String,
    pub body: OverlayBody,
    pub pointer: Option<Pointer>,
    pub width: f64,
    pub position: OverlayPosition,
}

impl OverlayView {
    /// View for a result. Missing role or name show `-`, a failure without
    /// a message shows the generic error.
    pub fn from_result(result: &InspectionResult, title: &str, width: f64) -> Self {
        let or_missing = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .unwrap_or(MISSING_VALUE)
                .to_string()
        };
        let body = if result.ok {
            OverlayBody::Info {
                role: or_missing(&result.role),
                name: or_missing(&result.name),
            }
        } else {
            OverlayBody::Error {
                message: result
                    .error
                    .as_deref()
                    .filter(|e| !e.is_empty())
                    .unwrap_or(DEFAULT_ERROR)
                    .to_string(),
            }
        };
        Self {
            title: title.to_string(),
            body,
            pointer: result.pointer,
            width,
            position: OverlayPosition::default(),
        }
    }

    pub fn value(&self, field: ValueField) -> Option<&str> {
        match (&self.body, field) {
            (OverlayBody::Info { role, .. }, ValueField::Role) => Some(role),
            (OverlayBody::Info { name, .. }, ValueField::Name) => Some(name),
            (OverlayBody::Error { .. }, _) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.body {
            OverlayBody::Error { message } => Some(message),
            OverlayBody::Info { .. } => None,
        }
    }

    /// Estimated rendered height at the view's width.
    pub fn estimated_height(&self) -> f64 {
        let inner = (self.width - HORIZONTAL_CHROME).max(CHAR_WIDTH);
        let lines = |text: &str, column: f64| {
            let per_line = (column / CHAR_WIDTH).floor().max(1.0);
            (text.chars().count().max(1) as f64 / per_line).ceil()
        };

        let body = match &self.body {
            OverlayBody::Info { role, name } => {
                let column = (inner - LABEL_COLUMN).max(CHAR_WIDTH);
                (lines(role, column) + lines(name, column)) * LINE_HEIGHT
                    + 2.0 * ROW_GAP
                    + STATUS_HEIGHT
            }
            OverlayBody::Error { message } => lines(message, inner) * LINE_HEIGHT,
        };
        CHROME_HEIGHT + HEADER_HEIGHT + body
    }
}

impl fmt::Display for OverlayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        match &self.body {
            OverlayBody::Info { role, name } => {
                writeln!(f, "  {:<6}{}", ValueField::Role.label(), role)?;
                write!(f, "  {:<6}{}", ValueField::Name.label(), name)
            }
            OverlayBody::Error { message } => write!(f, "  {}", message),
        }
    }
}

/// Node handles of a mounted overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountedOverlay {
    pub popup: NodeId,
    pub role_value: Option<NodeId>,
    pub name_value: Option<NodeId>,
    pub copy_status: Option<NodeId>,
}

impl MountedOverlay {
    pub fn value_node(&self, field: ValueField) -> Option<NodeId> {
        match field {
            ValueField::Role => self.role_value,
            ValueField::Name => self.name_value,
        }
    }
}

/// Add the overlay stylesheet once.
pub fn ensure_style(doc: &mut Document) {
    if doc.get_element_by_id(STYLE_ID).is_some() {
        return;
    }
    let mount = mount_point(doc);
    append_element(doc, mount, "style", &[("id", STYLE_ID)], Some(STYLESHEET));
}

/// Build the overlay subtree under the root element.
pub fn mount(doc: &mut Document, view: &OverlayView) -> MountedOverlay {
    let root = mount_point(doc);
    let popup = append_element(
        doc,
        root,
        "section",
        &[("id", POPUP_ID), ("role", "status"), ("aria-live", "polite")],
        None,
    );

    let header = append_element(doc, popup, "div", &[("class", "ia-header")], None);
    append_element(
        doc,
        header,
        "img",
        &[("class", "ia-icon"), ("alt", ""), ("aria-hidden", "true")],
        None,
    );
    append_element(doc, header, "h2", &[], Some(&view.title));

    let body = append_element(doc, popup, "div", &[("class", "ia-body")], None);
    let mut mounted = MountedOverlay {
        popup,
        role_value: None,
        name_value: None,
        copy_status: None,
    };

    match &view.body {
        OverlayBody::Info { role, name } => {
            mounted.role_value = Some(append_row(doc, body, ValueField::Role, role));
            mounted.name_value = Some(append_row(doc, body, ValueField::Name, name));
            mounted.copy_status = Some(append_element(
                doc,
                body,
                "p",
                &[("class", "ia-copy-status"), ("aria-live", "polite")],
                None,
            ));
        }
        OverlayBody::Error { message } => {
            append_element(doc, body, "p", &[("class", "ia-error")], Some(message));
        }
    }

    let bounds = BoundingBox::new(
        view.position.left,
        view.position.top,
        view.width,
        view.estimated_height(),
    );
    doc.set_layout(popup, LayoutBox::new(bounds, POPUP_PAINT_ORDER));
    mounted
}

/// Replace the copy-status text and visibility class.
pub fn set_copy_status(doc: &mut Document, node: NodeId, text: &str, visible: bool) {
    for child in doc.children(node).to_vec() {
        doc.remove(child);
    }
    if !text.is_empty() {
        let text_node = doc.create_text(text);
        doc.append_child(node, text_node);
    }
    let class = if visible {
        "ia-copy-status is-visible"
    } else {
        "ia-copy-status"
    };
    doc.set_attribute(node, "class", class);
}

fn append_row(doc: &mut Document, body: NodeId, field: ValueField, value: &str) -> NodeId {
    let row = append_element(doc, body, "div", &[("class", "ia-row")], None);
    append_element(doc, row, "span", &[("class", "ia-label")], Some(field.label()));
    append_element(
        doc,
        row,
        "span",
        &[("class", "ia-value"), ("title", VALUE_HINT)],
        Some(value),
    )
}

fn append_element(
    doc: &mut Document,
    parent: NodeId,
    tag: &str,
    attributes: &[(&str, &str)],
    text: Option<&str>,
) -> NodeId {
    let element = doc.create_element(tag);
    for (name, value) in attributes {
        doc.set_attribute(element, name, value);
    }
    if let Some(text) = text {
        let text_node = doc.create_text(text);
        doc.append_child(element, text_node);
    }
    doc.append_child(parent, element);
    element
}

fn mount_point(doc: &Document) -> NodeId {
    doc.document_element().unwrap_or_else(|| doc.document_node())
}
