//! Heuristic role inference.

use inspect_ax_dom::{Document, NodeId};
use inspect_ax_protocols::is_generic_role;

use super::read_attribute;

/// Role implied by markup alone.
///
/// An explicit `role` attribute wins; otherwise the tag decides, and tags
/// without an implicit role are `generic`.
pub fn infer_role(doc: &Document, element: NodeId) -> String {
    let explicit = read_attribute(doc, element, "role");
    if !explicit.is_empty() {
        return explicit;
    }

    let tag = doc.tag_name(element).unwrap_or_default();
    let role = match tag {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "heading",
        "a" if doc.has_attribute(element, "href") => "link",
        "button" => "button",
        "textarea" => "textbox",
        "select" if doc.has_attribute(element, "multiple") => "listbox",
        "select" => "combobox",
        "img" => "img",
        "ul" | "ol" => "list",
        "li" => "listitem",
        "main" => "main",
        "nav" => "navigation",
        "input" => input_role(doc, element),
        _ => "generic",
    };
    role.to_string()
}

fn input_role(doc: &Document, element: NodeId) -> &'static str {
    let input_type = doc
        .attribute(element, "type")
        .unwrap_or("text")
        .to_ascii_lowercase();
    match input_type.as_str() {
        "button" | "submit" | "reset" => "button",
        "checkbox" => "checkbox",
        "radio" => "radio",
        "range" => "slider",
        "number" => "spinbutton",
        _ => "textbox",
    }
}

/// Native role unless it is generic and the inferred one is not.
pub fn pick_preferred_role(native: &str, inferred: &str) -> String {
    if is_generic_role(native) && !is_generic_role(inferred) {
        return inferred.to_string();
    }
    if native.is_empty() {
        inferred.to_string()
    } else {
        native.to_string()
    }
}
