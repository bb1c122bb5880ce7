use super::*;
use crate::error::NativeAccessibilityError;
use inspect_ax_dom::ElementSpec;

struct FailingNative;

impl NativeAccessibility for FailingNative {
    fn compute(
        &self,
        _doc: &Document,
        _element: NodeId,
    ) -> Result<AccessibilitySnapshot, NativeAccessibilityError> {
        Err(NativeAccessibilityError::Failed("node detached".to_string()))
    }
}

fn engine(native: Arc<dyn NativeAccessibility>) -> SnapshotEngine {
    SnapshotEngine::new(native, &SnapshotConfig::default())
}

fn heuristic() -> SnapshotEngine {
    engine(Arc::new(NoNativeAccessibility))
}

fn find(doc: &Document, selector: &str) -> NodeId {
    doc.query_selector(selector).unwrap().unwrap()
}

#[test]
fn test_checkbox_without_native_api() {
    let doc = Document::from_body([ElementSpec::new("input").attr("type", "checkbox")]);
    let snapshot = heuristic().compute_with_fallback(&doc, find(&doc, "input"));
    assert_eq!(snapshot.role, "checkbox");
}

#[test]
fn test_aria_label_beats_text() {
    let doc = Document::from_body([ElementSpec::new("button")
        .attr("aria-label", "Close")
        .text("X")]);
    let snapshot = heuristic().compute(&doc, find(&doc, "button"));
    assert_eq!(snapshot, AccessibilitySnapshot::new("button", "Close"));
}

#[test]
fn test_generic_span_escalates_to_role_button() {
    let doc = Document::from_body([ElementSpec::new("div")
        .attr("role", "button")
        .child(ElementSpec::new("span").text("Click"))]);
    let span = find(&doc, "span");

    let own = heuristic().compute(&doc, span);
    assert_eq!(own.role, "generic");

    let snapshot = heuristic().compute_with_fallback(&doc, span);
    assert_eq!(snapshot, AccessibilitySnapshot::new("button", "Click"));
}

#[test]
fn test_escalation_with_recorded_native_values() {
    let doc = Document::from_body([ElementSpec::new("div")
        .attr("role", "button")
        .ax(Some("button"), Some("Click"))
        .child(ElementSpec::new("span").text("Click").ax(Some("generic"), None))]);
    let snapshot =
        engine(Arc::new(RecordedAccessibility)).compute_with_fallback(&doc, find(&doc, "span"));
    assert_eq!(snapshot, AccessibilitySnapshot::new("button", "Click"));
}

#[test]
fn test_native_values_are_trimmed_and_preferred() {
    let doc = Document::from_body([ElementSpec::new("div")
        .attr("aria-label", "Heuristic")
        .ax(Some(" region "), Some(" Native name "))]);
    let snapshot = engine(Arc::new(RecordedAccessibility)).compute(&doc, find(&doc, "div"));
    assert_eq!(snapshot, AccessibilitySnapshot::new("region", "Native name"));
}

#[test]
fn test_generic_native_role_yields_to_inferred() {
    let doc = Document::from_body([ElementSpec::new("nav").ax(Some("generic"), None)]);
    let snapshot = engine(Arc::new(RecordedAccessibility)).compute(&doc, find(&doc, "nav"));
    assert_eq!(snapshot.role, "navigation");
}

#[test]
fn test_native_failure_degrades_to_heuristics() {
    let doc = Document::from_body([ElementSpec::new("a").attr("href", "/").text("Home")]);
    let snapshot = engine(Arc::new(FailingNative)).compute(&doc, find(&doc, "a"));
    assert_eq!(snapshot, AccessibilitySnapshot::new("link", "Home"));
}

#[test]
fn test_ancestor_search_respects_step_limit() {
    let mut inner = ElementSpec::new("span").attr("id", "deep").text("deep");
    for _ in 0..5 {
        inner = ElementSpec::new("div").child(inner);
    }
    let doc = Document::from_body([ElementSpec::new("button").child(inner)]);
    let deep = doc.get_element_by_id("deep").unwrap();

    // Five div steps exhaust the default limit before reaching the button.
    assert_eq!(heuristic().find_semantic_ancestor(&doc, deep), None);

    let config = SnapshotConfig {
        max_ancestor_steps: 6,
        ..Default::default()
    };
    let wider = SnapshotEngine::new(Arc::new(NoNativeAccessibility), &config);
    assert_eq!(
        wider.find_semantic_ancestor(&doc, deep),
        Some(find(&doc, "button"))
    );
}

#[test]
fn test_ancestor_search_skips_excluded_roles() {
    let doc = Document::from_body([ElementSpec::new("a")
        .attr("href", "/docs")
        .child(ElementSpec::new("div").attr("role", "presentation").child(
            ElementSpec::new("div")
                .attr("contenteditable", "false")
                .child(ElementSpec::new("span").text("Docs")),
        ))]);
    let span = find(&doc, "span");
    assert_eq!(
        heuristic().find_semantic_ancestor(&doc, span),
        Some(find(&doc, "a"))
    );
    let snapshot = heuristic().compute_with_fallback(&doc, span);
    assert_eq!(snapshot, AccessibilitySnapshot::new("link", "Docs"));
}

#[test]
fn test_ancestor_search_stops_at_body() {
    let doc = Document::from_body([ElementSpec::new("span").text("alone")]);
    let span = find(&doc, "span");
    assert_eq!(heuristic().find_semantic_ancestor(&doc, span), None);
    let snapshot = heuristic().compute_with_fallback(&doc, span);
    assert_eq!(snapshot, AccessibilitySnapshot::new("generic", "alone"));
}

#[test]
fn test_prefer_fallback_rules() {
    let generic_named = AccessibilitySnapshot::new("generic", "Label");
    let generic_unnamed = AccessibilitySnapshot::new("generic", "");
    let generic_dash = AccessibilitySnapshot::new("", "-");
    let button = AccessibilitySnapshot::new("button", "Go");
    let editable = AccessibilitySnapshot::new("generic", "Notes");

    assert!(should_prefer_fallback(&generic_named, &button));
    assert!(should_prefer_fallback(&generic_unnamed, &editable));
    assert!(should_prefer_fallback(&generic_dash, &editable));
    assert!(!should_prefer_fallback(&generic_named, &editable));
    assert!(!should_prefer_fallback(&generic_unnamed, &generic_dash));
    assert!(!should_prefer_fallback(&button, &generic_named));
}

#[test]
fn test_generic_ancestor_with_name_is_adopted() {
    let doc = Document::from_body([ElementSpec::new("div")
        .attr("contenteditable", "true")
        .attr("aria-label", "Notes")
        .child(ElementSpec::new("span").attr("aria-hidden", "true"))]);
    let snapshot = heuristic().compute_with_fallback(&doc, find(&doc, "span"));
    assert_eq!(snapshot, AccessibilitySnapshot::new("generic", "Notes"));
}

#[test]
fn test_custom_name_order() {
    let doc = Document::from_body([ElementSpec::new("img")
        .attr("alt", "Alt text")
        .attr("title", "Title text")]);
    let engine = heuristic().with_name_sources([NameSource::Title, NameSource::Alt]);
    assert_eq!(engine.infer_name(&doc, find(&doc, "img")), "Title text");
}
