//! Integration tests for the document model.
//!
//! These tests load a JSON page and exercise the three lookup primitives
//! against the same tree.

use inspect_ax_dom::{css_escape, normalize_text, Document, PageFixture};

// ============================================================================
// Test Helpers
// ============================================================================

const CHECKOUT_PAGE: &str = r##"{
    "url": "https://shop.example/checkout",
    "title": "Checkout",
    "viewport": {"width": 1024, "height": 768},
    "document": {
        "tag": "html",
        "children": [
            {"tag": "head", "children": [{"tag": "title", "children": ["Checkout"]}]},
            {"tag": "body", "children": [
                {"tag": "form", "attributes": {"class": "checkout wide"}, "children": [
                    {"tag": "label", "attributes": {"for": "email"}, "children": ["Email  address"]},
                    {"tag": "input", "attributes": {"id": "email", "type": "email"},
                     "layout": {"bounding_box": {"x": 20, "y": 40, "width": 300, "height": 24}}},
                    {"tag": "div", "children": [
                        {"tag": "button", "attributes": {"class": "primary"}, "children": ["Pay"],
                         "layout": {"bounding_box": {"x": 20, "y": 80, "width": 80, "height": 30}}},
                        {"tag": "button", "children": ["Cancel"],
                         "layout": {"bounding_box": {"x": 110, "y": 80, "width": 80, "height": 30}}}
                    ]}
                ]}
            ]}
        ]
    }
}"##;

fn checkout() -> Document {
    PageFixture::from_json(CHECKOUT_PAGE)
        .unwrap()
        .into_document()
        .unwrap()
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_selector_xpath_and_point_agree() {
    let doc = checkout();

    let by_selector = doc
        .query_selector("form.checkout > div > button:nth-of-type(2)")
        .unwrap()
        .unwrap();
    let by_xpath = doc
        .evaluate_xpath("/html[1]/body[1]/form[1]/div[1]/button[2]")
        .unwrap()
        .unwrap();
    let by_point = doc.element_from_point(150.0, 95.0).unwrap();

    assert_eq!(by_selector, by_xpath);
    assert_eq!(by_selector, by_point);
    assert_eq!(doc.text_content(by_point), "Cancel");
}

#[test]
fn test_id_lookups() {
    let doc = checkout();
    let input = doc.get_element_by_id("email").unwrap();

    let selector = format!("#{}", css_escape("email"));
    assert_eq!(doc.query_selector(&selector).unwrap(), Some(input));
    assert_eq!(
        doc.evaluate_xpath("//*[@id=\"email\"]").unwrap(),
        Some(input)
    );
}

#[test]
fn test_label_text_normalizes() {
    let doc = checkout();
    let label = doc.query_selector("label[for=email]").unwrap().unwrap();
    assert_eq!(
        normalize_text(&doc.inner_text(label), 200),
        "Email address"
    );
}

#[test]
fn test_head_is_not_rendered() {
    let doc = checkout();
    let html = doc.document_element().unwrap();
    let rendered = normalize_text(&doc.inner_text(html), 200);
    assert!(!rendered.contains("Checkout"));
    assert_eq!(rendered, "Email address PayCancel");
}

#[test]
fn test_fixture_metadata() {
    let doc = checkout();
    assert_eq!(doc.url(), "https://shop.example/checkout");
    assert_eq!(doc.title(), "Checkout");
    assert_eq!(doc.viewport().height, 768.0);
    assert_eq!(doc.element_from_point(900.0, 700.0), None);
}
