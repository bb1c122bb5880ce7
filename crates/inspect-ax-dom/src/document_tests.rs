use super::*;
use crate::builder::ElementSpec;
use crate::layout::BoundingBox;

#[test]
fn test_empty_document() {
    let doc = Document::new();
    assert!(doc.document_element().is_none());
    assert!(doc.body().is_none());
    assert!(doc.elements().is_empty());
}

#[test]
fn test_navigation() {
    let doc = Document::from_body([ElementSpec::new("ul").children([
        ElementSpec::new("li").text("a"),
        ElementSpec::new("li").text("b"),
    ])]);
    let ul = doc.query_selector("ul").unwrap().unwrap();
    let items: Vec<_> = doc.element_children(ul).collect();
    assert_eq!(items.len(), 2);
    assert_eq!(doc.previous_element_sibling(items[1]), Some(items[0]));
    assert_eq!(doc.previous_element_sibling(items[0]), None);
    assert_eq!(doc.parent_element(items[0]), Some(ul));

    let ancestors: Vec<_> = doc
        .ancestors(items[0])
        .map(|n| doc.tag_name(n).unwrap().to_string())
        .collect();
    assert_eq!(ancestors, vec!["ul", "body", "html"]);
}

#[test]
fn test_text_node_parent_element() {
    let doc = Document::from_body([ElementSpec::new("p").text("hello")]);
    let p = doc.query_selector("p").unwrap().unwrap();
    let text = doc.children(p)[0];
    assert!(!doc.is_element(text));
    assert_eq!(doc.parent_element(text), Some(p));
}

#[test]
fn test_mutation_and_connection() {
    let mut doc = Document::from_body([ElementSpec::new("div").attr("id", "box")]);
    let body = doc.body().unwrap();
    let div = doc.get_element_by_id("box").unwrap();

    let span = doc.create_element("span");
    assert!(!doc.is_connected(span));
    doc.append_child(div, span);
    assert!(doc.is_connected(span));
    assert!(doc.contains(body, span));

    doc.remove(div);
    assert!(!doc.is_connected(span));
    assert!(doc.get_element_by_id("box").is_none());
}

#[test]
fn test_append_child_rejects_cycles() {
    let mut doc = Document::from_body([ElementSpec::new("div").child(ElementSpec::new("span"))]);
    let div = doc.query_selector("div").unwrap().unwrap();
    let span = doc.query_selector("span").unwrap().unwrap();
    doc.append_child(span, div);
    assert_eq!(doc.parent_element(span), Some(div));
}

#[test]
fn test_insert_before() {
    let mut doc = Document::from_body([ElementSpec::new("p").attr("id", "last")]);
    let body = doc.body().unwrap();
    let last = doc.get_element_by_id("last").unwrap();
    let first = doc.create_element("p");
    doc.insert_before(body, first, Some(last));
    assert_eq!(doc.previous_element_sibling(last), Some(first));
}

#[test]
fn test_text_content_and_inner_text() {
    let doc = Document::from_body([ElementSpec::new("div")
        .attr("id", "card")
        .child(ElementSpec::new("p").text("Hello"))
        .child(ElementSpec::new("p").text("world"))
        .child(ElementSpec::new("script").text("var x;"))
        .child(ElementSpec::new("span").attr("hidden", "").text("secret"))]);
    let card = doc.get_element_by_id("card").unwrap();

    assert_eq!(doc.text_content(card), "Helloworldvar x;secret");
    let rendered = doc.inner_text(card);
    assert!(rendered.contains("Hello"));
    assert!(rendered.contains("world"));
    assert!(!rendered.contains("var x"));
    assert!(!rendered.contains("secret"));
    assert_eq!(
        rendered.split_whitespace().collect::<Vec<_>>(),
        vec!["Hello", "world"]
    );
}

#[test]
fn test_get_element_by_id_ignores_empty() {
    let doc = Document::from_body([ElementSpec::new("div").attr("id", "")]);
    assert!(doc.get_element_by_id("").is_none());
}

#[test]
fn test_element_from_point_prefers_paint_order_then_area() {
    let doc = Document::from_body([
        ElementSpec::new("div")
            .attr("id", "backdrop")
            .bounds(0.0, 0.0, 500.0, 500.0)
            .child(
                ElementSpec::new("button")
                    .attr("id", "inner")
                    .bounds(10.0, 10.0, 100.0, 40.0),
            ),
        ElementSpec::new("div")
            .attr("id", "dialog")
            .bounds(200.0, 200.0, 100.0, 100.0)
            .paint_order(10),
    ]);

    let inner = doc.get_element_by_id("inner").unwrap();
    let backdrop = doc.get_element_by_id("backdrop").unwrap();
    let dialog = doc.get_element_by_id("dialog").unwrap();

    assert_eq!(doc.element_from_point(20.0, 20.0), Some(inner));
    assert_eq!(doc.element_from_point(400.0, 20.0), Some(backdrop));
    assert_eq!(doc.element_from_point(250.0, 250.0), Some(dialog));
    assert_eq!(doc.element_from_point(900.0, 900.0), None);
}

#[test]
fn test_element_from_point_skips_invisible() {
    let mut doc = Document::from_body([ElementSpec::new("div").attr("id", "ghost")]);
    let ghost = doc.get_element_by_id("ghost").unwrap();
    let mut layout = LayoutBox::new(BoundingBox::new(0.0, 0.0, 10.0, 10.0), 0);
    layout.visible = false;
    doc.set_layout(ghost, layout);
    assert_eq!(doc.element_from_point(5.0, 5.0), None);
}

#[test]
fn test_selector_and_xpath_errors_surface() {
    let doc = Document::from_body(Vec::new());
    assert!(doc.query_selector("div[").is_err());
    assert!(doc.evaluate_xpath("//*[").is_err());
}
