use super::*;
use crate::builder::ElementSpec;
use crate::escape::css_escape;

fn sample() -> Document {
    Document::from_body([
        ElementSpec::new("nav").attr("class", "menu top").children([
            ElementSpec::new("a").attr("href", "/").text("Home"),
            ElementSpec::new("a").text("Anchor"),
        ]),
        ElementSpec::new("ul").children([
            ElementSpec::new("li").attr("class", "item").text("one"),
            ElementSpec::new("li").attr("class", "item").text("two"),
            ElementSpec::new("li")
                .attr("class", "item last")
                .child(ElementSpec::new("span").attr("role", "generic").text("three")),
        ]),
        ElementSpec::new("div")
            .attr("role", "button")
            .attr("id", "1st:btn")
            .child(ElementSpec::new("span").text("Click")),
        ElementSpec::new("div").attr("contenteditable", "false"),
    ])
}

fn tags(doc: &Document, nodes: &[NodeId]) -> Vec<String> {
    nodes
        .iter()
        .map(|&n| doc.tag_name(n).unwrap().to_string())
        .collect()
}

#[test]
fn test_type_selector() {
    let doc = sample();
    let found = doc.query_selector_all("li").unwrap();
    assert_eq!(found.len(), 3);
}

#[test]
fn test_class_and_id_selectors() {
    let doc = sample();
    assert_eq!(doc.query_selector_all(".item").unwrap().len(), 3);
    assert_eq!(doc.query_selector_all("li.last").unwrap().len(), 1);
    assert_eq!(doc.query_selector_all(".menu.top").unwrap().len(), 1);

    let selector = format!("#{}", css_escape("1st:btn"));
    let found = doc.query_selector(&selector).unwrap().unwrap();
    assert_eq!(doc.attribute(found, "role"), Some("button"));
}

#[test]
fn test_child_and_descendant_combinators() {
    let doc = sample();
    assert_eq!(doc.query_selector_all("ul > li > span").unwrap().len(), 1);
    assert_eq!(doc.query_selector_all("body span").unwrap().len(), 2);
    assert!(doc.query_selector_all("ul > span").unwrap().is_empty());
}

#[test]
fn test_nth_of_type() {
    let doc = sample();
    let second = doc.query_selector("ul > li:nth-of-type(2)").unwrap().unwrap();
    assert_eq!(doc.text_content(second), "two");
    let first = doc.query_selector("li:first-of-type").unwrap().unwrap();
    assert_eq!(doc.text_content(first), "one");
    // The nav's anchors and the ul's items are counted independently.
    assert_eq!(doc.query_selector_all("a:nth-of-type(2)").unwrap().len(), 1);
}

#[test]
fn test_attribute_selectors() {
    let doc = sample();
    assert_eq!(doc.query_selector_all("a[href]").unwrap().len(), 1);
    assert_eq!(doc.query_selector_all("[role=button]").unwrap().len(), 1);
    assert_eq!(doc.query_selector_all("[class~=\"last\"]").unwrap().len(), 1);
    assert_eq!(doc.query_selector_all("[class^='item']").unwrap().len(), 3);
    assert_eq!(doc.query_selector_all("[class$=top]").unwrap().len(), 1);
    assert_eq!(doc.query_selector_all("[class*=\"en\"]").unwrap().len(), 1);
}

#[test]
fn test_not_pseudo_class() {
    let doc = sample();
    let found = doc
        .query_selector_all("[role]:not([role=\"generic\"]):not([role=\"none\"])")
        .unwrap();
    assert_eq!(found.len(), 1);
    assert!(doc
        .query_selector_all("[contenteditable]:not([contenteditable=\"false\"])")
        .unwrap()
        .is_empty());
}

#[test]
fn test_selector_list() {
    let doc = sample();
    let found = doc.query_selector_all("nav, ul").unwrap();
    assert_eq!(tags(&doc, &found), vec!["nav", "ul"]);
}

#[test]
fn test_matches_and_closest() {
    let doc = sample();
    let span = doc.query_selector("div > span").unwrap().unwrap();
    let list = SelectorList::parse("[role]:not([role=\"generic\"])").unwrap();
    assert!(!list.matches(&doc, span));
    let closest = list.closest(&doc, span).unwrap();
    assert_eq!(doc.attribute(closest, "role"), Some("button"));
}

#[test]
fn test_universal_selector() {
    let doc = sample();
    let all = doc.query_selector_all("*").unwrap();
    assert_eq!(all.len(), doc.elements().len());
}

#[test]
fn test_syntax_errors() {
    assert_eq!(SelectorList::parse("   "), Err(SelectorError::Empty));
    assert!(matches!(
        SelectorList::parse("div >"),
        Err(SelectorError::UnexpectedEnd)
    ));
    assert!(matches!(
        SelectorList::parse("a[href"),
        Err(SelectorError::UnexpectedEnd)
    ));
    assert!(matches!(
        SelectorList::parse("li:hover"),
        Err(SelectorError::UnsupportedPseudo(_))
    ));
    assert!(matches!(
        SelectorList::parse("li:nth-of-type(2n+1)"),
        Err(SelectorError::InvalidNth(_))
    ));
    assert!(matches!(
        SelectorList::parse("div ! span"),
        Err(SelectorError::Unexpected { found: '!', .. })
    ));
}

#[test]
fn test_escaped_identifiers_round_trip() {
    for raw in ["a.b", "x:y", "1abc", "-9", "with space", "quote\"d", "-"] {
        let mut doc = Document::from_body([ElementSpec::new("div").attr("id", raw)]);
        let body = doc.body().unwrap();
        let extra = doc.create_element("p");
        doc.append_child(body, extra);

        let selector = format!("#{}", css_escape(raw));
        let found = doc.query_selector(&selector).unwrap();
        assert_eq!(
            found.and_then(|n| doc.attribute(n, "id")),
            Some(raw),
            "selector {selector} did not resolve"
        );
    }
}
