use super::*;
use crate::builder::ElementSpec;

fn sample() -> Document {
    Document::from_body([
        ElementSpec::new("div").children([
            ElementSpec::new("p").text("first"),
            ElementSpec::new("p").attr("id", "second").text("second"),
        ]),
        ElementSpec::new("div").children([
            ElementSpec::new("p").text("third"),
            ElementSpec::new("a").attr("href", "/x").text("link"),
        ]),
    ])
}

fn text_of(doc: &Document, expression: &str) -> Option<String> {
    doc.evaluate_xpath(expression)
        .unwrap()
        .map(|n| doc.text_content(n))
}

#[test]
fn test_absolute_indexed_path() {
    let doc = sample();
    assert_eq!(
        text_of(&doc, "/html[1]/body[1]/div[2]/p[1]").as_deref(),
        Some("third")
    );
    assert_eq!(
        text_of(&doc, "/html[1]/body[1]/div[1]/p[2]").as_deref(),
        Some("second")
    );
}

#[test]
fn test_out_of_range_index_yields_nothing() {
    let doc = sample();
    assert_eq!(text_of(&doc, "/html[1]/body[1]/div[3]"), None);
}

#[test]
fn test_id_xpath() {
    let doc = sample();
    assert_eq!(
        text_of(&doc, "//*[@id=\"second\"]").as_deref(),
        Some("second")
    );
    assert_eq!(text_of(&doc, "//*[@id='second']").as_deref(), Some("second"));
    assert_eq!(text_of(&doc, "//*[@id=\"missing\"]"), None);
}

#[test]
fn test_descendant_positional_is_per_parent() {
    let doc = sample();
    // `//p[1]` selects the first p of each div; first in document order wins.
    assert_eq!(text_of(&doc, "//p[1]").as_deref(), Some("first"));
    assert_eq!(text_of(&doc, "//div[2]//p").as_deref(), Some("third"));
}

#[test]
fn test_attribute_presence_and_wildcard() {
    let doc = sample();
    assert_eq!(text_of(&doc, "//*[@href]").as_deref(), Some("link"));
    assert_eq!(
        text_of(&doc, "/html/body/*[2]/*[2]").as_deref(),
        Some("link")
    );
}

#[test]
fn test_case_insensitive_names() {
    let doc = sample();
    assert_eq!(text_of(&doc, "/HTML/BODY/DIV/P").as_deref(), Some("first"));
}

#[test]
fn test_syntax_errors() {
    assert_eq!(XPath::parse("  "), Err(XPathError::Empty));
    assert!(matches!(XPath::parse("/html/"), Err(XPathError::UnexpectedEnd)));
    assert!(matches!(
        XPath::parse("//*[@id=\"x]"),
        Err(XPathError::UnterminatedLiteral)
    ));
    assert!(matches!(
        XPath::parse("/html[0]"),
        Err(XPathError::InvalidPredicate(_))
    ));
    assert!(matches!(
        XPath::parse("/html[@id=x]"),
        Err(XPathError::InvalidPredicate(_))
    ));
    assert!(matches!(
        XPath::parse("/html | /body"),
        Err(XPathError::Unexpected { .. })
    ));
}

#[test]
fn test_detached_nodes_are_not_selected() {
    let mut doc = sample();
    let target = doc.get_element_by_id("second").unwrap();
    doc.remove(target);
    assert_eq!(text_of(&doc, "//*[@id=\"second\"]"), None);
}
