//! CSS selector subset.
//!
//! Supported grammar:
//!
//! ```text
//! list      := complex ("," complex)*
//! complex   := compound (combinator compound)*
//! combinator:= ">" | whitespace
//! compound  := (tag | "*")? (#id | .class | [attr] | [attr op value] | :pseudo)*
//! op        := "=" | "~=" | "^=" | "$=" | "*="
//! pseudo    := :not(compound, ...) | :nth-of-type(n) | :first-of-type
//! ```
//!
//! Identifiers accept backslash and hex escapes as produced by
//! [`crate::css_escape`].

mod parser;

use crate::document::Document;
use crate::error::SelectorError;
use crate::node::NodeId;

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AttrOp {
    Equals,
    Includes,
    Prefix,
    Suffix,
    Substring,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Filter {
    Id(String),
    Class(String),
    Attr {
        name: String,
        matcher: Option<(AttrOp, String)>,
    },
    Not(Vec<Compound>),
    NthOfType(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Compound {
    /// `None` is the universal selector.
    pub(crate) tag: Option<String>,
    pub(crate) filters: Vec<Filter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ComplexSelector {
    pub(crate) parts: Vec<Compound>,
    /// `combinators[i]` joins `parts[i]` and `parts[i + 1]`.
    pub(crate) combinators: Vec<Combinator>,
}

/// A parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let selectors = parser::Parser::new(source).parse_list()?;
        Ok(Self { selectors })
    }

    /// Whether `node` matches any selector in the list.
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        doc.is_element(node)
            && self
                .selectors
                .iter()
                .any(|s| matches_complex(doc, node, s, s.parts.len() - 1))
    }

    /// `node` itself or its nearest matching ancestor.
    pub fn closest(&self, doc: &Document, node: NodeId) -> Option<NodeId> {
        std::iter::once(node)
            .chain(doc.ancestors(node))
            .find(|&n| self.matches(doc, n))
    }

    pub fn query_first(&self, doc: &Document) -> Option<NodeId> {
        doc.elements().into_iter().find(|&n| self.matches(doc, n))
    }

    pub fn query_all(&self, doc: &Document) -> Vec<NodeId> {
        doc.elements()
            .into_iter()
            .filter(|&n| self.matches(doc, n))
            .collect()
    }
}

fn matches_complex(doc: &Document, node: NodeId, selector: &ComplexSelector, index: usize) -> bool {
    if !matches_compound(doc, node, &selector.parts[index]) {
        return false;
    }
    if index == 0 {
        return true;
    }
    match selector.combinators[index - 1] {
        Combinator::Child => doc
            .parent_element(node)
            .is_some_and(|parent| matches_complex(doc, parent, selector, index - 1)),
        Combinator::Descendant => doc
            .ancestors(node)
            .any(|ancestor| matches_complex(doc, ancestor, selector, index - 1)),
    }
}

fn matches_compound(doc: &Document, node: NodeId, compound: &Compound) -> bool {
    let Some(element) = doc.element(node) else {
        return false;
    };
    if let Some(tag) = &compound.tag {
        if element.tag_name != *tag {
            return false;
        }
    }
    compound.filters.iter().all(|filter| match filter {
        Filter::Id(id) => element.attribute("id") == Some(id.as_str()),
        Filter::Class(class) => element.class_list().any(|c| c == class),
        Filter::Attr { name, matcher } => match (element.attribute(name), matcher) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(actual), Some((op, expected))) => attr_matches(actual, *op, expected),
        },
        Filter::Not(compounds) => !compounds.iter().any(|c| matches_compound(doc, node, c)),
        Filter::NthOfType(n) => nth_of_type(doc, node) == *n,
    })
}

fn attr_matches(actual: &str, op: AttrOp, expected: &str) -> bool {
    match op {
        AttrOp::Equals => actual == expected,
        AttrOp::Includes => actual.split_ascii_whitespace().any(|token| token == expected),
        AttrOp::Prefix => !expected.is_empty() && actual.starts_with(expected),
        AttrOp::Suffix => !expected.is_empty() && actual.ends_with(expected),
        AttrOp::Substring => !expected.is_empty() && actual.contains(expected),
    }
}

/// 1-based position among element siblings sharing the tag name.
pub(crate) fn nth_of_type(doc: &Document, node: NodeId) -> usize {
    let tag = doc.tag_name(node);
    let mut position = 1;
    let mut current = doc.previous_element_sibling(node);
    while let Some(sibling) = current {
        if doc.tag_name(sibling) == tag {
            position += 1;
        }
        current = doc.previous_element_sibling(sibling);
    }
    position
}
