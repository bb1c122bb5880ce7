//! XPath subset: location paths over element children.
//!
//! Supports `/` and `//` steps, `*` or tag name tests, positional predicates
//! (`[3]`), attribute presence (`[@href]`) and attribute equality
//! (`[@id="x"]`). Name tests match case-insensitively, as for HTML documents.

use std::collections::HashSet;

use crate::document::Document;
use crate::error::XPathError;
use crate::node::NodeId;

#[cfg(test)]
#[path = "xpath_tests.rs"]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    Position(usize),
    HasAttr(String),
    AttrEquals(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    /// `//` before this step.
    descendant: bool,
    /// `None` is `*`.
    name: Option<String>,
    predicates: Vec<Predicate>,
}

/// A parsed XPath location path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XPath {
    steps: Vec<Step>,
}

impl XPath {
    pub fn parse(expression: &str) -> Result<Self, XPathError> {
        let mut parser = Parser {
            chars: expression.trim().chars().collect(),
            pos: 0,
        };
        if parser.chars.is_empty() {
            return Err(XPathError::Empty);
        }
        parser.parse_path()
    }

    /// Every element the path selects (unordered).
    fn select(&self, doc: &Document) -> HashSet<NodeId> {
        let mut context = vec![doc.document_node()];

        for step in &self.steps {
            let mut next = Vec::new();
            let mut seen = HashSet::new();
            for &ctx in &context {
                let bases = if step.descendant {
                    std::iter::once(ctx).chain(doc.descendants(ctx)).collect()
                } else {
                    vec![ctx]
                };
                for base in bases {
                    for node in step.apply(doc, base) {
                        if seen.insert(node) {
                            next.push(node);
                        }
                    }
                }
            }
            context = next;
        }

        context.into_iter().collect()
    }

    /// First selected element in document order.
    pub fn first_element(&self, doc: &Document) -> Option<NodeId> {
        let selected = self.select(doc);
        if selected.is_empty() {
            return None;
        }
        doc.elements().into_iter().find(|n| selected.contains(n))
    }
}

impl Step {
    fn apply(&self, doc: &Document, base: NodeId) -> Vec<NodeId> {
        let mut candidates: Vec<NodeId> = doc
            .element_children(base)
            .filter(|&child| match &self.name {
                None => true,
                Some(name) => doc.tag_name(child) == Some(name.as_str()),
            })
            .collect();

        for predicate in &self.predicates {
            candidates = match predicate {
                Predicate::Position(n) => candidates.get(n - 1).copied().into_iter().collect(),
                Predicate::HasAttr(attr) => candidates
                    .into_iter()
                    .filter(|&c| doc.has_attribute(c, attr))
                    .collect(),
                Predicate::AttrEquals(attr, value) => candidates
                    .into_iter()
                    .filter(|&c| doc.attribute(c, attr) == Some(value.as_str()))
                    .collect(),
            };
        }
        candidates
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn parse_path(&mut self) -> Result<XPath, XPathError> {
        let mut steps = Vec::new();
        let mut descendant = false;

        if self.peek() == Some('/') {
            self.pos += 1;
            if self.peek() == Some('/') {
                self.pos += 1;
                descendant = true;
            }
        }

        loop {
            steps.push(self.parse_step(descendant)?);
            match self.peek() {
                None => break,
                Some('/') => {
                    self.pos += 1;
                    descendant = if self.peek() == Some('/') {
                        self.pos += 1;
                        true
                    } else {
                        false
                    };
                }
                Some(found) => return Err(self.unexpected(found)),
            }
        }

        Ok(XPath { steps })
    }

    fn parse_step(&mut self, descendant: bool) -> Result<Step, XPathError> {
        let name = match self.peek() {
            Some('*') => {
                self.pos += 1;
                None
            }
            Some(_) => Some(self.parse_name()?.to_ascii_lowercase()),
            None => return Err(XPathError::UnexpectedEnd),
        };

        let mut predicates = Vec::new();
        while self.peek() == Some('[') {
            self.pos += 1;
            predicates.push(self.parse_predicate()?);
        }

        Ok(Step {
            descendant,
            name,
            predicates,
        })
    }

    fn parse_predicate(&mut self) -> Result<Predicate, XPathError> {
        self.skip_whitespace();
        let predicate = match self.peek() {
            Some(c) if c.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some(d) = self.peek().filter(char::is_ascii_digit) {
                    digits.push(d);
                    self.pos += 1;
                }
                match digits.parse::<usize>() {
                    Ok(n) if n >= 1 => Predicate::Position(n),
                    _ => return Err(XPathError::InvalidPredicate(digits)),
                }
            }
            Some('@') => {
                self.pos += 1;
                let attr = self.parse_name()?.to_ascii_lowercase();
                self.skip_whitespace();
                if self.peek() == Some('=') {
                    self.pos += 1;
                    self.skip_whitespace();
                    let value = self.parse_literal()?;
                    Predicate::AttrEquals(attr, value)
                } else {
                    Predicate::HasAttr(attr)
                }
            }
            Some(found) => return Err(self.unexpected(found)),
            None => return Err(XPathError::UnexpectedEnd),
        };
        self.skip_whitespace();
        match self.next() {
            Some(']') => Ok(predicate),
            Some(found) => Err(XPathError::Unexpected {
                offset: self.pos - 1,
                found,
            }),
            None => Err(XPathError::UnexpectedEnd),
        }
    }

    fn parse_literal(&mut self) -> Result<String, XPathError> {
        let quote = match self.next() {
            Some(q @ ('"' | '\'')) => q,
            Some(other) => {
                return Err(XPathError::InvalidPredicate(format!(
                    "expected string literal, found '{}'",
                    other
                )));
            }
            None => return Err(XPathError::UnexpectedEnd),
        };
        let mut value = String::new();
        loop {
            match self.next() {
                Some(c) if c == quote => return Ok(value),
                Some(c) => value.push(c),
                None => return Err(XPathError::UnterminatedLiteral),
            }
        }
    }

    fn parse_name(&mut self) -> Result<String, XPathError> {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':') {
                name.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        if name.is_empty() {
            return match self.peek() {
                Some(found) => Err(self.unexpected(found)),
                None => Err(XPathError::UnexpectedEnd),
            };
        }
        Ok(name)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn unexpected(&self, found: char) -> XPathError {
        XPathError::Unexpected {
            offset: self.pos,
            found,
        }
    }
}
