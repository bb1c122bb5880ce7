//! Recursive-descent parser for the selector subset.

use super::{AttrOp, Combinator, ComplexSelector, Compound, Filter};
use crate::error::SelectorError;

pub(crate) struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    pub(crate) fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    pub(crate) fn parse_list(&mut self) -> Result<Vec<ComplexSelector>, SelectorError> {
        self.skip_whitespace();
        if self.peek().is_none() {
            return Err(SelectorError::Empty);
        }

        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            selectors.push(self.parse_complex()?);
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(',') => self.pos += 1,
                Some(found) => return Err(self.unexpected(found)),
            }
        }
        Ok(selectors)
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        let mut parts = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_whitespace = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') | Some(')') => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some(_) if had_whitespace => Combinator::Descendant,
                Some(found) => return Err(self.unexpected(found)),
            };
            combinators.push(combinator);
            parts.push(self.parse_compound()?);
        }

        Ok(ComplexSelector { parts, combinators })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();
        let mut universal = false;

        match self.peek() {
            Some('*') => {
                self.pos += 1;
                universal = true;
            }
            Some(c) if is_ident_char(c) || c == '\\' => {
                compound.tag = Some(self.parse_ident()?.to_ascii_lowercase());
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    compound.filters.push(Filter::Id(self.parse_ident()?));
                }
                Some('.') => {
                    self.pos += 1;
                    compound.filters.push(Filter::Class(self.parse_ident()?));
                }
                Some('[') => {
                    self.pos += 1;
                    compound.filters.push(self.parse_attribute()?);
                }
                Some(':') => {
                    self.pos += 1;
                    compound.filters.push(self.parse_pseudo()?);
                }
                _ => break,
            }
        }

        if compound.tag.is_none() && compound.filters.is_empty() && !universal {
            return match self.peek() {
                Some(found) => Err(self.unexpected(found)),
                None => Err(SelectorError::UnexpectedEnd),
            };
        }
        Ok(compound)
    }

    fn parse_attribute(&mut self) -> Result<Filter, SelectorError> {
        self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let op = match self.next() {
            Some(']') => return Ok(Filter::Attr { name, matcher: None }),
            Some('=') => AttrOp::Equals,
            Some(c @ ('~' | '^' | '$' | '*')) => {
                self.expect('=')?;
                match c {
                    '~' => AttrOp::Includes,
                    '^' => AttrOp::Prefix,
                    '$' => AttrOp::Suffix,
                    _ => AttrOp::Substring,
                }
            }
            Some(found) => return Err(self.unexpected_at(self.pos - 1, found)),
            None => return Err(SelectorError::UnexpectedEnd),
        };

        self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                self.parse_string(quote)?
            }
            Some(_) => self.parse_ident()?,
            None => return Err(SelectorError::UnexpectedEnd),
        };
        self.skip_whitespace();
        self.expect(']')?;

        Ok(Filter::Attr {
            name,
            matcher: Some((op, value)),
        })
    }

    fn parse_pseudo(&mut self) -> Result<Filter, SelectorError> {
        let name = self.parse_ident()?.to_ascii_lowercase();
        match name.as_str() {
            "not" => {
                self.expect('(')?;
                let mut compounds = Vec::new();
                loop {
                    self.skip_whitespace();
                    compounds.push(self.parse_compound()?);
                    self.skip_whitespace();
                    match self.next() {
                        Some(',') => continue,
                        Some(')') => break,
                        Some(found) => return Err(self.unexpected_at(self.pos - 1, found)),
                        None => return Err(SelectorError::UnexpectedEnd),
                    }
                }
                Ok(Filter::Not(compounds))
            }
            "nth-of-type" => {
                self.expect('(')?;
                let mut argument = String::new();
                loop {
                    match self.next() {
                        Some(')') => break,
                        Some(c) => argument.push(c),
                        None => return Err(SelectorError::UnexpectedEnd),
                    }
                }
                let trimmed = argument.trim();
                match trimmed.parse::<usize>() {
                    Ok(n) if n >= 1 => Ok(Filter::NthOfType(n)),
                    _ => Err(SelectorError::InvalidNth(trimmed.to_string())),
                }
            }
            "first-of-type" => Ok(Filter::NthOfType(1)),
            other => Err(SelectorError::UnsupportedPseudo(other.to_string())),
        }
    }

    fn parse_ident(&mut self) -> Result<String, SelectorError> {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.pos += 1;
                ident.push(self.parse_escape());
            } else if is_ident_char(c) {
                self.pos += 1;
                ident.push(c);
            } else {
                break;
            }
        }
        if ident.is_empty() {
            return match self.peek() {
                Some(found) => Err(self.unexpected(found)),
                None => Err(SelectorError::UnexpectedEnd),
            };
        }
        Ok(ident)
    }

    fn parse_string(&mut self, quote: char) -> Result<String, SelectorError> {
        let mut value = String::new();
        loop {
            match self.next() {
                Some(c) if c == quote => return Ok(value),
                Some('\\') => {
                    if self.peek() == Some('\n') {
                        self.pos += 1;
                    } else {
                        value.push(self.parse_escape());
                    }
                }
                Some(c) => value.push(c),
                None => return Err(SelectorError::UnexpectedEnd),
            }
        }
    }

    /// Called after a backslash has been consumed.
    fn parse_escape(&mut self) -> char {
        let mut hex = String::new();
        while hex.len() < 6 {
            match self.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    hex.push(c);
                    self.pos += 1;
                }
                _ => break,
            }
        }

        if hex.is_empty() {
            return match self.next() {
                Some(c) => c,
                None => '\u{FFFD}',
            };
        }

        if matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .filter(|&code| code != 0)
            .and_then(char::from_u32)
            .unwrap_or('\u{FFFD}')
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn expect(&mut self, expected: char) -> Result<(), SelectorError> {
        match self.next() {
            Some(c) if c == expected => Ok(()),
            Some(found) => Err(self.unexpected_at(self.pos - 1, found)),
            None => Err(SelectorError::UnexpectedEnd),
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

    fn unexpected(&self, found: char) -> SelectorError {
        self.unexpected_at(self.pos, found)
    }

    fn unexpected_at(&self, offset: usize, found: char) -> SelectorError {
        SelectorError::Unexpected { offset, found }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || (c as u32) >= 0x80
}
