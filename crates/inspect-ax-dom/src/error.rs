//! DOM lookup and fixture errors.

use thiserror::Error;

/// Selector syntax errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Unexpected character '{found}' at offset {offset}")]
    Unexpected { offset: usize, found: char },

    #[error("Unexpected end of selector")]
    UnexpectedEnd,

    #[error("Unsupported pseudo-class: {0}")]
    UnsupportedPseudo(String),

    #[error("Invalid nth-of-type argument: {0}")]
    InvalidNth(String),
}

/// XPath syntax errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XPathError {
    #[error("Empty XPath expression")]
    Empty,

    #[error("Unexpected character '{found}' at offset {offset}")]
    Unexpected { offset: usize, found: char },

    #[error("Unexpected end of XPath expression")]
    UnexpectedEnd,

    #[error("Unterminated string literal")]
    UnterminatedLiteral,

    #[error("Invalid predicate: {0}")]
    InvalidPredicate(String),
}

/// Page fixture loading errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Fixture root must be an <html> element, found <{0}>")]
    InvalidRoot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fixture JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
