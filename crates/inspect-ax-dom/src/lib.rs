//! In-memory document model for Inspect AX.
//!
//! A small DOM: an arena of element and text nodes with the lookup
//! primitives the inspector relies on.
//!
//! ## Lookup primitives
//!
//! - [`SelectorList`] - a CSS selector subset (`querySelector`, `matches`, `closest`)
//! - [`XPath`] - an XPath subset evaluated to the first element in document order
//! - [`Document::element_from_point`] - topmost element under a viewport point
//!
//! ## Construction
//!
//! Documents are built from [`ElementSpec`] trees, either in code or from a
//! JSON [`PageFixture`].

mod builder;
mod document;
mod error;
mod escape;
mod layout;
mod node;
pub mod selector;
mod text;
pub mod xpath;

pub use builder::{ElementSpec, NodeSpec, PageFixture};
pub use document::Document;
pub use error::{FixtureError, SelectorError, XPathError};
pub use escape::css_escape;
pub use layout::{BoundingBox, LayoutBox, ViewportInfo};
pub use node::{ElementData, NodeData, NodeId, RecordedAx};
pub use selector::SelectorList;
pub use text::normalize_text;
pub use xpath::XPath;
