//! # Inspect AX Config
//!
//! Configuration management for the inspector: registry freshness window and
//! payload caps, context-menu identity, snapshot limits, overlay geometry and
//! logging.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
