//! # Inspect AX Protocols
//!
//! Shared contracts between the page half (content script) and the
//! background half (service worker) of the inspector.
//!
//! ## Core Concepts
//!
//! - **TargetDescriptor**: serializable recipe to find an element again
//! - **RegisteredTarget**: a descriptor held by the background registry
//! - **InspectionResult**: what the overlay renders
//! - **PageMessage / BackgroundMessage**: the request/response contracts that
//!   cross the message channel
//! - **Clock / TabMessenger / RuntimeMessenger**: injected capabilities

pub mod clock;
pub mod error;
pub mod message;
pub mod messenger;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{InspectError, MessagingError, NotFoundKind};
pub use message::{
    BackgroundMessage, MessageResponse, MessageSender, PageMessage, TabId, TabInfo,
};
pub use messenger::{RuntimeMessenger, TabMessenger};
pub use types::{
    is_generic_role, has_readable_value, AccessibilitySnapshot, InspectionResult, Pointer,
    RegisteredTarget, TargetDescriptor, MISSING_VALUE,
};

/// Identifier of the single context-menu entry.
pub const MENU_ID: &str = "inspect-ax";

/// Title shown for the context-menu entry and the overlay header.
pub const MENU_TITLE: &str = "Inspect AX";

/// Session storage key prefix for the per-tab registered target.
pub const STORAGE_PREFIX: &str = "lastContextTarget:";

/// Default freshness window for a captured target.
pub const TARGET_TTL_MS: i64 = 15_000;
