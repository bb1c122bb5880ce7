//! # Inspect AX Background
//!
//! Background half of the inspector (the service worker).
//!
//! ## Components
//!
//! - [`TargetRegistry`]: per-tab, single-use, time-bounded captured targets
//!   over a [`SessionStorage`] capability
//! - [`Sanitizer`]: caps and coerces untrusted capture payloads
//! - [`ContextMenus`]: the single "Inspect AX" menu entry
//! - [`ServiceWorker`]: install, message and menu-click handlers

pub mod error;
pub mod menus;
pub mod registry;
pub mod sanitize;
pub mod service_worker;
pub mod storage;

pub use error::{MenuError, StorageError};
pub use menus::{ContextMenus, MemoryContextMenus, MenuClickInfo, MenuItem};
pub use registry::TargetRegistry;
pub use sanitize::Sanitizer;
pub use service_worker::{MenuClickOutcome, ServiceWorker, RECORD_CONTEXT_TARGET};
pub use storage::{MemorySessionStorage, SessionStorage};
