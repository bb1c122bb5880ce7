//! Page-side half of Inspect AX (the content script).
//!
//! Runs against one [`inspect_ax_dom::Document`] and owns everything that
//! needs the live page:
//!
//! - [`descriptor`] - builds a [`TargetDescriptor`](inspect_ax_protocols::TargetDescriptor)
//!   for a right-clicked element
//! - [`locator`] - re-finds that element later through an ordered fallback chain
//! - [`snapshot`] - computes the accessible role and name
//! - [`overlay`] - renders, positions and dismisses the result surface
//! - [`ContentScript`] - wires the above to the message channel
//!
//! ## Flow
//!
//! ```text
//! contextmenu ──► capture ──► record-context-target ──► background
//!                                                           │
//! overlay ◄── snapshot ◄── locate ◄── inspect-target-in-page ┘
//! ```

pub mod content_script;
pub mod descriptor;
pub mod error;
pub mod locator;
pub mod overlay;
pub mod snapshot;

pub use content_script::{ContentScript, EventReport};
pub use descriptor::{CapturePayload, ClientPoint, DescriptorBuilder};
pub use error::{ClipboardError, NativeAccessibilityError};
pub use locator::{ElementLocator, HitTester, LayoutHitTester, LocatorStage, NoHitTesting};
pub use overlay::{
    Clipboard, ClipboardChain, DismissTrigger, DispatchOutcome, MemoryClipboard, OverlayPresenter,
    OverlayView, PageEvent, TextSelection, ValueField,
};
pub use snapshot::{
    NameSource, NativeAccessibility, NoNativeAccessibility, RecordedAccessibility,
    SnapshotEngine,
};
