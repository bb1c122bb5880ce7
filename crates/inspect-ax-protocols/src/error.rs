//! Error taxonomy for capture, registry and resolution failures.
//!
//! The `Display` text of [`InspectError`] is exactly what the overlay shows
//! in its error slot.

use std::fmt;

use thiserror::Error;

use crate::message::TabId;

/// Why a target could not be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    /// The registry holds nothing for the tab.
    NotCaptured,
    /// Every locator stage came up empty in the page.
    Unresolved,
}

impl fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundKind::NotCaptured => f.write_str(
                "No right-click target was captured for this tab. Right-click an element first.",
            ),
            NotFoundKind::Unresolved => f.write_str(
                "Could not resolve the selected element. Try right-clicking it again.",
            ),
        }
    }
}

/// Failures surfaced to the user by an inspection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InspectError {
    #[error("No valid selector or XPath captured.")]
    DescriptorRejected,

    #[error("{0}")]
    TargetNotFound(NotFoundKind),

    #[error("Captured target is stale. Right-click the element again.")]
    TargetExpired { age_ms: i64 },

    #[error("No tab context available.")]
    NoTabContext,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Messaging(#[from] MessagingError),
}

/// Delivery failures on the message channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagingError {
    #[error("Could not establish connection. Receiving end does not exist in tab {0}.")]
    NoReceiver(TabId),

    #[error("Frame {frame_id} of tab {tab_id} is not available")]
    FrameUnavailable { tab_id: TabId, frame_id: u32 },

    #[error("Message channel closed before a response arrived")]
    ChannelClosed,

    #[error("Message serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for MessagingError {
    fn from(e: serde_json::Error) -> Self {
        MessagingError::Serialization(e.to_string())
    }
}
