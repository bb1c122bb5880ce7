//! Message contracts that cross the page/background boundary.
//!
//! Every message is a `{type, payload}` object, matching the shape used on
//! the extension runtime channel.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{InspectionResult, TargetDescriptor};

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;

/// Opaque browser tab identifier.
pub type TabId = i64;

/// Messages delivered to the page (background -> page).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum PageMessage {
    /// Resolve the descriptor, compute the snapshot and render it.
    InspectTargetInPage(TargetDescriptor),
    /// Render the given result as is.
    ShowAxPopup(InspectionResult),
}

impl PageMessage {
    pub fn type_name(&self) -> &'static str {
        match self {
            PageMessage::InspectTargetInPage(_) => "inspect-target-in-page",
            PageMessage::ShowAxPopup(_) => "show-ax-popup",
        }
    }
}

/// Messages delivered to the background (page -> background).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum BackgroundMessage {
    /// Untrusted capture payload; the registry sanitizes it before storing.
    RecordContextTarget(Value),
}

/// Response to any message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageResponse {
    pub fn ok() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
        }
    }
}

/// Tab the message originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: TabId,
}

/// Sender metadata attached by the runtime to page -> background messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSender {
    #[serde(default)]
    pub tab: Option<TabInfo>,
    #[serde(default)]
    pub frame_id: Option<u32>,
}

impl MessageSender {
    pub fn from_frame(tab_id: TabId, frame_id: u32) -> Self {
        Self {
            tab: Some(TabInfo { id: tab_id }),
            frame_id: Some(frame_id),
        }
    }

    pub fn tab_id(&self) -> Option<TabId> {
        self.tab.map(|t| t.id)
    }
}
