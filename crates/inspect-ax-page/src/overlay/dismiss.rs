//! Document-level dismiss listeners for the overlay.

use inspect_ax_dom::NodeId;

use crate::descriptor::ClientPoint;

/// Input events delivered to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    MouseDown {
        target: Option<NodeId>,
    },
    ContextMenu {
        target: Option<NodeId>,
        point: ClientPoint,
    },
    KeyDown {
        key: String,
    },
}

impl PageEvent {
    pub fn trigger(&self) -> DismissTrigger {
        match self {
            PageEvent::MouseDown { .. } => DismissTrigger::MouseDown,
            PageEvent::ContextMenu { .. } => DismissTrigger::ContextMenu,
            PageEvent::KeyDown { .. } => DismissTrigger::KeyDown,
        }
    }
}

/// Event types the overlay listens for while shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissTrigger {
    MouseDown,
    ContextMenu,
    KeyDown,
}

/// The three dismiss listeners of one overlay.
///
/// Registered together and cleared together; there is no way to remove a
/// single listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DismissListeners {
    popup: NodeId,
    registered: Vec<DismissTrigger>,
}

impl DismissListeners {
    pub fn register(popup: NodeId) -> Self {
        Self {
            popup,
            registered: vec![
                DismissTrigger::MouseDown,
                DismissTrigger::ContextMenu,
                DismissTrigger::KeyDown,
            ],
        }
    }

    pub fn popup(&self) -> NodeId {
        self.popup
    }

    pub fn registered(&self) -> &[DismissTrigger] {
        &self.registered
    }

    pub fn is_listening(&self, trigger: DismissTrigger) -> bool {
        self.registered.contains(&trigger)
    }

    pub fn clear(&mut self) {
        self.registered.clear();
    }
}

/// What a dispatched event did to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No listener for this event.
    Ignored,
    /// A listener ran and kept the overlay.
    Kept,
    /// A listener ran and removed the overlay.
    Dismissed,
}
