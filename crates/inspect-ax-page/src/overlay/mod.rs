//! Overlay Presenter.
//!
//! At most one overlay exists at a time. Rendering tears down the previous
//! surface and its listeners first; any dismiss trigger removes the surface
//! and all three listeners together.

mod clipboard;
mod dismiss;
mod position;
mod view;

use inspect_ax_config::OverlayConfig;
use inspect_ax_dom::{normalize_text, Document, NodeId};
use inspect_ax_protocols::InspectionResult;
use tracing::{debug, info};

pub use clipboard::{Clipboard, ClipboardChain, MemoryClipboard};
pub use dismiss::{DismissListeners, DismissTrigger, DispatchOutcome, PageEvent};
pub use position::{overlay_width, position_near_pointer, OverlayPosition};
pub use view::{
    MountedOverlay, OverlayBody, OverlayView, ValueField, DEFAULT_ERROR, POPUP_ID, STYLE_ID,
};

#[cfg(test)]
#[path = "overlay_tests.rs"]
mod tests;

/// A text selection in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSelection {
    pub text: String,
    pub anchor: NodeId,
    pub focus: NodeId,
}

impl TextSelection {
    pub fn new(text: impl Into<String>, anchor: NodeId, focus: NodeId) -> Self {
        Self {
            text: text.into(),
            anchor,
            focus,
        }
    }
}

#[derive(Debug, Clone)]
struct CopyStatus {
    text: String,
    visible_until: i64,
}

#[derive(Debug, Clone)]
struct ActiveOverlay {
    view: OverlayView,
    mounted: MountedOverlay,
    listeners: DismissListeners,
    copy_status: Option<CopyStatus>,
}

/// Renders inspection results into the page.
pub struct OverlayPresenter {
    config: OverlayConfig,
    title: String,
    active: Option<ActiveOverlay>,
}

impl OverlayPresenter {
    pub fn new(config: OverlayConfig, title: impl Into<String>) -> Self {
        Self {
            config,
            title: title.into(),
            active: None,
        }
    }

    /// Show `result`, replacing any current overlay.
    pub fn render(&mut self, doc: &mut Document, result: &InspectionResult) -> OverlayView {
        view::ensure_style(doc);
        self.remove_existing(doc);

        let width = overlay_width(doc.viewport(), &self.config);
        let mut view = OverlayView::from_result(result, &self.title, width);
        view.position = position_near_pointer(
            doc.viewport(),
            width,
            view.estimated_height(),
            view.pointer,
            &self.config,
        );

        let mounted = view::mount(doc, &view);
        info!(
            "Overlay shown at ({}, {}){}",
            view.position.left,
            view.position.top,
            if result.ok { "" } else { " with error" }
        );

        self.active = Some(ActiveOverlay {
            view: view.clone(),
            mounted,
            listeners: DismissListeners::register(mounted.popup),
            copy_status: None,
        });
        view
    }

    /// Deliver a page event to the dismiss listeners.
    pub fn dispatch(&mut self, doc: &mut Document, event: &PageEvent) -> DispatchOutcome {
        let Some(active) = self.active.as_mut() else {
            return DispatchOutcome::Ignored;
        };
        if !active.listeners.is_listening(event.trigger()) {
            return DispatchOutcome::Ignored;
        }

        let popup = active.mounted.popup;
        match event {
            PageEvent::MouseDown { target } | PageEvent::ContextMenu { target, .. } => {
                if !doc.is_connected(popup) {
                    active.listeners.clear();
                    return DispatchOutcome::Kept;
                }
                if target.is_some_and(|t| doc.contains(popup, t)) {
                    return DispatchOutcome::Kept;
                }
            }
            PageEvent::KeyDown { key } => {
                if key != "Escape" || !doc.is_connected(popup) {
                    return DispatchOutcome::Kept;
                }
            }
        }

        self.dismiss(doc);
        DispatchOutcome::Dismissed
    }

    /// Remove the overlay and its listeners.
    pub fn dismiss(&mut self, doc: &mut Document) {
        if let Some(mut active) = self.active.take() {
            active.listeners.clear();
            doc.remove(active.mounted.popup);
            debug!("Overlay dismissed");
        }
    }

    fn remove_existing(&mut self, doc: &mut Document) {
        if let Some(mut active) = self.active.take() {
            active.listeners.clear();
        }
        if let Some(existing) = doc.get_element_by_id(POPUP_ID) {
            doc.remove(existing);
        }
    }

    pub fn is_visible(&self, doc: &Document) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| doc.is_connected(active.mounted.popup))
    }

    pub fn view(&self) -> Option<&OverlayView> {
        self.active.as_ref().map(|active| &active.view)
    }

    pub fn popup(&self) -> Option<NodeId> {
        self.active.as_ref().map(|active| active.mounted.popup)
    }

    /// Listeners currently attached; empty when no overlay is active.
    pub fn listeners(&self) -> &[DismissTrigger] {
        self.active
            .as_ref()
            .map(|active| active.listeners.registered())
            .unwrap_or_default()
    }

    pub fn value_node(&self, field: ValueField) -> Option<NodeId> {
        self.active
            .as_ref()
            .and_then(|active| active.mounted.value_node(field))
    }

    /// Text a click on `field` copies: the trimmed selection when it lies
    /// entirely inside the value, otherwise the full value.
    pub fn copy_text_for(
        &self,
        doc: &Document,
        field: ValueField,
        selection: Option<&TextSelection>,
    ) -> Option<String> {
        let active = self.active.as_ref()?;
        let value = active.view.value(field)?;
        let node = active.mounted.value_node(field)?;

        let selected = selection
            .filter(|s| doc.contains(node, s.anchor) && doc.contains(node, s.focus))
            .map(|s| s.text.trim())
            .filter(|text| !text.is_empty());

        Some(selected.unwrap_or(value).to_string())
    }

    /// Show "Copied" feedback for `copy_status_ms`.
    pub fn mark_copied(&mut self, doc: &mut Document, text: &str, now_ms: i64) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let preview = normalize_text(text, self.config.copy_preview_len);
        let status = if preview.is_empty() {
            "Copied".to_string()
        } else {
            format!("Copied: {}", preview)
        };

        if let Some(node) = active.mounted.copy_status {
            view::set_copy_status(doc, node, &status, true);
        }
        active.copy_status = Some(CopyStatus {
            text: status,
            visible_until: now_ms + self.config.copy_status_ms,
        });
    }

    /// Current copy feedback, if still visible at `now_ms`. Hides the
    /// status in the page once it has expired.
    pub fn copy_status(&mut self, doc: &mut Document, now_ms: i64) -> Option<String> {
        let active = self.active.as_mut()?;
        let status = active.copy_status.as_ref()?;
        if now_ms < status.visible_until {
            return Some(status.text.clone());
        }

        if let Some(node) = active.mounted.copy_status {
            let text = status.text.clone();
            view::set_copy_status(doc, node, &text, false);
        }
        active.copy_status = None;
        None
    }
}
