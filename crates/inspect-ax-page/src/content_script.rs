//! The content script: page events and background messages in, overlay out.

use std::sync::Arc;

use inspect_ax_config::{Config, SnapshotConfig};
use inspect_ax_dom::{Document, NodeId};
use inspect_ax_protocols::{
    AccessibilitySnapshot, BackgroundMessage, Clock, InspectionResult, MessageResponse,
    MessagingError, PageMessage, RuntimeMessenger, SystemClock, TargetDescriptor,
};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::descriptor::{CapturePayload, ClientPoint, DescriptorBuilder};
use crate::locator::{ElementLocator, HitTester, LayoutHitTester};
use crate::overlay::{
    ClipboardChain, DispatchOutcome, OverlayPresenter, OverlayView, PageEvent, TextSelection,
    ValueField,
};
use crate::snapshot::{NativeAccessibility, NoNativeAccessibility, SnapshotEngine};

#[cfg(test)]
#[path = "content_script_tests.rs"]
mod tests;

/// What a page event did.
#[derive(Debug, Clone, PartialEq)]
pub struct EventReport {
    /// Overlay listener outcome.
    pub dispatch: DispatchOutcome,
    /// Background response to a capture, when one was sent and answered.
    pub capture: Option<MessageResponse>,
}

/// Page-side state for one frame.
pub struct ContentScript {
    document: Mutex<Document>,
    locator: ElementLocator,
    engine: SnapshotEngine,
    snapshot_config: SnapshotConfig,
    presenter: Mutex<OverlayPresenter>,
    last_result: Mutex<Option<InspectionResult>>,
    clipboard: ClipboardChain,
    runtime: Arc<dyn RuntimeMessenger>,
    clock: Arc<dyn Clock>,
}

impl ContentScript {
    /// Content script with layout hit testing, no native accessibility API
    /// and no clipboard.
    pub fn new(document: Document, runtime: Arc<dyn RuntimeMessenger>, config: &Config) -> Self {
        Self {
            document: Mutex::new(document),
            locator: ElementLocator::new(Arc::new(LayoutHitTester)),
            engine: SnapshotEngine::new(Arc::new(NoNativeAccessibility), &config.snapshot),
            snapshot_config: config.snapshot.clone(),
            presenter: Mutex::new(OverlayPresenter::new(
                config.overlay.clone(),
                config.menu.title.clone(),
            )),
            last_result: Mutex::new(None),
            clipboard: ClipboardChain::default(),
            runtime,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_native_accessibility(mut self, native: Arc<dyn NativeAccessibility>) -> Self {
        self.engine = SnapshotEngine::new(native, &self.snapshot_config);
        self
    }

    pub fn with_hit_tester(mut self, hit_tester: Arc<dyn HitTester>) -> Self {
        self.locator = ElementLocator::new(hit_tester);
        self
    }

    pub fn with_clipboard(mut self, clipboard: ClipboardChain) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Run `f` against the current document.
    pub fn with_document<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&self.document.lock())
    }

    /// Mutate the document (simulating page scripts).
    pub fn update_document<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        f(&mut self.document.lock())
    }

    // ------------------------------------------------------------------
    // Page events
    // ------------------------------------------------------------------

    /// Deliver a page event. A context menu event captures its target and
    /// records it with the background before the overlay listeners run.
    pub async fn on_event(&self, event: PageEvent) -> EventReport {
        let capture = match &event {
            PageEvent::ContextMenu { target, point } => self.capture(*target, *point).await,
            _ => None,
        };

        let dispatch = {
            let mut doc = self.document.lock();
            self.presenter.lock().dispatch(&mut doc, &event)
        };

        EventReport { dispatch, capture }
    }

    async fn capture(&self, target: Option<NodeId>, point: ClientPoint) -> Option<MessageResponse> {
        let payload = {
            let doc = self.document.lock();
            DescriptorBuilder::capture(&doc, target, point)
        }?;

        match self.send_capture(&payload).await {
            Ok(response) => {
                if !response.ok {
                    debug!(
                        "Background rejected capture: {}",
                        response.error.as_deref().unwrap_or("unknown")
                    );
                }
                Some(response)
            }
            Err(e) => {
                debug!("Capture not delivered: {}", e);
                None
            }
        }
    }

    async fn send_capture(&self, payload: &CapturePayload) -> Result<MessageResponse, MessagingError> {
        let value = payload.to_value()?;
        self.runtime
            .send_to_background(BackgroundMessage::RecordContextTarget(value))
            .await
    }

    // ------------------------------------------------------------------
    // Background messages
    // ------------------------------------------------------------------

    /// Handle a message from the background. Both message types render and
    /// answer `{ok: true}`.
    pub fn handle_message(&self, message: PageMessage) -> MessageResponse {
        debug!("Page received '{}'", message.type_name());
        let result = match message {
            PageMessage::InspectTargetInPage(descriptor) => self.inspect(&descriptor),
            PageMessage::ShowAxPopup(result) => result,
        };
        self.render(&result);
        MessageResponse::ok()
    }

    /// Resolve `descriptor` and compute its snapshot.
    pub fn inspect(&self, descriptor: &TargetDescriptor) -> InspectionResult {
        let doc = self.document.lock();
        match self.locator.locate(&doc, descriptor) {
            Ok(element) => {
                let snapshot = self.engine.compute_with_fallback(&doc, element);
                info!(
                    "Inspected <{}>: role '{}', name '{}'",
                    doc.tag_name(element).unwrap_or_default(),
                    snapshot.role,
                    snapshot.name
                );
                InspectionResult::success(descriptor.pointer, snapshot)
            }
            Err(e) => {
                warn!("Inspection failed: {}", e);
                InspectionResult::failure(descriptor.pointer, e.to_string())
            }
        }
    }

    /// Snapshot of a known element, bypassing the locator.
    pub fn snapshot_of(&self, element: NodeId) -> AccessibilitySnapshot {
        let doc = self.document.lock();
        self.engine.compute_with_fallback(&doc, element).displayed()
    }

    pub fn render(&self, result: &InspectionResult) -> OverlayView {
        *self.last_result.lock() = Some(result.clone());
        let mut doc = self.document.lock();
        self.presenter.lock().render(&mut doc, result)
    }

    /// Most recently rendered result.
    pub fn last_result(&self) -> Option<InspectionResult> {
        self.last_result.lock().clone()
    }

    // ------------------------------------------------------------------
    // Overlay
    // ------------------------------------------------------------------

    pub fn overlay(&self) -> Option<OverlayView> {
        let doc = self.document.lock();
        let presenter = self.presenter.lock();
        presenter
            .is_visible(&doc)
            .then(|| presenter.view().cloned())
            .flatten()
    }

    pub fn overlay_listeners(&self) -> usize {
        self.presenter.lock().listeners().len()
    }

    pub fn value_node(&self, field: ValueField) -> Option<NodeId> {
        self.presenter.lock().value_node(field)
    }

    /// Click a value row: copy the selection inside it, or the whole value.
    pub async fn click_value(&self, field: ValueField, selection: Option<TextSelection>) -> bool {
        let text = {
            let doc = self.document.lock();
            self.presenter
                .lock()
                .copy_text_for(&doc, field, selection.as_ref())
        };
        let Some(text) = text else {
            return false;
        };

        if !self.clipboard.copy(&text).await {
            return false;
        }

        let mut doc = self.document.lock();
        self.presenter
            .lock()
            .mark_copied(&mut doc, &text, self.clock.now_ms());
        true
    }

    pub fn copy_status(&self) -> Option<String> {
        let mut doc = self.document.lock();
        self.presenter
            .lock()
            .copy_status(&mut doc, self.clock.now_ms())
    }
}
