use super::*;
use async_trait::async_trait;
use inspect_ax_dom::ElementSpec;
use inspect_ax_protocols::{ManualClock, Pointer};

use crate::error::ClipboardError;
use crate::overlay::MemoryClipboard;

/// Records every message and answers with a fixed outcome.
struct RecordingRuntime {
    sent: Mutex<Vec<BackgroundMessage>>,
    outcome: Result<MessageResponse, MessagingError>,
}

impl RecordingRuntime {
    fn answering(outcome: Result<MessageResponse, MessagingError>) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            outcome,
        })
    }

    fn sent(&self) -> Vec<BackgroundMessage> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl RuntimeMessenger for RecordingRuntime {
    async fn send_to_background(
        &self,
        message: BackgroundMessage,
    ) -> Result<MessageResponse, MessagingError> {
        self.sent.lock().push(message);
        self.outcome.clone()
    }
}

fn page() -> Document {
    Document::from_body([
        ElementSpec::new("button").attr("id", "save").text("Save"),
        ElementSpec::new("div")
            .attr("class", "card")
            .attr("role", "button")
            .child(ElementSpec::new("span").text("Delete item")),
        ElementSpec::new("p").text("Plain paragraph"),
    ])
}

fn script(runtime: Arc<RecordingRuntime>) -> ContentScript {
    ContentScript::new(page(), runtime, &Config::default())
}

fn save_button(script: &ContentScript) -> Option<NodeId> {
    script.with_document(|doc| doc.get_element_by_id("save"))
}

fn descriptor(selector: &str) -> TargetDescriptor {
    TargetDescriptor {
        selector: selector.to_string(),
        xpath: String::new(),
        tag_name: String::new(),
        pointer: Some(Pointer::new(40, 30)),
    }
}

#[tokio::test]
async fn test_context_menu_records_capture() {
    let runtime = RecordingRuntime::answering(Ok(MessageResponse::ok()));
    let script = script(runtime.clone());
    let target = save_button(&script);

    let report = script
        .on_event(PageEvent::ContextMenu {
            target,
            point: ClientPoint::new(10.4, 20.6),
        })
        .await;
    assert_eq!(report.capture, Some(MessageResponse::ok()));
    assert_eq!(report.dispatch, DispatchOutcome::Ignored);

    let sent = runtime.sent();
    assert_eq!(sent.len(), 1);
    let BackgroundMessage::RecordContextTarget(payload) = &sent[0];
    assert_eq!(payload["selector"], "#save");
    assert_eq!(payload["xpath"], "//*[@id=\"save\"]");
    assert_eq!(payload["tagName"], "button");
    assert_eq!(payload["pointer"]["x"], 10.4);
    assert_eq!(payload["pointer"]["y"], 20.6);
}

#[tokio::test]
async fn test_context_menu_without_element_sends_nothing() {
    let runtime = RecordingRuntime::answering(Ok(MessageResponse::ok()));
    let script = script(runtime.clone());

    let report = script
        .on_event(PageEvent::ContextMenu {
            target: None,
            point: ClientPoint::new(1.0, 1.0),
        })
        .await;
    assert_eq!(report.capture, None);
    assert!(runtime.sent().is_empty());
}

#[tokio::test]
async fn test_delivery_failure_is_swallowed() {
    let runtime = RecordingRuntime::answering(Err(MessagingError::ChannelClosed));
    let script = script(runtime.clone());
    let target = save_button(&script);

    let report = script
        .on_event(PageEvent::ContextMenu {
            target,
            point: ClientPoint::new(5.0, 5.0),
        })
        .await;
    assert_eq!(report.capture, None);
    assert_eq!(runtime.sent().len(), 1);
    assert!(script.overlay().is_none());
}

#[tokio::test]
async fn test_right_click_captures_then_dismisses_overlay() {
    let runtime = RecordingRuntime::answering(Ok(MessageResponse::ok()));
    let script = script(runtime.clone());
    script.handle_message(PageMessage::InspectTargetInPage(descriptor("#save")));
    assert!(script.overlay().is_some());

    let target = save_button(&script);
    let report = script
        .on_event(PageEvent::ContextMenu {
            target,
            point: ClientPoint::new(5.0, 5.0),
        })
        .await;
    assert_eq!(report.dispatch, DispatchOutcome::Dismissed);
    assert_eq!(runtime.sent().len(), 1);
    assert!(script.overlay().is_none());
    assert_eq!(script.overlay_listeners(), 0);
}

#[test]
fn test_inspect_message_renders_snapshot() {
    let script = script(RecordingRuntime::answering(Ok(MessageResponse::ok())));

    let response = script.handle_message(PageMessage::InspectTargetInPage(descriptor("#save")));
    assert_eq!(response, MessageResponse::ok());

    let view = script.overlay().unwrap();
    assert_eq!(view.value(ValueField::Role), Some("button"));
    assert_eq!(view.value(ValueField::Name), Some("Save"));
    assert_eq!(view.pointer, Some(Pointer::new(40, 30)));
    assert_eq!(script.overlay_listeners(), 3);
}

#[test]
fn test_generic_target_uses_semantic_ancestor() {
    let script = script(RecordingRuntime::answering(Ok(MessageResponse::ok())));

    let result = script.inspect(&descriptor("div.card > span"));
    assert!(result.ok);
    assert_eq!(result.role.as_deref(), Some("button"));
    assert_eq!(result.name.as_deref(), Some("Delete item"));
}

#[test]
fn test_unresolved_target_renders_error() {
    let script = script(RecordingRuntime::answering(Ok(MessageResponse::ok())));

    let result = script.inspect(&descriptor("#gone"));
    assert!(!result.ok);
    assert_eq!(result.pointer, Some(Pointer::new(40, 30)));
    assert_eq!(
        result.error.as_deref(),
        Some("Could not resolve the selected element. Try right-clicking it again.")
    );

    script.handle_message(PageMessage::InspectTargetInPage(descriptor("#gone")));
    let view = script.overlay().unwrap();
    assert_eq!(
        view.error(),
        Some("Could not resolve the selected element. Try right-clicking it again.")
    );
}

#[test]
fn test_show_popup_renders_result_as_is() {
    let script = script(RecordingRuntime::answering(Ok(MessageResponse::ok())));

    let response = script.handle_message(PageMessage::ShowAxPopup(InspectionResult::failure(
        None,
        "Captured target is stale. Right-click the element again.",
    )));
    assert!(response.ok);
    let view = script.overlay().unwrap();
    assert_eq!(
        view.error(),
        Some("Captured target is stale. Right-click the element again.")
    );
    assert_eq!(view.pointer, None);
    assert_eq!(script.last_result().map(|r| r.ok), Some(false));
}

#[test]
fn test_plain_paragraph_reports_generic_with_text() {
    let script = script(RecordingRuntime::answering(Ok(MessageResponse::ok())));
    let paragraph = script.with_document(|doc| doc.query_selector("p").unwrap().unwrap());
    let snapshot = script.snapshot_of(paragraph);
    assert_eq!(snapshot, AccessibilitySnapshot::new("generic", "Plain paragraph"));
}

#[tokio::test]
async fn test_click_value_copies_and_shows_status() {
    let clipboard = Arc::new(MemoryClipboard::new());
    let clock = Arc::new(ManualClock::new(5_000));
    let script = script(RecordingRuntime::answering(Ok(MessageResponse::ok())))
        .with_clipboard(ClipboardChain::new(Some(clipboard.clone()), None))
        .with_clock(clock.clone());
    script.handle_message(PageMessage::InspectTargetInPage(descriptor("#save")));

    assert!(script.click_value(ValueField::Role, None).await);
    assert_eq!(clipboard.last().as_deref(), Some("button"));
    assert_eq!(script.copy_status().as_deref(), Some("Copied: button"));

    clock.advance(900);
    assert_eq!(script.copy_status(), None);
}

#[tokio::test]
async fn test_click_value_copies_selection_inside_value() {
    let clipboard = Arc::new(MemoryClipboard::new());
    let script = script(RecordingRuntime::answering(Ok(MessageResponse::ok())))
        .with_clipboard(ClipboardChain::new(Some(clipboard.clone()), None));
    script.handle_message(PageMessage::InspectTargetInPage(descriptor("div.card")));

    let name_node = script.value_node(ValueField::Name).unwrap();
    let text_node = script.with_document(|doc| doc.children(name_node)[0]);
    let selection = TextSelection::new(" item ", text_node, text_node);

    assert!(script.click_value(ValueField::Name, Some(selection)).await);
    assert_eq!(clipboard.last().as_deref(), Some("item"));
}

#[tokio::test]
async fn test_click_value_failure_leaves_no_status() {
    let script = script(RecordingRuntime::answering(Ok(MessageResponse::ok()))).with_clipboard(
        ClipboardChain::new(
            Some(Arc::new(MemoryClipboard::failing(ClipboardError::Denied))),
            None,
        ),
    );
    script.handle_message(PageMessage::InspectTargetInPage(descriptor("#save")));

    assert!(!script.click_value(ValueField::Name, None).await);
    assert_eq!(script.copy_status(), None);
}

#[tokio::test]
async fn test_click_value_without_overlay() {
    let script = script(RecordingRuntime::answering(Ok(MessageResponse::ok())));
    assert!(!script.click_value(ValueField::Role, None).await);
}
