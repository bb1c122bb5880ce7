//! Background event handlers: install, page messages, menu clicks.

use std::sync::Arc;

use inspect_ax_config::{Config, MenuConfig};
use inspect_ax_protocols::{
    BackgroundMessage, Clock, InspectError, InspectionResult, MessageResponse, MessageSender,
    MessagingError, PageMessage, TabId, TabInfo, TabMessenger,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::MenuError;
use crate::menus::{ContextMenus, MenuClickInfo, MenuItem};
use crate::registry::TargetRegistry;
use crate::storage::SessionStorage;

#[cfg(test)]
#[path = "service_worker_tests.rs"]
mod tests;

/// Message type the background answers.
pub const RECORD_CONTEXT_TARGET: &str = "record-context-target";

/// What a menu click led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuClickOutcome {
    /// Another menu entry, or no tab.
    Ignored,
    /// The target was sent to the page; `frame_id` is `None` when delivery
    /// fell back to the top frame.
    Inspected { frame_id: Option<u32> },
    /// An error popup was requested. `delivered` is false when the page
    /// could not receive it either.
    Failed { error: String, delivered: bool },
}

/// The service worker: owns the registry and talks to tabs.
pub struct ServiceWorker {
    registry: TargetRegistry,
    menus: Arc<dyn ContextMenus>,
    tabs: Arc<dyn TabMessenger>,
    menu: MenuConfig,
}

impl ServiceWorker {
    pub fn new(
        storage: Arc<dyn SessionStorage>,
        clock: Arc<dyn Clock>,
        menus: Arc<dyn ContextMenus>,
        tabs: Arc<dyn TabMessenger>,
        config: &Config,
    ) -> Self {
        Self {
            registry: TargetRegistry::new(storage, clock, &config.registry),
            menus,
            tabs,
            menu: config.menu.clone(),
        }
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    /// Replace every context-menu entry with the inspector entry.
    pub async fn on_installed(&self) -> Result<(), MenuError> {
        self.menus.remove_all().await?;
        self.menus
            .create(MenuItem::everywhere(&self.menu.id, &self.menu.title))
            .await?;
        info!("Context menu '{}' registered", self.menu.id);
        Ok(())
    }

    /// Raw runtime message. Returns `None` for message types the
    /// background does not handle.
    pub async fn on_message(
        &self,
        message: &Value,
        sender: MessageSender,
    ) -> Option<MessageResponse> {
        let message_type = message.get("type").and_then(Value::as_str)?;
        if message_type != RECORD_CONTEXT_TARGET {
            debug!("Ignoring message type '{}'", message_type);
            return None;
        }

        let payload = message.get("payload").cloned().unwrap_or(Value::Null);
        Some(
            self.handle(BackgroundMessage::RecordContextTarget(payload), sender)
                .await,
        )
    }

    /// Typed runtime message.
    pub async fn handle(
        &self,
        message: BackgroundMessage,
        sender: MessageSender,
    ) -> MessageResponse {
        match message {
            BackgroundMessage::RecordContextTarget(payload) => {
                match self.record(&payload, sender).await {
                    Ok(()) => MessageResponse::ok(),
                    Err(e) => MessageResponse::error(e.to_string()),
                }
            }
        }
    }

    async fn record(&self, payload: &Value, sender: MessageSender) -> Result<(), InspectError> {
        let tab_id = sender.tab_id().ok_or(InspectError::NoTabContext)?;
        self.registry
            .record(tab_id, payload, sender.frame_id.unwrap_or(0))
            .await?;
        Ok(())
    }

    /// Menu click: consume the tab's target and ask its frame to inspect
    /// it. Any failure is shown as an error popup in the top frame.
    pub async fn on_menu_clicked(
        &self,
        info: &MenuClickInfo,
        tab: Option<TabInfo>,
    ) -> MenuClickOutcome {
        let Some(tab) = tab else {
            return MenuClickOutcome::Ignored;
        };
        if info.menu_item_id != self.menu.id {
            return MenuClickOutcome::Ignored;
        }

        match self.inspect(tab.id).await {
            Ok(frame_id) => MenuClickOutcome::Inspected { frame_id },
            Err(e) => {
                let error = e.to_string();
                warn!("Inspection in tab {} failed: {}", tab.id, error);
                let popup = PageMessage::ShowAxPopup(InspectionResult::failure(None, &error));
                let delivered = match self.send_to_frame(tab.id, popup, 0).await {
                    Ok(_) => true,
                    Err(e) => {
                        debug!("Error popup not delivered to tab {}: {}", tab.id, e);
                        false
                    }
                };
                MenuClickOutcome::Failed { error, delivered }
            }
        }
    }

    async fn inspect(&self, tab_id: TabId) -> Result<Option<u32>, InspectError> {
        let target = self.registry.consume(tab_id).await?;
        let message = PageMessage::InspectTargetInPage(target.descriptor);
        let frame_id = self.send_to_frame(tab_id, message, target.frame_id).await?;
        info!("Inspect request delivered to tab {}", tab_id);
        Ok(frame_id)
    }

    /// Send to `frame_id`, falling back to the top frame. Returns the frame
    /// option that was used.
    async fn send_to_frame(
        &self,
        tab_id: TabId,
        message: PageMessage,
        frame_id: u32,
    ) -> Result<Option<u32>, MessagingError> {
        match self
            .tabs
            .send_to_tab(tab_id, message.clone(), Some(frame_id))
            .await
        {
            Ok(_) => return Ok(Some(frame_id)),
            Err(e) => debug!(
                "Frame {} of tab {} unreachable, using top frame: {}",
                frame_id, tab_id, e
            ),
        }
        self.tabs.send_to_tab(tab_id, message, None).await?;
        Ok(None)
    }
}
