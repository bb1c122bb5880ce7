//! In-process extension runtime.
//!
//! The background half and every page frame run on their own tokio tasks
//! and only talk through channels, one request and one reply per message:
//!
//! ```text
//! ContentScript ──RuntimePort──► background task ──► ServiceWorker
//! ServiceWorker ──TabRouter────► frame task ───────► ContentScript
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use inspect_ax_background::{
    MemoryContextMenus, MemorySessionStorage, MenuClickInfo, MenuClickOutcome, MenuError,
    ServiceWorker,
};
use inspect_ax_config::Config;
use inspect_ax_dom::{Document, NodeId};
use inspect_ax_page::{ClientPoint, ContentScript, EventReport, PageEvent, RecordedAccessibility};
use inspect_ax_protocols::{
    BackgroundMessage, Clock, MessageResponse, MessageSender, MessagingError, PageMessage,
    RuntimeMessenger, TabId, TabInfo, TabMessenger,
};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};
use uuid::Uuid;

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;

const CHANNEL_CAPACITY: usize = 32;

/// Frame 0 is the top frame.
pub const TOP_FRAME: u32 = 0;

type FrameKey = (TabId, u32);

struct PageEnvelope {
    id: Uuid,
    message: PageMessage,
    reply: oneshot::Sender<MessageResponse>,
}

struct BackgroundEnvelope {
    id: Uuid,
    message: BackgroundMessage,
    sender: MessageSender,
    reply: oneshot::Sender<MessageResponse>,
}

/// Background -> page delivery over per-frame channels.
#[derive(Clone, Default)]
pub struct TabRouter {
    frames: Arc<DashMap<FrameKey, mpsc::Sender<PageEnvelope>>>,
}

impl TabRouter {
    fn attach(&self, tab_id: TabId, frame_id: u32, sender: mpsc::Sender<PageEnvelope>) {
        self.frames.insert((tab_id, frame_id), sender);
    }

    fn detach(&self, tab_id: TabId, frame_id: u32) {
        self.frames.remove(&(tab_id, frame_id));
    }

    pub fn has_tab(&self, tab_id: TabId) -> bool {
        self.frames.iter().any(|entry| entry.key().0 == tab_id)
    }
}

#[async_trait]
impl TabMessenger for TabRouter {
    async fn send_to_tab(
        &self,
        tab_id: TabId,
        message: PageMessage,
        frame_id: Option<u32>,
    ) -> Result<MessageResponse, MessagingError> {
        if !self.has_tab(tab_id) {
            return Err(MessagingError::NoReceiver(tab_id));
        }
        let frame_id = frame_id.unwrap_or(TOP_FRAME);
        let channel = self
            .frames
            .get(&(tab_id, frame_id))
            .map(|entry| entry.value().clone())
            .ok_or(MessagingError::FrameUnavailable { tab_id, frame_id })?;

        let id = Uuid::new_v4();
        debug!(
            "[{}] '{}' -> tab {} frame {}",
            id,
            message.type_name(),
            tab_id,
            frame_id
        );
        let (reply, response) = oneshot::channel();
        channel
            .send(PageEnvelope { id, message, reply })
            .await
            .map_err(|_| MessagingError::ChannelClosed)?;
        response.await.map_err(|_| MessagingError::ChannelClosed)
    }
}

/// Page -> background delivery for one frame; attaches the sender.
pub struct RuntimePort {
    sender: MessageSender,
    channel: mpsc::Sender<BackgroundEnvelope>,
}

#[async_trait]
impl RuntimeMessenger for RuntimePort {
    async fn send_to_background(
        &self,
        message: BackgroundMessage,
    ) -> Result<MessageResponse, MessagingError> {
        let id = Uuid::new_v4();
        debug!("[{}] page -> background", id);
        let (reply, response) = oneshot::channel();
        self.channel
            .send(BackgroundEnvelope {
                id,
                message,
                sender: self.sender,
                reply,
            })
            .await
            .map_err(|_| MessagingError::ChannelClosed)?;
        response.await.map_err(|_| MessagingError::ChannelClosed)
    }
}

/// A browser session hosting the extension.
///
/// Must be started inside a tokio runtime.
pub struct ExtensionRuntime {
    config: Config,
    clock: Arc<dyn Clock>,
    worker: Arc<ServiceWorker>,
    storage: Arc<MemorySessionStorage>,
    menus: Arc<MemoryContextMenus>,
    router: TabRouter,
    background: mpsc::Sender<BackgroundEnvelope>,
    frames: DashMap<FrameKey, Arc<ContentScript>>,
}

impl ExtensionRuntime {
    pub fn start(config: Config, clock: Arc<dyn Clock>) -> Self {
        let storage = Arc::new(MemorySessionStorage::new());
        let menus = Arc::new(MemoryContextMenus::new());
        let router = TabRouter::default();
        let worker = Arc::new(ServiceWorker::new(
            storage.clone(),
            clock.clone(),
            menus.clone(),
            Arc::new(router.clone()),
            &config,
        ));

        let (background, mut inbox) = mpsc::channel::<BackgroundEnvelope>(CHANNEL_CAPACITY);
        let handler = worker.clone();
        tokio::spawn(async move {
            while let Some(envelope) = inbox.recv().await {
                let response = handler.handle(envelope.message, envelope.sender).await;
                debug!("[{}] background replied ok={}", envelope.id, response.ok);
                let _ = envelope.reply.send(response);
            }
            debug!("Background task stopped");
        });

        Self {
            config,
            clock,
            worker,
            storage,
            menus,
            router,
            background,
            frames: DashMap::new(),
        }
    }

    pub fn worker(&self) -> &ServiceWorker {
        &self.worker
    }

    pub fn storage(&self) -> &MemorySessionStorage {
        &self.storage
    }

    pub fn menus(&self) -> &MemoryContextMenus {
        &self.menus
    }

    /// Run the install handler.
    pub async fn install(&self) -> Result<(), MenuError> {
        self.worker.on_installed().await
    }

    /// Load `document` into a frame and start its content script.
    pub fn open_frame(
        &self,
        tab_id: TabId,
        frame_id: u32,
        document: Document,
    ) -> Arc<ContentScript> {
        let port = RuntimePort {
            sender: MessageSender::from_frame(tab_id, frame_id),
            channel: self.background.clone(),
        };
        let script = Arc::new(
            ContentScript::new(document, Arc::new(port), &self.config)
                .with_native_accessibility(Arc::new(RecordedAccessibility))
                .with_clock(self.clock.clone()),
        );

        let (sender, mut inbox) = mpsc::channel::<PageEnvelope>(CHANNEL_CAPACITY);
        let page = script.clone();
        tokio::spawn(async move {
            while let Some(envelope) = inbox.recv().await {
                let response = page.handle_message(envelope.message);
                debug!("[{}] frame replied ok={}", envelope.id, response.ok);
                let _ = envelope.reply.send(response);
            }
        });

        self.router.attach(tab_id, frame_id, sender);
        self.frames.insert((tab_id, frame_id), script.clone());
        info!("Opened tab {} frame {}", tab_id, frame_id);
        script
    }

    /// Unload a frame; its task ends once the channel closes.
    pub fn close_frame(&self, tab_id: TabId, frame_id: u32) {
        self.router.detach(tab_id, frame_id);
        self.frames.remove(&(tab_id, frame_id));
    }

    pub fn frame(&self, tab_id: TabId, frame_id: u32) -> Option<Arc<ContentScript>> {
        self.frames
            .get(&(tab_id, frame_id))
            .map(|entry| entry.value().clone())
    }

    /// Right-click `target` in a frame. `None` when the frame is not open.
    pub async fn right_click(
        &self,
        tab_id: TabId,
        frame_id: u32,
        target: Option<NodeId>,
        point: ClientPoint,
    ) -> Option<EventReport> {
        let script = self.frame(tab_id, frame_id)?;
        Some(
            script
                .on_event(PageEvent::ContextMenu { target, point })
                .await,
        )
    }

    /// Choose the "Inspect AX" entry in a context menu opened in a frame.
    pub async fn click_menu(&self, tab_id: TabId, frame_id: u32) -> MenuClickOutcome {
        let info = MenuClickInfo::new(&self.config.menu.id).in_frame(frame_id);
        self.worker
            .on_menu_clicked(&info, Some(TabInfo { id: tab_id }))
            .await
    }
}
