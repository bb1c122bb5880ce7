//! Messaging capabilities.
//!
//! The browser runtime is a black box: each send either produces a response
//! or fails with a catchable [`MessagingError`].

use async_trait::async_trait;

use crate::error::MessagingError;
use crate::message::{BackgroundMessage, MessageResponse, PageMessage, TabId};

/// Background -> page delivery (`tabs.sendMessage`).
#[async_trait]
pub trait TabMessenger: Send + Sync {
    /// Send to one tab. `frame_id = None` targets the top frame.
    async fn send_to_tab(
        &self,
        tab_id: TabId,
        message: PageMessage,
        frame_id: Option<u32>,
    ) -> Result<MessageResponse, MessagingError>;
}

/// Page -> background delivery (`runtime.sendMessage`).
///
/// The sender's tab and frame are attached by the implementation.
#[async_trait]
pub trait RuntimeMessenger: Send + Sync {
    async fn send_to_background(
        &self,
        message: BackgroundMessage,
    ) -> Result<MessageResponse, MessagingError>;
}
