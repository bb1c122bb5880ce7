//! Context-menu capability.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::MenuError;

/// A context-menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    /// Contexts the entry appears in, e.g. `all`.
    pub contexts: Vec<String>,
}

impl MenuItem {
    /// Entry shown in every context.
    pub fn everywhere(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            contexts: vec!["all".to_string()],
        }
    }
}

/// Click on a context-menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuClickInfo {
    pub menu_item_id: String,
    /// Frame the menu was opened in.
    #[serde(default)]
    pub frame_id: Option<u32>,
}

impl MenuClickInfo {
    pub fn new(menu_item_id: impl Into<String>) -> Self {
        Self {
            menu_item_id: menu_item_id.into(),
            frame_id: None,
        }
    }

    pub fn in_frame(mut self, frame_id: u32) -> Self {
        self.frame_id = Some(frame_id);
        self
    }
}

/// Browser context-menu registration (`chrome.contextMenus`).
#[async_trait]
pub trait ContextMenus: Send + Sync {
    async fn remove_all(&self) -> Result<(), MenuError>;

    async fn create(&self, item: MenuItem) -> Result<(), MenuError>;
}

/// In-memory context menus.
#[derive(Debug, Default)]
pub struct MemoryContextMenus {
    items: Mutex<Vec<MenuItem>>,
}

impl MemoryContextMenus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> Vec<MenuItem> {
        self.items.lock().clone()
    }
}

#[async_trait]
impl ContextMenus for MemoryContextMenus {
    async fn remove_all(&self) -> Result<(), MenuError> {
        self.items.lock().clear();
        Ok(())
    }

    async fn create(&self, item: MenuItem) -> Result<(), MenuError> {
        let mut items = self.items.lock();
        if items.iter().any(|existing| existing.id == item.id) {
            return Err(MenuError::DuplicateId(item.id));
        }
        items.push(item);
        Ok(())
    }
}
