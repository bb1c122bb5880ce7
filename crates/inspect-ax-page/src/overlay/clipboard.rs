//! Clipboard capability with a primary/fallback chain.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use crate::error::ClipboardError;

/// Text clipboard (`navigator.clipboard`, or the `execCommand("copy")`
/// fallback).
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// In-memory clipboard that records every successful write.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    writes: Mutex<Vec<String>>,
    failure: Option<ClipboardError>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes always fail with `error`.
    pub fn failing(error: ClipboardError) -> Self {
        Self {
            writes: Mutex::new(Vec::new()),
            failure: Some(error),
        }
    }

    pub fn last(&self) -> Option<String> {
        self.writes.lock().last().cloned()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.writes.lock().push(text.to_string());
        Ok(())
    }
}

/// Tries the primary clipboard, then the fallback.
#[derive(Clone, Default)]
pub struct ClipboardChain {
    primary: Option<Arc<dyn Clipboard>>,
    fallback: Option<Arc<dyn Clipboard>>,
}

impl ClipboardChain {
    pub fn new(primary: Option<Arc<dyn Clipboard>>, fallback: Option<Arc<dyn Clipboard>>) -> Self {
        Self { primary, fallback }
    }

    /// Copy `text`; `false` when it is empty or every clipboard failed.
    pub async fn copy(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }

        if let Some(primary) = &self.primary {
            match primary.write_text(text).await {
                Ok(()) => return true,
                Err(e) => debug!("Primary clipboard failed, trying fallback: {}", e),
            }
        }

        match &self.fallback {
            Some(fallback) => match fallback.write_text(text).await {
                Ok(()) => true,
                Err(e) => {
                    debug!("Fallback clipboard failed: {}", e);
                    false
                }
            },
            None => false,
        }
    }
}
