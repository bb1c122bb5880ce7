//! Target Registry.
//!
//! One entry per tab, stored in session storage under
//! `<storage_prefix><tab_id>`:
//!
//! ```text
//! EMPTY ──record──► RECORDED ──consume──► EMPTY
//!                      │  (fresh: target, stale: TargetExpired)
//!                      └──record──► RECORDED (overwritten)
//! ```
//!
//! Expiry is checked lazily when consuming; nothing sweeps stale entries.

use std::sync::Arc;

use inspect_ax_config::RegistryConfig;
use inspect_ax_protocols::{Clock, InspectError, NotFoundKind, RegisteredTarget, TabId};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::sanitize::Sanitizer;
use crate::storage::SessionStorage;

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

/// Per-tab, single-use, time-bounded store of captured targets.
pub struct TargetRegistry {
    storage: Arc<dyn SessionStorage>,
    clock: Arc<dyn Clock>,
    sanitizer: Sanitizer,
    ttl_ms: i64,
    storage_prefix: String,
}

impl TargetRegistry {
    pub fn new(
        storage: Arc<dyn SessionStorage>,
        clock: Arc<dyn Clock>,
        config: &RegistryConfig,
    ) -> Self {
        Self {
            storage,
            clock,
            sanitizer: Sanitizer::new(config),
            ttl_ms: config.ttl_ms,
            storage_prefix: config.storage_prefix.clone(),
        }
    }

    /// Storage key for a tab.
    pub fn key(&self, tab_id: TabId) -> String {
        format!("{}{}", self.storage_prefix, tab_id)
    }

    pub fn ttl_ms(&self) -> i64 {
        self.ttl_ms
    }

    /// Sanitize `payload` and store it for `tab_id`, replacing any previous
    /// entry. A payload without selector and XPath is rejected and leaves
    /// the current entry untouched.
    pub async fn record(
        &self,
        tab_id: TabId,
        payload: &Value,
        frame_id: u32,
    ) -> Result<RegisteredTarget, InspectError> {
        let descriptor = self.sanitizer.sanitize(payload);
        if !descriptor.has_locator() {
            debug!("Rejected capture for tab {}: no selector or XPath", tab_id);
            return Err(InspectError::DescriptorRejected);
        }

        let target = RegisteredTarget::new(descriptor, frame_id, self.clock.now_ms());
        let value = serde_json::to_value(&target).map_err(storage_error)?;
        self.storage
            .set(&self.key(tab_id), value)
            .await
            .map_err(storage_error)?;

        info!(
            "Recorded <{}> for tab {} frame {}",
            target.descriptor.tag_name, tab_id, frame_id
        );
        Ok(target)
    }

    /// Take the entry for `tab_id`. The entry is removed whatever the
    /// outcome; a second consume never succeeds.
    pub async fn consume(&self, tab_id: TabId) -> Result<RegisteredTarget, InspectError> {
        let key = self.key(tab_id);
        let stored = self.storage.get(&key).await;

        if let Err(e) = self.storage.remove(&key).await {
            warn!("Failed to clear target for tab {}: {}", tab_id, e);
        }

        let value = stored
            .map_err(storage_error)?
            .ok_or(InspectError::TargetNotFound(NotFoundKind::NotCaptured))?;
        let target: RegisteredTarget = serde_json::from_value(value).map_err(|e| {
            storage_error(StorageError::Malformed {
                key: key.clone(),
                reason: e.to_string(),
            })
        })?;

        let now = self.clock.now_ms();
        if target.is_expired(now, self.ttl_ms) {
            let age_ms = target.age_ms(now);
            info!("Target for tab {} expired ({} ms old)", tab_id, age_ms);
            return Err(InspectError::TargetExpired { age_ms });
        }

        debug!("Consumed target for tab {}", tab_id);
        Ok(target)
    }

    /// Entry for `tab_id` without consuming it.
    pub async fn peek(&self, tab_id: TabId) -> Result<Option<RegisteredTarget>, InspectError> {
        let Some(value) = self
            .storage
            .get(&self.key(tab_id))
            .await
            .map_err(storage_error)?
        else {
            return Ok(None);
        };
        serde_json::from_value(value)
            .map(Some)
            .map_err(storage_error)
    }
}

fn storage_error(e: impl std::fmt::Display) -> InspectError {
    InspectError::Storage(e.to_string())
}
