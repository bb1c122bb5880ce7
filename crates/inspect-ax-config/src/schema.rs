//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub menu: MenuConfig,

    #[serde(default)]
    pub snapshot: SnapshotConfig,

    #[serde(default)]
    pub overlay: OverlayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Target registry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Freshness window for a captured target in milliseconds.
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: i64,

    #[serde(default = "default_max_locator_len")]
    pub max_selector_len: usize,

    #[serde(default = "default_max_locator_len")]
    pub max_xpath_len: usize,

    #[serde(default = "default_max_tag_len")]
    pub max_tag_len: usize,

    /// Session storage key prefix, followed by the tab id.
    #[serde(default = "default_storage_prefix")]
    pub storage_prefix: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_ttl_ms(),
            max_selector_len: default_max_locator_len(),
            max_xpath_len: default_max_locator_len(),
            max_tag_len: default_max_tag_len(),
            storage_prefix: default_storage_prefix(),
        }
    }
}

fn default_ttl_ms() -> i64 {
    15_000
}

fn default_max_locator_len() -> usize {
    2_048
}

fn default_max_tag_len() -> usize {
    64
}

fn default_storage_prefix() -> String {
    "lastContextTarget:".to_string()
}

/// Context-menu entry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    #[serde(default = "default_menu_id")]
    pub id: String,

    #[serde(default = "default_menu_title")]
    pub title: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            id: default_menu_id(),
            title: default_menu_title(),
        }
    }
}

fn default_menu_id() -> String {
    "inspect-ax".to_string()
}

fn default_menu_title() -> String {
    "Inspect AX".to_string()
}

/// Accessibility snapshot limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Maximum characters kept from normalized text.
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,

    /// Ancestor steps walked when the element's role is generic.
    #[serde(default = "default_max_ancestor_steps")]
    pub max_ancestor_steps: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            max_text_len: default_max_text_len(),
            max_ancestor_steps: default_max_ancestor_steps(),
        }
    }
}

fn default_max_text_len() -> usize {
    200
}

fn default_max_ancestor_steps() -> usize {
    5
}

/// Overlay geometry and copy feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    #[serde(default = "default_overlay_width")]
    pub width: f64,

    #[serde(default = "default_overlay_margin")]
    pub margin: f64,

    #[serde(default = "default_pointer_offset")]
    pub pointer_offset: f64,

    #[serde(default = "default_copy_preview_len")]
    pub copy_preview_len: usize,

    #[serde(default = "default_copy_status_ms")]
    pub copy_status_ms: i64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            width: default_overlay_width(),
            margin: default_overlay_margin(),
            pointer_offset: default_pointer_offset(),
            copy_preview_len: default_copy_preview_len(),
            copy_status_ms: default_copy_status_ms(),
        }
    }
}

fn default_overlay_width() -> f64 {
    220.0
}

fn default_overlay_margin() -> f64 {
    8.0
}

fn default_pointer_offset() -> f64 {
    10.0
}

fn default_copy_preview_len() -> usize {
    24
}

fn default_copy_status_ms() -> i64 {
    900
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also write daily-rotated log files.
    #[serde(default)]
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
