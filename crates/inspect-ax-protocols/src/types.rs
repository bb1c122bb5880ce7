//! Core data model: descriptors, registry entries, snapshots and results.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;

/// Sentinel rendered for an unknown role or name.
pub const MISSING_VALUE: &str = "-";

/// Client coordinates of the originating right-click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pointer {
    pub x: i64,
    pub y: i64,
}

impl Pointer {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Serializable recipe to relocate an element later.
///
/// Built once at capture time and never mutated afterwards. At least one of
/// `selector` and `xpath` must be non-empty for the registry to accept it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetDescriptor {
    /// CSS selector, `#id` when the element carries an id.
    #[serde(default)]
    pub selector: String,
    /// Absolute XPath or an id-based XPath.
    #[serde(default)]
    pub xpath: String,
    /// Lowercase tag name of the captured element.
    #[serde(default)]
    pub tag_name: String,
    /// Client coordinates of the right-click.
    #[serde(default)]
    pub pointer: Option<Pointer>,
}

impl TargetDescriptor {
    /// Whether the descriptor carries a selector or an XPath.
    pub fn has_locator(&self) -> bool {
        !self.selector.is_empty() || !self.xpath.is_empty()
    }
}

/// A descriptor held by the background registry for one tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredTarget {
    #[serde(flatten)]
    pub descriptor: TargetDescriptor,
    /// Frame that reported the capture.
    #[serde(default)]
    pub frame_id: u32,
    /// Capture time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub recorded_at: i64,
}

impl RegisteredTarget {
    pub fn new(descriptor: TargetDescriptor, frame_id: u32, recorded_at: i64) -> Self {
        Self {
            descriptor,
            frame_id,
            recorded_at,
        }
    }

    /// Milliseconds elapsed since capture.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms - self.recorded_at
    }

    /// Stale once strictly older than the TTL.
    pub fn is_expired(&self, now_ms: i64, ttl_ms: i64) -> bool {
        self.age_ms(now_ms) > ttl_ms
    }
}

/// Computed accessible role and name of one element.
///
/// Empty strings mean "unknown" while computing; [`AccessibilitySnapshot::displayed`]
/// swaps them for the `-` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessibilitySnapshot {
    pub role: String,
    pub name: String,
}

impl AccessibilitySnapshot {
    pub fn new(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            name: name.into(),
        }
    }

    pub fn is_generic(&self) -> bool {
        is_generic_role(&self.role)
    }

    pub fn has_readable_name(&self) -> bool {
        has_readable_value(&self.name)
    }

    /// Replace empty fields with the sentinel.
    pub fn displayed(self) -> Self {
        let fill = |value: String| {
            if value.is_empty() {
                MISSING_VALUE.to_string()
            } else {
                value
            }
        };
        Self {
            role: fill(self.role),
            name: fill(self.name),
        }
    }
}

/// Empty or `generic`, case-insensitive.
pub fn is_generic_role(role: &str) -> bool {
    let normalized = role.trim();
    normalized.is_empty() || normalized.eq_ignore_ascii_case("generic")
}

/// Non-empty and not the sentinel.
pub fn has_readable_value(value: &str) -> bool {
    let text = value.trim();
    !text.is_empty() && text != MISSING_VALUE
}

/// Outcome of one inspection, handed to the overlay presenter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InspectionResult {
    pub ok: bool,
    #[serde(default)]
    pub pointer: Option<Pointer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InspectionResult {
    pub fn success(pointer: Option<Pointer>, snapshot: AccessibilitySnapshot) -> Self {
        let snapshot = snapshot.displayed();
        Self {
            ok: true,
            pointer,
            role: Some(snapshot.role),
            name: Some(snapshot.name),
            error: None,
        }
    }

    pub fn failure(pointer: Option<Pointer>, error: impl Into<String>) -> Self {
        Self {
            ok: false,
            pointer,
            role: None,
            name: None,
            error: Some(error.into()),
        }
    }
}
