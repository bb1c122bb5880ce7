//! Sanitization of untrusted capture payloads.

use inspect_ax_config::RegistryConfig;
use inspect_ax_protocols::{Pointer, TargetDescriptor};
use serde_json::Value;

/// Caps and coerces a `record-context-target` payload.
///
/// Never fails: missing or mistyped fields become empty strings or zero.
/// Whether the result is usable is up to the caller
/// ([`TargetDescriptor::has_locator`]).
#[derive(Debug, Clone)]
pub struct Sanitizer {
    max_selector_len: usize,
    max_xpath_len: usize,
    max_tag_len: usize,
}

impl Sanitizer {
    pub fn new(config: &RegistryConfig) -> Self {
        Self {
            max_selector_len: config.max_selector_len,
            max_xpath_len: config.max_xpath_len,
            max_tag_len: config.max_tag_len,
        }
    }

    pub fn sanitize(&self, payload: &Value) -> TargetDescriptor {
        let field = |name: &str| payload.get(name).unwrap_or(&Value::Null);
        let pointer = field("pointer");

        TargetDescriptor {
            selector: sanitize_string(field("selector"), self.max_selector_len),
            xpath: sanitize_string(field("xpath"), self.max_xpath_len),
            tag_name: sanitize_string(field("tagName"), self.max_tag_len),
            pointer: Some(Pointer::new(
                sanitize_number(pointer.get("x")),
                sanitize_number(pointer.get("y")),
            )),
        }
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(&RegistryConfig::default())
    }
}

/// Trimmed string capped at `max_chars`; anything else is empty.
pub fn sanitize_string(value: &Value, max_chars: usize) -> String {
    match value.as_str() {
        Some(text) => text.trim().chars().take(max_chars).collect(),
        None => String::new(),
    }
}

/// Finite numbers rounded half up; anything else is zero.
pub fn sanitize_number(value: Option<&Value>) -> i64 {
    match value.and_then(Value::as_f64) {
        Some(number) if number.is_finite() => (number + 0.5).floor() as i64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trims_and_caps_strings() {
        let sanitizer = Sanitizer::default();
        let long = "a".repeat(3_000);
        let descriptor = sanitizer.sanitize(&json!({
            "selector": format!("  {}  ", long),
            "xpath": " //*[@id=\"x\"] ",
            "tagName": "B".repeat(100),
        }));
        assert_eq!(descriptor.selector.len(), 2_048);
        assert_eq!(descriptor.xpath, "//*[@id=\"x\"]");
        assert_eq!(descriptor.tag_name.len(), 64);
    }

    #[test]
    fn test_mistyped_fields_become_empty() {
        let descriptor = Sanitizer::default().sanitize(&json!({
            "selector": 42,
            "xpath": null,
            "tagName": ["div"],
        }));
        assert_eq!(descriptor.selector, "");
        assert_eq!(descriptor.xpath, "");
        assert_eq!(descriptor.tag_name, "");
        assert!(!descriptor.has_locator());
    }

    #[test]
    fn test_pointer_coercion() {
        let sanitizer = Sanitizer::default();
        let rounded = sanitizer.sanitize(&json!({"pointer": {"x": 10.5, "y": -2.5}}));
        assert_eq!(rounded.pointer, Some(Pointer::new(11, -2)));

        let coerced = sanitizer.sanitize(&json!({"pointer": {"x": "12", "y": null}}));
        assert_eq!(coerced.pointer, Some(Pointer::new(0, 0)));

        let missing = sanitizer.sanitize(&json!({"selector": "#a"}));
        assert_eq!(missing.pointer, Some(Pointer::new(0, 0)));
    }

    #[test]
    fn test_non_object_payload() {
        let descriptor = Sanitizer::default().sanitize(&json!("#save"));
        assert_eq!(descriptor, TargetDescriptor {
            pointer: Some(Pointer::default()),
            ..Default::default()
        });
    }

    #[test]
    fn test_caps_count_characters() {
        let descriptor = Sanitizer::new(&RegistryConfig {
            max_tag_len: 3,
            ..Default::default()
        })
        .sanitize(&json!({"tagName": "ééééé"}));
        assert_eq!(descriptor.tag_name, "ééé");
    }
}
