use super::*;

#[test]
fn test_descriptor_has_locator() {
    let mut descriptor = TargetDescriptor::default();
    assert!(!descriptor.has_locator());

    descriptor.xpath = "/html[1]/body[1]".to_string();
    assert!(descriptor.has_locator());

    descriptor.xpath.clear();
    descriptor.selector = "#save".to_string();
    assert!(descriptor.has_locator());
}

#[test]
fn test_descriptor_uses_camel_case_on_the_wire() {
    let descriptor = TargetDescriptor {
        selector: "#save".to_string(),
        xpath: "//*[@id=\"save\"]".to_string(),
        tag_name: "button".to_string(),
        pointer: Some(Pointer::new(10, 20)),
    };
    let json = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(json["tagName"], "button");
    assert_eq!(json["pointer"]["x"], 10);

    let back: TargetDescriptor = serde_json::from_value(json).unwrap();
    assert_eq!(back, descriptor);
}

#[test]
fn test_descriptor_tolerates_missing_fields() {
    let descriptor: TargetDescriptor =
        serde_json::from_value(serde_json::json!({"selector": "main"})).unwrap();
    assert_eq!(descriptor.selector, "main");
    assert!(descriptor.xpath.is_empty());
    assert!(descriptor.pointer.is_none());
}

#[test]
fn test_registered_target_flattens_descriptor() {
    let target = RegisteredTarget::new(
        TargetDescriptor {
            selector: "#a".to_string(),
            ..Default::default()
        },
        3,
        1_000,
    );
    let json = serde_json::to_value(&target).unwrap();
    assert_eq!(json["selector"], "#a");
    assert_eq!(json["frameId"], 3);
    assert_eq!(json["recordedAt"], 1_000);

    // The page side reads the same record as a plain descriptor.
    let descriptor: TargetDescriptor = serde_json::from_value(json).unwrap();
    assert_eq!(descriptor.selector, "#a");
}

#[test]
fn test_registered_target_expiry_boundary() {
    let target = RegisteredTarget::new(TargetDescriptor::default(), 0, 1_000);
    assert!(!target.is_expired(16_000, 15_000));
    assert!(target.is_expired(16_001, 15_000));
    assert_eq!(target.age_ms(1_500), 500);
}

#[test]
fn test_generic_role_detection() {
    assert!(is_generic_role(""));
    assert!(is_generic_role("  "));
    assert!(is_generic_role("generic"));
    assert!(is_generic_role("Generic"));
    assert!(!is_generic_role("button"));
}

#[test]
fn test_readable_value() {
    assert!(!has_readable_value(""));
    assert!(!has_readable_value("-"));
    assert!(!has_readable_value(" - "));
    assert!(has_readable_value("Close"));
}

#[test]
fn test_snapshot_displayed_fills_sentinel() {
    let snapshot = AccessibilitySnapshot::new("", "Save").displayed();
    assert_eq!(snapshot.role, "-");
    assert_eq!(snapshot.name, "Save");
}

#[test]
fn test_inspection_result_success_serialization() {
    let result = InspectionResult::success(
        Some(Pointer::new(1, 2)),
        AccessibilitySnapshot::new("button", ""),
    );
    assert!(result.ok);
    assert_eq!(result.name.as_deref(), Some("-"));

    let json = serde_json::to_value(&result).unwrap();
    assert!(json.get("error").is_none());
    assert_eq!(json["role"], "button");
}

#[test]
fn test_inspection_result_failure_serialization() {
    let result = InspectionResult::failure(None, "boom");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"], "boom");
    assert!(json["pointer"].is_null());
    assert!(json.get("role").is_none());
}
