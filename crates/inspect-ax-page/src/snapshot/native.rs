//! Native accessibility capability.

use inspect_ax_dom::{Document, NodeId};
use inspect_ax_protocols::AccessibilitySnapshot;

use crate::error::NativeAccessibilityError;

/// Platform accessibility computation (`getComputedAccessibleNode`).
///
/// Implementations return raw values; the engine trims them and treats any
/// error as "no native data".
pub trait NativeAccessibility: Send + Sync {
    fn compute(
        &self,
        doc: &Document,
        element: NodeId,
    ) -> Result<AccessibilitySnapshot, NativeAccessibilityError>;
}

/// Environment without a native accessibility API.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoNativeAccessibility;

impl NativeAccessibility for NoNativeAccessibility {
    fn compute(
        &self,
        _doc: &Document,
        _element: NodeId,
    ) -> Result<AccessibilitySnapshot, NativeAccessibilityError> {
        Err(NativeAccessibilityError::Unavailable)
    }
}

/// Replays role and name values recorded alongside a page fixture.
///
/// Elements without recorded values report empty fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordedAccessibility;

impl NativeAccessibility for RecordedAccessibility {
    fn compute(
        &self,
        doc: &Document,
        element: NodeId,
    ) -> Result<AccessibilitySnapshot, NativeAccessibilityError> {
        let data = doc.element(element).ok_or_else(|| {
            NativeAccessibilityError::Failed(format!("node {} is not an element", element.index()))
        })?;
        let recorded = data.recorded_ax.clone().unwrap_or_default();
        Ok(AccessibilitySnapshot::new(
            recorded.role.unwrap_or_default(),
            recorded.name.unwrap_or_default(),
        ))
    }
}
