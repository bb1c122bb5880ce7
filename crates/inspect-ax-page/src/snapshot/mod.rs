//! Accessibility Snapshot Engine.
//!
//! Computes `{role, name}` for an element in layers:
//!
//! 1. native values from the injected [`NativeAccessibility`] capability
//! 2. role inferred from markup ([`infer_role`])
//! 3. role selection ([`pick_preferred_role`])
//! 4. name from the ordered [`NameSource`] list when native has none
//! 5. escalation to the nearest semantic ancestor when the role is generic

mod name;
mod native;
mod role;

use std::sync::{Arc, LazyLock};

use inspect_ax_config::SnapshotConfig;
use inspect_ax_dom::{Document, NodeId, SelectorError, SelectorList};
use inspect_ax_protocols::AccessibilitySnapshot;
use tracing::debug;

pub use name::NameSource;
pub use native::{NativeAccessibility, NoNativeAccessibility, RecordedAccessibility};
pub use role::{infer_role, pick_preferred_role};

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;

/// Ancestors worth escalating to: interactive tags, non-generic ARIA roles,
/// editable regions.
pub const SEMANTIC_ANCESTOR_SELECTOR: &str = "a[href], button, input, select, textarea, summary, \
     [role]:not([role=\"generic\"]):not([role=\"none\"]):not([role=\"presentation\"]), \
     [contenteditable]:not([contenteditable=\"false\"])";

static SEMANTIC_ANCESTORS: LazyLock<Result<SelectorList, SelectorError>> =
    LazyLock::new(|| SelectorList::parse(SEMANTIC_ANCESTOR_SELECTOR));

/// Trimmed attribute value, empty when absent.
pub(crate) fn read_attribute(doc: &Document, element: NodeId, name: &str) -> String {
    doc.attribute(element, name)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Snapshot engine over an injected native capability.
pub struct SnapshotEngine {
    native: Arc<dyn NativeAccessibility>,
    name_sources: Vec<NameSource>,
    max_text_len: usize,
    max_ancestor_steps: usize,
}

impl SnapshotEngine {
    pub fn new(native: Arc<dyn NativeAccessibility>, config: &SnapshotConfig) -> Self {
        Self {
            native,
            name_sources: NameSource::DEFAULT_ORDER.to_vec(),
            max_text_len: config.max_text_len,
            max_ancestor_steps: config.max_ancestor_steps,
        }
    }

    /// Replace the name lookup order.
    pub fn with_name_sources(mut self, sources: impl IntoIterator<Item = NameSource>) -> Self {
        self.name_sources = sources.into_iter().collect();
        self
    }

    /// Native role and name, trimmed; empty on any failure.
    pub fn native_snapshot(&self, doc: &Document, element: NodeId) -> AccessibilitySnapshot {
        match self.native.compute(doc, element) {
            Ok(snapshot) => AccessibilitySnapshot::new(snapshot.role.trim(), snapshot.name.trim()),
            Err(e) => {
                debug!("Native accessibility unavailable: {}", e);
                AccessibilitySnapshot::default()
            }
        }
    }

    /// Role and name of `element` alone, without ancestor escalation.
    pub fn compute(&self, doc: &Document, element: NodeId) -> AccessibilitySnapshot {
        let native = self.native_snapshot(doc, element);
        let inferred = infer_role(doc, element);
        let role = pick_preferred_role(&native.role, &inferred);
        let name = if native.name.is_empty() {
            self.infer_name(doc, element)
        } else {
            native.name
        };
        AccessibilitySnapshot::new(role, name)
    }

    /// First non-empty value from the name sources.
    pub fn infer_name(&self, doc: &Document, element: NodeId) -> String {
        self.name_sources
            .iter()
            .find_map(|source| source.resolve(doc, element, self.max_text_len))
            .unwrap_or_default()
    }

    /// [`compute`](Self::compute), escalating to the nearest semantic
    /// ancestor when the element's own role is generic.
    pub fn compute_with_fallback(&self, doc: &Document, element: NodeId) -> AccessibilitySnapshot {
        let snapshot = self.compute(doc, element);
        if !snapshot.is_generic() {
            return snapshot;
        }

        let Some(ancestor) = self.find_semantic_ancestor(doc, element) else {
            return snapshot;
        };

        let fallback = self.compute(doc, ancestor);
        if should_prefer_fallback(&snapshot, &fallback) {
            debug!(
                "Adopting <{}> ancestor snapshot (role '{}')",
                doc.tag_name(ancestor).unwrap_or_default(),
                fallback.role
            );
            fallback
        } else {
            snapshot
        }
    }

    /// Nearest ancestor matching [`SEMANTIC_ANCESTOR_SELECTOR`] within the
    /// step limit. The walk ends after checking `body` or the root element.
    pub fn find_semantic_ancestor(&self, doc: &Document, element: NodeId) -> Option<NodeId> {
        let body = doc.body();
        let root = doc.document_element();

        for current in doc.ancestors(element).take(self.max_ancestor_steps) {
            if is_semantic_candidate(doc, current) {
                return Some(current);
            }
            if Some(current) == body || Some(current) == root {
                break;
            }
        }
        None
    }
}

fn is_semantic_candidate(doc: &Document, element: NodeId) -> bool {
    SEMANTIC_ANCESTORS
        .as_ref()
        .is_ok_and(|selector| selector.matches(doc, element))
}

/// Whether the ancestor snapshot should replace the element's own.
pub fn should_prefer_fallback(
    snapshot: &AccessibilitySnapshot,
    fallback: &AccessibilitySnapshot,
) -> bool {
    let current_generic = snapshot.is_generic();
    let fallback_generic = fallback.is_generic();

    if current_generic && !fallback_generic {
        return true;
    }
    if current_generic == fallback_generic {
        return !snapshot.has_readable_name() && fallback.has_readable_name();
    }
    false
}
