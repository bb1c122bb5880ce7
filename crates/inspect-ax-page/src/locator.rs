//! Element Locator: re-finds a captured element in the current document.
//!
//! Stages run in order and the first one that yields an element wins. Each
//! stage swallows its own parse or evaluation errors and falls through.

use std::sync::Arc;

use inspect_ax_dom::{Document, NodeId};
use inspect_ax_protocols::{InspectError, NotFoundKind, TargetDescriptor};
use tracing::debug;

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;

/// "Topmost element at point" capability.
pub trait HitTester: Send + Sync {
    fn element_from_point(&self, doc: &Document, x: f64, y: f64) -> Option<NodeId>;
}

/// Environment without hit testing; the point stage always misses.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHitTesting;

impl HitTester for NoHitTesting {
    fn element_from_point(&self, _doc: &Document, _x: f64, _y: f64) -> Option<NodeId> {
        None
    }
}

/// Hit testing against the document's layout boxes.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutHitTester;

impl HitTester for LayoutHitTester {
    fn element_from_point(&self, doc: &Document, x: f64, y: f64) -> Option<NodeId> {
        doc.element_from_point(x, y)
    }
}

/// One step of the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorStage {
    Selector,
    XPath,
    Point,
}

impl LocatorStage {
    pub const DEFAULT_ORDER: [LocatorStage; 3] =
        [LocatorStage::Selector, LocatorStage::XPath, LocatorStage::Point];

    pub fn name(&self) -> &'static str {
        match self {
            LocatorStage::Selector => "selector",
            LocatorStage::XPath => "xpath",
            LocatorStage::Point => "point",
        }
    }
}

/// Ordered locator over an injected hit tester.
pub struct ElementLocator {
    stages: Vec<LocatorStage>,
    hit_tester: Arc<dyn HitTester>,
}

impl ElementLocator {
    pub fn new(hit_tester: Arc<dyn HitTester>) -> Self {
        Self {
            stages: LocatorStage::DEFAULT_ORDER.to_vec(),
            hit_tester,
        }
    }

    /// Replace the stage order.
    pub fn with_stages(mut self, stages: impl IntoIterator<Item = LocatorStage>) -> Self {
        self.stages = stages.into_iter().collect();
        self
    }

    pub fn stages(&self) -> &[LocatorStage] {
        &self.stages
    }

    /// Resolve `descriptor` to an element.
    pub fn locate(
        &self,
        doc: &Document,
        descriptor: &TargetDescriptor,
    ) -> Result<NodeId, InspectError> {
        self.locate_with_stage(doc, descriptor)
            .map(|(node, _)| node)
            .ok_or(InspectError::TargetNotFound(NotFoundKind::Unresolved))
    }

    /// Resolve and report which stage matched.
    pub fn locate_with_stage(
        &self,
        doc: &Document,
        descriptor: &TargetDescriptor,
    ) -> Option<(NodeId, LocatorStage)> {
        for &stage in &self.stages {
            if let Some(node) = self.run_stage(stage, doc, descriptor) {
                debug!(
                    "Locator stage '{}' resolved <{}>",
                    stage.name(),
                    doc.tag_name(node).unwrap_or_default()
                );
                return Some((node, stage));
            }
        }
        debug!("Locator exhausted all stages");
        None
    }

    fn run_stage(
        &self,
        stage: LocatorStage,
        doc: &Document,
        descriptor: &TargetDescriptor,
    ) -> Option<NodeId> {
        match stage {
            LocatorStage::Selector => {
                if descriptor.selector.is_empty() {
                    return None;
                }
                match doc.query_selector(&descriptor.selector) {
                    Ok(node) => node,
                    Err(e) => {
                        debug!("Selector '{}' did not parse: {}", descriptor.selector, e);
                        None
                    }
                }
            }
            LocatorStage::XPath => {
                if descriptor.xpath.is_empty() {
                    return None;
                }
                match doc.evaluate_xpath(&descriptor.xpath) {
                    Ok(node) => node.filter(|&n| doc.is_element(n)),
                    Err(e) => {
                        debug!("XPath '{}' did not parse: {}", descriptor.xpath, e);
                        None
                    }
                }
            }
            LocatorStage::Point => {
                let pointer = descriptor.pointer?;
                self.hit_tester
                    .element_from_point(doc, pointer.x as f64, pointer.y as f64)
                    .filter(|&n| doc.is_element(n))
            }
        }
    }
}
