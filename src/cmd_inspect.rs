//! Subcommand handlers for Inspect AX.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use inspect_ax_config::Config;
use inspect_ax_dom::{Document, NodeId, PageFixture};
use inspect_ax_page::{
    ClientPoint, ContentScript, DescriptorBuilder, ElementLocator, LayoutHitTester,
    RecordedAccessibility, SnapshotEngine,
};
use inspect_ax_protocols::{
    InspectError, InspectionResult, NotFoundKind, Pointer, SystemClock, TabId, TargetDescriptor,
};

use crate::cli::InspectArgs;
use crate::runtime::{ExtensionRuntime, TOP_FRAME};

/// CLI-level failures.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("No element matches '{0}'")]
    NoMatch(String),

    #[error("Nothing was rendered: {0}")]
    NotRendered(String),
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Right-click, menu click, print the overlay.
pub(crate) async fn run_inspect(config: Config, args: InspectArgs) -> CmdResult {
    let fixture = PageFixture::load(&args.page)?;
    info!("Loaded {} ({})", args.page.display(), fixture.url);

    let runtime = ExtensionRuntime::start(config, Arc::new(SystemClock));
    runtime.install().await?;

    if args.frame != TOP_FRAME {
        runtime.open_frame(args.tab, TOP_FRAME, fixture.clone().into_document()?);
    }
    let script = runtime.open_frame(args.tab, args.frame, fixture.into_document()?);

    let (target, point) = script.with_document(|doc| find_target(doc, &args.target))?;
    if let Some(report) = runtime
        .right_click(args.tab, args.frame, Some(target), point)
        .await
    {
        match report.capture {
            Some(response) if response.ok => debug!("Target recorded"),
            Some(response) => warn!(
                "Target rejected: {}",
                response.error.unwrap_or_default()
            ),
            None => warn!("Target was not recorded"),
        }
    }

    if args.delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(args.delay_ms)).await;
    }

    let outcome = runtime.click_menu(args.tab, args.frame).await;
    debug!("Menu click: {:?}", outcome);

    let Some((script, result)) = rendered(&runtime, args.tab, args.frame) else {
        return Err(CliError::NotRendered(format!("{:?}", outcome)).into());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if let Some(view) = script.overlay() {
        println!("{}", view);
    }
    Ok(())
}

/// Role and name of an element, without the message round trip.
pub(crate) fn run_snapshot(config: &Config, page: &Path, target: &str, json: bool) -> CmdResult {
    let doc = load_document(page)?;
    let (element, _) = find_target(&doc, target)?;

    let engine = SnapshotEngine::new(Arc::new(RecordedAccessibility), &config.snapshot);
    let snapshot = engine.compute_with_fallback(&doc, element).displayed();

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("Role  {}", snapshot.role);
        println!("Name  {}", snapshot.name);
    }
    Ok(())
}

/// Run the locator stages and describe the element found.
pub(crate) fn run_locate(
    page: &Path,
    selector: Option<String>,
    xpath: Option<String>,
    pointer: Option<Pointer>,
) -> CmdResult {
    let doc = load_document(page)?;
    let descriptor = TargetDescriptor {
        selector: selector.unwrap_or_default(),
        xpath: xpath.unwrap_or_default(),
        tag_name: String::new(),
        pointer,
    };

    let locator = ElementLocator::new(Arc::new(LayoutHitTester));
    let (element, stage) = locator
        .locate_with_stage(&doc, &descriptor)
        .ok_or(InspectError::TargetNotFound(NotFoundKind::Unresolved))?;

    let point = pointer
        .map(|p| ClientPoint::new(p.x as f64, p.y as f64))
        .unwrap_or_default();
    let found = DescriptorBuilder::build(&doc, element, point);

    println!(
        "Matched <{}> by {}",
        doc.tag_name(element).unwrap_or_default(),
        stage.name()
    );
    println!("{}", serde_json::to_string_pretty(&found)?);
    Ok(())
}

fn load_document(page: &Path) -> Result<Document, Box<dyn std::error::Error>> {
    Ok(PageFixture::load(page)?.into_document()?)
}

/// Element matching `selector` and the centre of its layout box.
fn find_target(doc: &Document, selector: &str) -> Result<(NodeId, ClientPoint), CliError> {
    let element = doc
        .query_selector(selector)
        .map_err(|e| CliError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?
        .ok_or_else(|| CliError::NoMatch(selector.to_string()))?;

    let point = doc
        .element(element)
        .and_then(|data| data.layout.as_ref())
        .map(|layout| {
            let (x, y) = layout.bounding_box.center();
            ClientPoint::new(x, y)
        })
        .unwrap_or_default();
    Ok((element, point))
}

/// The frame that rendered a result: the capturing frame, else the top frame.
fn rendered(
    runtime: &ExtensionRuntime,
    tab_id: TabId,
    frame_id: u32,
) -> Option<(Arc<ContentScript>, InspectionResult)> {
    [frame_id, TOP_FRAME]
        .into_iter()
        .filter_map(|frame| runtime.frame(tab_id, frame))
        .find_map(|script| {
            let result = script.last_result()?;
            Some((script, result))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspect_ax_dom::ElementSpec;

    #[test]
    fn test_find_target_uses_layout_centre() {
        let doc = Document::from_body([ElementSpec::new("button")
            .text("Go")
            .bounds(10.0, 20.0, 40.0, 10.0)]);
        let (element, point) = find_target(&doc, "button").unwrap();
        assert_eq!(doc.tag_name(element), Some("button"));
        assert_eq!(point, ClientPoint::new(30.0, 25.0));
    }

    #[test]
    fn test_find_target_errors() {
        let doc = Document::from_body([ElementSpec::new("p")]);
        assert!(matches!(
            find_target(&doc, "button"),
            Err(CliError::NoMatch(_))
        ));
        assert!(matches!(
            find_target(&doc, "p["),
            Err(CliError::InvalidSelector { .. })
        ));

        let (_, point) = find_target(&doc, "p").unwrap();
        assert_eq!(point, ClientPoint::default());
    }

    fn demo_page() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/settings.json")
    }

    #[tokio::test]
    async fn test_inspect_demo_page() {
        let args = InspectArgs {
            page: demo_page(),
            target: "span.knob".to_string(),
            tab: 3,
            frame: 2,
            delay_ms: 0,
            json: true,
        };
        run_inspect(Config::default(), args).await.unwrap();
    }

    #[test]
    fn test_snapshot_and_locate_demo_page() {
        let page = demo_page();
        run_snapshot(&Config::default(), &page, "#email", false).unwrap();
        run_locate(&page, None, None, Some(Pointer::new(60, 185))).unwrap();

        let err = run_locate(&page, Some("#missing".to_string()), None, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not resolve the selected element. Try right-clicking it again."
        );
    }
}
