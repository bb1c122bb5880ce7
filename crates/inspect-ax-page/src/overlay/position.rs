//! Overlay geometry.

use inspect_ax_config::OverlayConfig;
use inspect_ax_dom::ViewportInfo;
use inspect_ax_protocols::Pointer;
use serde::Serialize;

/// Top-left corner of the overlay in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct OverlayPosition {
    pub left: f64,
    pub top: f64,
}

/// Rendered width: the configured width, narrowed on small viewports.
pub fn overlay_width(viewport: ViewportInfo, config: &OverlayConfig) -> f64 {
    config.width.min(viewport.width - 12.0)
}

/// Place the overlay just below-right of the pointer, or in the
/// bottom-right corner without one, then keep it inside the viewport.
///
/// When the overlay is larger than the viewport the far-edge bound wins,
/// so the position may fall below the margin.
pub fn position_near_pointer(
    viewport: ViewportInfo,
    width: f64,
    height: f64,
    pointer: Option<Pointer>,
    config: &OverlayConfig,
) -> OverlayPosition {
    let margin = config.margin;
    let max_left = viewport.width - width - margin;
    let max_top = viewport.height - height - margin;

    let (left, top) = match pointer {
        Some(p) => (
            p.x as f64 + config.pointer_offset,
            p.y as f64 + config.pointer_offset,
        ),
        None => (max_left, max_top),
    };

    OverlayPosition {
        left: left.max(margin).min(max_left),
        top: top.max(margin).min(max_top),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(width: f64, height: f64) -> ViewportInfo {
        ViewportInfo { width, height }
    }

    #[test]
    fn test_offset_from_pointer() {
        let config = OverlayConfig::default();
        let pos = position_near_pointer(
            viewport(1280.0, 720.0),
            220.0,
            100.0,
            Some(Pointer::new(100, 50)),
            &config,
        );
        assert_eq!(pos, OverlayPosition { left: 110.0, top: 60.0 });
    }

    #[test]
    fn test_bottom_right_without_pointer() {
        let config = OverlayConfig::default();
        let pos = position_near_pointer(viewport(1280.0, 720.0), 220.0, 100.0, None, &config);
        assert_eq!(pos, OverlayPosition { left: 1052.0, top: 612.0 });
    }

    #[test]
    fn test_clamped_near_edges() {
        let config = OverlayConfig::default();
        let pos = position_near_pointer(
            viewport(1280.0, 720.0),
            220.0,
            100.0,
            Some(Pointer::new(1270, 715)),
            &config,
        );
        assert_eq!(pos, OverlayPosition { left: 1052.0, top: 612.0 });

        let pos = position_near_pointer(
            viewport(1280.0, 720.0),
            220.0,
            100.0,
            Some(Pointer::new(-40, -40)),
            &config,
        );
        assert_eq!(pos, OverlayPosition { left: 8.0, top: 8.0 });
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let config = OverlayConfig::default();
        let width = overlay_width(viewport(100.0, 50.0), &config);
        assert_eq!(width, 88.0);
        let pos = position_near_pointer(viewport(100.0, 50.0), width, 100.0, None, &config);
        assert_eq!(pos.left, 4.0);
        assert_eq!(pos.top, -58.0);
    }

    #[test]
    fn test_width_caps_at_config() {
        let config = OverlayConfig::default();
        assert_eq!(overlay_width(viewport(1280.0, 720.0), &config), 220.0);
    }
}
