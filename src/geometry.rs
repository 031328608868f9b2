use crate::graph::{Node, PortDirection};
use crate::viewport::{CanvasPoint, ScreenPoint, ScreenRect, Viewport};

/// Default horizontal control-point offset for connector curves.
pub const DEFAULT_CONTROL_OFFSET: f32 = 50.0;

/// Vertical layout of a node's port band.
///
/// Ports are distributed evenly inside the band between the title bar and
/// the bottom margin; the space below the band belongs to the node's
/// description text. Both heights are policy, not constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeLayout {
    pub title_bar_height: f32,
    pub bottom_margin: f32,
}

impl Default for NodeLayout {
    fn default() -> Self {
        Self {
            title_bar_height: 24.0,
            bottom_margin: 44.0,
        }
    }
}

/// Canvas-space point where a port's connector attaches to its node.
///
/// Inputs anchor on the node's left edge, outputs on the right. The port
/// at index `i` of `n` in its direction sits at y-offset
/// `title_bar + (height - title_bar - bottom_margin) * (i + 0.5) / n`.
/// Returns `None` when the direction has no ports (or the index is out of
/// range), so an empty port list never divides by zero.
pub fn port_anchor(
    node: &Node,
    direction: PortDirection,
    index: usize,
    layout: &NodeLayout,
) -> Option<CanvasPoint> {
    let count = node.ports(direction).len();
    if index >= count {
        return None;
    }

    let band = node.height - layout.title_bar_height - layout.bottom_margin;
    let y = node.position.y
        + layout.title_bar_height
        + band * (index as f32 + 0.5) / count as f32;
    let x = match direction {
        PortDirection::Input => node.position.x,
        PortDirection::Output => node.position.x + node.width,
    };
    Some(CanvasPoint::new(x, y))
}

/// Generate the SVG path command for a connector between two anchors.
///
/// Cubic bezier with control points offset horizontally by a fixed
/// `control_offset`: to the right of the source, to the left of the
/// destination. The offsets always project outward, so the curve keeps its
/// S shape even when the destination lies left of the source.
///
/// Coordinates are raw on purpose: the same formatting serves canvas-space
/// rendering and screen-space rendering (with the offset scaled by the
/// zoom).
///
/// # Arguments
/// * `from_x`, `from_y` - Source anchor (an output port)
/// * `to_x`, `to_y` - Destination anchor (an input port, or the pointer
///   while a connection is being drawn)
/// * `control_offset` - Horizontal control-point magnitude (default: 50.0)
///
/// # Returns
/// SVG path command string (e.g. "M 180 30 C 230 30 150 54 200 54")
pub fn connection_path(
    from_x: f32,
    from_y: f32,
    to_x: f32,
    to_y: f32,
    control_offset: f32,
) -> String {
    let ctrl1_x = from_x + control_offset;
    let ctrl2_x = to_x - control_offset;

    format!(
        "M {} {} C {} {} {} {} {} {}",
        from_x, from_y, ctrl1_x, from_y, ctrl2_x, to_y, to_x, to_y
    )
}

/// Whether a node lies entirely inside a screen-space marquee rectangle.
///
/// The marquee is converted into canvas space and compared against the
/// node's full bounding box; partial overlap does not count. A zero-area
/// marquee therefore contains nothing.
pub fn marquee_contains(rect: &ScreenRect, node: &Node, viewport: &Viewport) -> bool {
    let min = viewport.to_canvas(ScreenPoint::new(rect.x, rect.y));
    let max = viewport.to_canvas(ScreenPoint::new(rect.x + rect.width, rect.y + rect.height));

    node.position.x >= min.x
        && node.position.x + node.width <= max.x
        && node.position.y >= min.y
        && node.position.y + node.height <= max.y
}
