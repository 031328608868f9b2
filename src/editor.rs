//! The editor aggregate and its pointer gesture state machine.
//!
//! [`Editor`] owns the graph store, the viewport, and the single active
//! gesture. Pointer handlers feed it screen-space events together with the
//! [`HitTarget`] the renderer's picking found under the pointer; the editor
//! converts coordinates through the viewport and mutates the store. It never
//! touches rendering: the renderer reads the store, the viewport, and the
//! overlay getters ([`Editor::pending_connection`], [`Editor::marquee_rect`])
//! back out.

use crate::geometry::{self, NodeLayout, DEFAULT_CONTROL_OFFSET};
use crate::graph::{ConnectionId, GraphStore, NodeId, NodeUpdate, PortDirection, PortId};
use crate::viewport::{CanvasPoint, ScreenPoint, ScreenRect, Viewport};
use slint::SharedString;

/// Pointer button, mapped from the host event stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Map a DOM-style button code (0 = primary, 1 = middle, 2 = secondary).
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// What the renderer's native picking found under the pointer.
///
/// Pointer-to-entity resolution belongs to the rendering layer; the editor
/// only interprets the result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    /// Empty canvas.
    Canvas,
    /// A node's body below the title bar.
    NodeBody(NodeId),
    /// A node's title bar, the drag handle.
    NodeTitle(NodeId),
    InputPort(NodeId, PortId),
    OutputPort(NodeId, PortId),
}

/// The single active gesture.
///
/// Every pointer event is matched exhaustively against this, which is what
/// rules out stuck half-finished gestures: a gesture can only be replaced
/// by completing it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InteractionState {
    Idle,
    /// Middle-button canvas pan. `last` is the previous pointer position;
    /// each move applies the delta cumulatively so a missed event cannot
    /// make the canvas snap.
    PanningCanvas { last: ScreenPoint },
    /// Primary drag of a node by its title bar. `grab_offset` is the
    /// canvas-space offset from the node origin to the grab point; each
    /// move repositions the node absolutely from it.
    DraggingNode {
        node: NodeId,
        grab_offset: CanvasPoint,
    },
    /// A connection being drawn out of an output port. `cursor` is the
    /// canvas-space position of the loose end, read by the renderer for
    /// the provisional curve. The store is untouched until completion.
    CreatingConnection {
        from_node: NodeId,
        from_port: PortId,
        cursor: CanvasPoint,
    },
    /// A marquee being dragged over empty canvas. Both corners stay in
    /// screen space until the gesture commits.
    MarqueeSelecting {
        start: ScreenPoint,
        current: ScreenPoint,
    },
}

/// The owned application-state aggregate: graph, viewport, layout policy,
/// and interaction state. One instance per editor; nothing is global, so
/// several editors can coexist in a process.
pub struct Editor {
    pub graph: GraphStore,
    pub viewport: Viewport,
    pub layout: NodeLayout,
    control_offset: f32,
    state: InteractionState,
    editing_node: Option<NodeId>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self {
            graph: GraphStore::new(),
            viewport: Viewport::new(),
            layout: NodeLayout::default(),
            control_offset: DEFAULT_CONTROL_OFFSET,
            state: InteractionState::Idle,
            editing_node: None,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn control_offset(&self) -> f32 {
        self.control_offset
    }

    /// Set the horizontal control-point offset for connector curves
    /// (default: 50.0).
    pub fn set_control_offset(&mut self, offset: f32) {
        self.control_offset = offset;
    }

    /// Canvas-space anchor of a port, resolved by id. `None` if the node
    /// or port does not exist.
    pub fn port_anchor(
        &self,
        node: NodeId,
        direction: PortDirection,
        port: PortId,
    ) -> Option<CanvasPoint> {
        let node = self.graph.node(node)?;
        let index = node.port_index(direction, port)?;
        geometry::port_anchor(node, direction, index, &self.layout)
    }

    // ------------------------------------------------------------------
    // Pointer events
    // ------------------------------------------------------------------

    /// Handle a button press. Gestures only ever start from [`InteractionState::Idle`];
    /// a stray press mid-gesture is ignored.
    pub fn pointer_down(
        &mut self,
        pos: ScreenPoint,
        button: PointerButton,
        shift: bool,
        target: HitTarget,
    ) {
        // Any press dismisses an active description edit.
        self.editing_node = None;

        if self.state != InteractionState::Idle {
            return;
        }

        match (button, target) {
            (PointerButton::Primary, HitTarget::Canvas) => {
                self.graph.clear_selection();
                self.state = InteractionState::MarqueeSelecting {
                    start: pos,
                    current: pos,
                };
            }
            (PointerButton::Primary, HitTarget::NodeTitle(id)) => {
                let Some(origin) = self.graph.node(id).map(|n| n.position) else {
                    return;
                };
                self.graph.click_select(id, shift);
                let p = self.viewport.to_canvas(pos);
                self.state = InteractionState::DraggingNode {
                    node: id,
                    grab_offset: CanvasPoint::new(p.x - origin.x, p.y - origin.y),
                };
            }
            (PointerButton::Primary, HitTarget::OutputPort(node, port)) => {
                let Some(anchor) = self.port_anchor(node, PortDirection::Output, port) else {
                    return;
                };
                self.state = InteractionState::CreatingConnection {
                    from_node: node,
                    from_port: port,
                    cursor: anchor,
                };
            }
            (PointerButton::Primary, HitTarget::NodeBody(_)) => {
                self.graph.clear_selection();
            }
            (PointerButton::Middle, HitTarget::Canvas) => {
                self.state = InteractionState::PanningCanvas { last: pos };
            }
            _ => {}
        }
    }

    /// Handle pointer motion for the active gesture.
    pub fn pointer_move(&mut self, pos: ScreenPoint) {
        match self.state {
            InteractionState::Idle => {}
            InteractionState::PanningCanvas { last } => {
                self.viewport.pan_by(pos.x - last.x, pos.y - last.y);
                self.state = InteractionState::PanningCanvas { last: pos };
            }
            InteractionState::DraggingNode { node, grab_offset } => {
                let p = self.viewport.to_canvas(pos);
                self.graph.update_node(
                    node,
                    NodeUpdate::position(CanvasPoint::new(
                        p.x - grab_offset.x,
                        p.y - grab_offset.y,
                    )),
                );
            }
            InteractionState::CreatingConnection {
                from_node,
                from_port,
                ..
            } => {
                self.state = InteractionState::CreatingConnection {
                    from_node,
                    from_port,
                    cursor: self.viewport.to_canvas(pos),
                };
            }
            InteractionState::MarqueeSelecting { start, .. } => {
                self.state = InteractionState::MarqueeSelecting {
                    start,
                    current: pos,
                };
            }
        }
    }

    /// Handle a button release. `target` is whatever the picking found
    /// under the release position; it only matters for connection
    /// completion.
    pub fn pointer_up(&mut self, pos: ScreenPoint, target: HitTarget) {
        match self.state {
            InteractionState::Idle => {}
            InteractionState::PanningCanvas { .. } | InteractionState::DraggingNode { .. } => {
                // Pan and drag already applied their effects live.
                self.state = InteractionState::Idle;
            }
            InteractionState::CreatingConnection {
                from_node,
                from_port,
                ..
            } => {
                if let HitTarget::InputPort(node, port) = target {
                    // A failed resolution is a silent no-op: the source may
                    // have been deleted mid-gesture.
                    let _ = self.graph.connect((from_node, from_port), (node, port));
                }
                self.state = InteractionState::Idle;
            }
            InteractionState::MarqueeSelecting { start, .. } => {
                self.state = InteractionState::MarqueeSelecting {
                    start,
                    current: pos,
                };
                self.commit_marquee();
            }
        }
    }

    /// Handle the pointer leaving the editor surface. Resolves the active
    /// gesture exactly as a release over empty canvas would, so no gesture
    /// can outlive the pointer.
    pub fn pointer_leave(&mut self) {
        match self.state {
            InteractionState::Idle => {}
            InteractionState::MarqueeSelecting { .. } => self.commit_marquee(),
            _ => self.state = InteractionState::Idle,
        }
    }

    fn commit_marquee(&mut self) {
        if let InteractionState::MarqueeSelecting { start, current } = self.state {
            let rect = ScreenRect::from_corners(start, current);
            let hits: Vec<NodeId> = self
                .graph
                .nodes()
                .iter()
                .filter(|n| geometry::marquee_contains(&rect, n, &self.viewport))
                .map(|n| n.id)
                .collect();
            self.graph.set_selection(hits);
            self.state = InteractionState::Idle;
        }
    }

    // ------------------------------------------------------------------
    // Keyboard-triggered operations
    // ------------------------------------------------------------------

    /// Delete every selected node (cascading to its connections), then
    /// clear the selection. Wired to the host's delete key binding.
    pub fn delete_selected(&mut self) {
        let ids: Vec<NodeId> = self.graph.selection().iter().copied().collect();
        for id in ids {
            self.graph.delete_node(id);
        }
        self.graph.clear_selection();
    }

    // ------------------------------------------------------------------
    // Overlay surface for the renderer
    // ------------------------------------------------------------------

    /// The marquee rectangle while a marquee gesture is active, normalized,
    /// in screen space.
    pub fn marquee_rect(&self) -> Option<ScreenRect> {
        if let InteractionState::MarqueeSelecting { start, current } = self.state {
            Some(ScreenRect::from_corners(start, current))
        } else {
            None
        }
    }

    /// Source anchor and loose end of the connection being drawn, in
    /// canvas space. `None` when no connection gesture is active or the
    /// source no longer resolves.
    pub fn pending_connection(&self) -> Option<(CanvasPoint, CanvasPoint)> {
        if let InteractionState::CreatingConnection {
            from_node,
            from_port,
            cursor,
        } = self.state
        {
            let anchor = self.port_anchor(from_node, PortDirection::Output, from_port)?;
            Some((anchor, cursor))
        } else {
            None
        }
    }

    /// Canvas-space path command for the provisional connector curve.
    pub fn pending_connection_path(&self) -> Option<String> {
        let (from, to) = self.pending_connection()?;
        Some(geometry::connection_path(
            from.x,
            from.y,
            to.x,
            to.y,
            self.control_offset,
        ))
    }

    /// Canvas-space anchors of an existing connection's endpoints.
    pub fn connection_endpoints(&self, id: ConnectionId) -> Option<(CanvasPoint, CanvasPoint)> {
        let conn = self.graph.connection(id)?;
        let from = self.port_anchor(conn.from_node, PortDirection::Output, conn.from_port)?;
        let to = self.port_anchor(conn.to_node, PortDirection::Input, conn.to_port)?;
        Some((from, to))
    }

    /// Canvas-space path command for an existing connection.
    pub fn connection_path(&self, id: ConnectionId) -> Option<String> {
        let (from, to) = self.connection_endpoints(id)?;
        Some(geometry::connection_path(
            from.x,
            from.y,
            to.x,
            to.y,
            self.control_offset,
        ))
    }

    // ------------------------------------------------------------------
    // Description editing support
    // ------------------------------------------------------------------

    /// The node whose description is currently open in the external text
    /// widget, if any.
    pub fn editing_node(&self) -> Option<NodeId> {
        self.editing_node
    }

    /// Open the description editor for a node. Ignored for unknown ids.
    pub fn begin_description_edit(&mut self, id: NodeId) {
        if self.graph.node(id).is_some() {
            self.editing_node = Some(id);
        }
    }

    /// Close the editor and write the text back to the node. A silent
    /// no-op if the node was deleted while the editor was open.
    pub fn commit_description_edit(&mut self, text: SharedString) {
        if let Some(id) = self.editing_node.take() {
            self.graph.update_node(id, NodeUpdate::description(text));
        }
    }

    /// Close the editor without writing anything back.
    pub fn cancel_description_edit(&mut self) {
        self.editing_node = None;
    }
}
