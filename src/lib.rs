//! # Slint Flow Editor
//!
//! The interaction engine for building visual flow editors with Slint:
//! a directed node-port graph on an infinite pannable/zoomable canvas,
//! with curved connectors, marquee selection, and drag-based editing.
//!
//! The crate is deliberately headless. It owns the graph model, the
//! canvas transform, and the pointer gesture state machine; the hosting
//! application owns rendering, the template palette, the description text
//! widget, and toolbar chrome, and talks to the engine through the
//! [`FlowEditorController`] or the underlying [`Editor`].
//!
//! ## Core pieces
//!
//! - [`GraphStore`] - nodes, ports, connections, and the selection set,
//!   with atomic mutations and cascading deletion
//! - [`Viewport`] - the screen↔canvas transform, with clamped zoom
//! - [`Editor`] - the per-editor state aggregate and its gesture state
//!   machine (pan, drag, connect, marquee)
//! - [`FlowEditorController`] - `Rc<RefCell<_>>` handle with per-element
//!   pointer handlers and Slint model synchronization
//!
//! ## Quick start
//!
//! ```
//! use slint_flow_editor::{builtin_templates, FlowEditorController};
//!
//! let ctrl = FlowEditorController::new();
//! let templates = builtin_templates();
//!
//! // Place two nodes from the palette and wire them together.
//! let source = ctrl.drop_template_at(&templates[0], 200.0, 150.0);
//! let sink = ctrl.drop_template_at(&templates[2], 600.0, 150.0);
//! ctrl.output_port_pointer_down(source, 1, 290.0, 140.0);
//! ctrl.pointer_move(400.0, 140.0);
//! ctrl.input_port_pointer_up(sink, 1, 510.0, 140.0);
//!
//! assert_eq!(ctrl.editor().borrow().graph.connections().len(), 1);
//! ```

pub mod controller;
pub mod editor;
pub mod geometry;
pub mod graph;
pub mod selection;
pub mod templates;
pub mod viewport;

pub use controller::FlowEditorController;
pub use editor::{Editor, HitTarget, InteractionState, PointerButton};
pub use geometry::{
    connection_path, marquee_contains, port_anchor, NodeLayout, DEFAULT_CONTROL_OFFSET,
};
pub use graph::{
    ConnectError, Connection, ConnectionId, GraphStore, Node, NodeId, NodeUpdate, Port,
    PortDirection, PortId,
};
pub use selection::SelectionSet;
pub use templates::{builtin_templates, NodeTemplate, PortSpec};
pub use viewport::{CanvasPoint, ScreenPoint, ScreenRect, Viewport, ZoomPolicy};
