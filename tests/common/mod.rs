//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use slint_flow_editor::{
    builtin_templates, CanvasPoint, ConnectionId, Editor, NodeId, NodeTemplate, PortDirection,
    ScreenPoint,
};

/// An editor pre-loaded with the built-in palette.
///
/// Template indices: 0 = input (one output port), 1 = process (one of
/// each), 2 = output (one input port).
pub struct EditorFixture {
    pub editor: Editor,
    pub templates: Vec<NodeTemplate>,
}

impl EditorFixture {
    pub fn new() -> Self {
        Self {
            editor: Editor::new(),
            templates: builtin_templates(),
        }
    }

    /// Place a node from the palette directly at a canvas position.
    pub fn place(&mut self, template_index: usize, x: f32, y: f32) -> NodeId {
        self.editor
            .graph
            .create_node(&self.templates[template_index], CanvasPoint::new(x, y))
    }

    /// An input node at the origin and an output node at (400, 100):
    /// the smallest graph a connection gesture can run across.
    pub fn source_and_sink(&mut self) -> (NodeId, NodeId) {
        let source = self.place(0, 0.0, 0.0);
        let sink = self.place(2, 400.0, 100.0);
        (source, sink)
    }

    /// Connect a source node's sole output to a sink node's sole input
    /// through the store API.
    pub fn wire(&mut self, from: NodeId, to: NodeId) -> ConnectionId {
        self.editor
            .graph
            .connect((from, 1), (to, 1))
            .expect("fixture nodes should wire")
    }

    /// Screen position of a node's sole output-port anchor under the
    /// current viewport.
    pub fn output_anchor_screen(&self, node: NodeId) -> ScreenPoint {
        let anchor = self
            .editor
            .port_anchor(node, PortDirection::Output, 1)
            .expect("node should have an output port");
        self.editor.viewport.to_screen(anchor)
    }
}
