//! High-level controller for wiring an [`Editor`] to a Slint front end.
//!
//! The [`FlowEditorController`] owns the editor behind `Rc<RefCell<_>>` so
//! it can be cloned into every callback, and exposes the pointer handlers
//! in the shape the UI reports them: one handler per picked element, with
//! raw coordinates and DOM-style button codes.
//!
//! # Example
//!
//! ```ignore
//! use slint_flow_editor::FlowEditorController;
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!     let ctrl = FlowEditorController::new();
//!
//!     window.on_canvas_pointer_down({
//!         let ctrl = ctrl.clone();
//!         move |x, y, button, shift| ctrl.canvas_pointer_down(x, y, button, shift)
//!     });
//!     window.on_node_title_pointer_down({
//!         let ctrl = ctrl.clone();
//!         move |id, x, y, shift| ctrl.node_title_pointer_down(id, x, y, shift)
//!     });
//!     window.on_pointer_moved({
//!         let ctrl = ctrl.clone();
//!         move |x, y| ctrl.pointer_move(x, y)
//!     });
//!     window.on_compute_connection_path(ctrl.connection_path_callback());
//!
//!     window.run().unwrap();
//! }
//! ```

use crate::editor::{Editor, HitTarget, PointerButton};
use crate::graph::{Connection, ConnectionId, Node, NodeId, PortId};
use crate::templates::NodeTemplate;
use crate::viewport::{CanvasPoint, ScreenPoint, ScreenRect};
use slint::{Model, SharedString, VecModel};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle around an [`Editor`]. Clone it freely; all clones operate
/// on the same editor.
#[derive(Clone)]
pub struct FlowEditorController {
    editor: Rc<RefCell<Editor>>,
}

impl Default for FlowEditorController {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowEditorController {
    pub fn new() -> Self {
        Self {
            editor: Rc::new(RefCell::new(Editor::new())),
        }
    }

    /// Direct access to the shared editor.
    pub fn editor(&self) -> Rc<RefCell<Editor>> {
        self.editor.clone()
    }

    // === Pointer wiring ===
    //
    // Each handler corresponds to one pickable element in the UI. The
    // element identity doubles as the hit target, so the editor never has
    // to re-derive what was under the pointer.

    /// Pointer press on empty canvas.
    pub fn canvas_pointer_down(&self, x: f32, y: f32, button: i32, shift: bool) {
        let Some(button) = PointerButton::from_code(button) else {
            return;
        };
        self.editor.borrow_mut().pointer_down(
            ScreenPoint::new(x, y),
            button,
            shift,
            HitTarget::Canvas,
        );
    }

    /// Pointer press on a node's title bar.
    pub fn node_title_pointer_down(&self, node: NodeId, x: f32, y: f32, shift: bool) {
        self.editor.borrow_mut().pointer_down(
            ScreenPoint::new(x, y),
            PointerButton::Primary,
            shift,
            HitTarget::NodeTitle(node),
        );
    }

    /// Pointer press on a node's body.
    pub fn node_body_pointer_down(&self, node: NodeId, x: f32, y: f32, shift: bool) {
        self.editor.borrow_mut().pointer_down(
            ScreenPoint::new(x, y),
            PointerButton::Primary,
            shift,
            HitTarget::NodeBody(node),
        );
    }

    /// Pointer press on an output port: starts drawing a connection.
    pub fn output_port_pointer_down(&self, node: NodeId, port: PortId, x: f32, y: f32) {
        self.editor.borrow_mut().pointer_down(
            ScreenPoint::new(x, y),
            PointerButton::Primary,
            false,
            HitTarget::OutputPort(node, port),
        );
    }

    /// Pointer release on an input port: completes a pending connection.
    pub fn input_port_pointer_up(&self, node: NodeId, port: PortId, x: f32, y: f32) {
        self.editor
            .borrow_mut()
            .pointer_up(ScreenPoint::new(x, y), HitTarget::InputPort(node, port));
    }

    pub fn pointer_move(&self, x: f32, y: f32) {
        self.editor.borrow_mut().pointer_move(ScreenPoint::new(x, y));
    }

    /// Pointer release anywhere that is not a port.
    pub fn pointer_up(&self, x: f32, y: f32) {
        self.editor
            .borrow_mut()
            .pointer_up(ScreenPoint::new(x, y), HitTarget::Canvas);
    }

    pub fn pointer_leave(&self) {
        self.editor.borrow_mut().pointer_leave();
    }

    /// The host's delete key binding.
    pub fn delete_pressed(&self) {
        self.editor.borrow_mut().delete_selected();
    }

    // === Toolbar and wheel ===

    pub fn zoom_in(&self) {
        self.editor.borrow_mut().viewport.zoom_in();
    }

    pub fn zoom_out(&self) {
        self.editor.borrow_mut().viewport.zoom_out();
    }

    /// Scroll-wheel zoom: one step per event, direction from the sign of
    /// the vertical delta.
    pub fn wheel_zoom(&self, delta_y: f32) {
        let mut editor = self.editor.borrow_mut();
        if delta_y > 0.0 {
            editor.viewport.zoom_out();
        } else {
            editor.viewport.zoom_in();
        }
    }

    pub fn reset_view(&self) {
        self.editor.borrow_mut().viewport.reset();
    }

    pub fn set_zoom(&self, zoom: f32) {
        self.editor.borrow_mut().viewport.set_zoom(zoom);
    }

    pub fn zoom(&self) -> f32 {
        self.editor.borrow().viewport.zoom()
    }

    // === Palette ===

    /// Place a node from a palette drop. The drop point is converted into
    /// canvas space and the node is centered on it, rounded to whole
    /// canvas units.
    pub fn drop_template_at(&self, template: &NodeTemplate, x: f32, y: f32) -> NodeId {
        let mut editor = self.editor.borrow_mut();
        let p = editor.viewport.to_canvas(ScreenPoint::new(x, y));
        let position = CanvasPoint::new(
            (p.x - template.width / 2.0).round(),
            (p.y - template.height / 2.0).round(),
        );
        editor.graph.create_node(template, position)
    }

    // === Overlays and paths ===

    /// Canvas-space path for the provisional connector, or empty when no
    /// connection gesture is active.
    pub fn pending_connection_path(&self) -> SharedString {
        self.editor
            .borrow()
            .pending_connection_path()
            .unwrap_or_default()
            .into()
    }

    /// The active marquee rectangle in screen space, if any.
    pub fn marquee_rect(&self) -> Option<ScreenRect> {
        self.editor.borrow().marquee_rect()
    }

    /// Canvas-space path for an existing connection, or empty if it does
    /// not resolve.
    pub fn connection_path(&self, id: ConnectionId) -> SharedString {
        self.editor
            .borrow()
            .connection_path(id)
            .unwrap_or_default()
            .into()
    }

    /// Screen-space path for an existing connection, for renderers that
    /// draw connectors outside the zoomed canvas layer. The control-point
    /// offset scales with the zoom so the curve matches the canvas-space
    /// rendition.
    pub fn connection_path_screen(&self, id: ConnectionId) -> SharedString {
        let editor = self.editor.borrow();
        let Some((from, to)) = editor.connection_endpoints(id) else {
            return SharedString::default();
        };
        let zoom = editor.viewport.zoom();
        let from = editor.viewport.to_screen(from);
        let to = editor.viewport.to_screen(to);
        crate::geometry::connection_path(from.x, from.y, to.x, to.y, editor.control_offset() * zoom)
            .into()
    }

    /// Callback for a `compute-connection-path(id)` Slint callback.
    pub fn connection_path_callback(&self) -> impl Fn(i32) -> SharedString {
        let ctrl = self.clone();
        move |id| ctrl.connection_path(id)
    }

    // === Description editing ===

    pub fn begin_description_edit(&self, node: NodeId) {
        self.editor.borrow_mut().begin_description_edit(node);
    }

    pub fn commit_description_edit(&self, text: SharedString) {
        self.editor.borrow_mut().commit_description_edit(text);
    }

    pub fn cancel_description_edit(&self) {
        self.editor.borrow_mut().cancel_description_edit();
    }

    pub fn editing_node(&self) -> Option<NodeId> {
        self.editor.borrow().editing_node()
    }

    // === Model synchronization ===

    /// Mirror the node table into a Slint model, building each row with
    /// `convert`. Existing rows are updated in place so the UI does not
    /// rebuild untouched items.
    pub fn sync_nodes_to_model<T, F>(&self, model: &VecModel<T>, convert: F)
    where
        T: Clone + 'static,
        F: Fn(&Node) -> T,
    {
        let rows: Vec<T> = self.editor.borrow().graph.nodes().iter().map(convert).collect();
        sync_rows(model, rows);
    }

    /// Mirror the connection table into a Slint model.
    pub fn sync_connections_to_model<T, F>(&self, model: &VecModel<T>, convert: F)
    where
        T: Clone + 'static,
        F: Fn(&Connection) -> T,
    {
        let rows: Vec<T> = self
            .editor
            .borrow()
            .graph
            .connections()
            .iter()
            .map(convert)
            .collect();
        sync_rows(model, rows);
    }

    /// Mirror the selection set into a Slint model of node ids.
    pub fn sync_selection_to_model(&self, model: &VecModel<i32>) {
        self.editor.borrow().graph.selection().sync_to_model(model);
    }
}

/// Update existing rows in place, append new ones, trim the excess.
fn sync_rows<T: Clone + 'static>(model: &VecModel<T>, rows: Vec<T>) {
    for (i, row) in rows.iter().enumerate() {
        if i < model.row_count() {
            model.set_row_data(i, row.clone());
        } else {
            model.push(row.clone());
        }
    }
    while model.row_count() > rows.len() {
        model.remove(model.row_count() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::builtin_templates;

    // ========================================================================
    // Palette placement
    // ========================================================================

    #[test]
    fn test_drop_template_centers_node_under_pointer() {
        let ctrl = FlowEditorController::new();
        let templates = builtin_templates();

        let id = ctrl.drop_template_at(&templates[0], 300.0, 200.0);

        let editor = ctrl.editor();
        let editor = editor.borrow();
        let node = editor.graph.node(id).unwrap();
        // 180x80 template: centered means origin (300-90, 200-40).
        assert_eq!(node.position, CanvasPoint::new(210.0, 160.0));
    }

    #[test]
    fn test_drop_template_converts_through_viewport() {
        let ctrl = FlowEditorController::new();
        let templates = builtin_templates();
        ctrl.set_zoom(2.0);
        ctrl.editor().borrow_mut().viewport.set_pan(100.0, 100.0);

        let id = ctrl.drop_template_at(&templates[0], 500.0, 340.0);

        let editor = ctrl.editor();
        let editor = editor.borrow();
        let node = editor.graph.node(id).unwrap();
        // Drop point in canvas space is (200, 120); minus half the size.
        assert_eq!(node.position, CanvasPoint::new(110.0, 80.0));
    }

    // ========================================================================
    // Toolbar wrappers
    // ========================================================================

    #[test]
    fn test_toolbar_zoom_round_trip() {
        let ctrl = FlowEditorController::new();
        ctrl.zoom_in();
        assert!((ctrl.zoom() - 1.1).abs() < 1e-4);
        ctrl.reset_view();
        assert_eq!(ctrl.zoom(), 1.0);
        ctrl.set_zoom(99.0);
        assert_eq!(ctrl.zoom(), 2.0);
    }

    #[test]
    fn test_wheel_zoom_direction() {
        let ctrl = FlowEditorController::new();
        ctrl.wheel_zoom(-120.0);
        assert!((ctrl.zoom() - 1.1).abs() < 1e-4);
        ctrl.wheel_zoom(120.0);
        assert!((ctrl.zoom() - 0.99).abs() < 1e-4);
    }

    // ========================================================================
    // End-to-end pointer wiring
    // ========================================================================

    #[test]
    fn test_port_to_port_wiring_creates_connection() {
        let ctrl = FlowEditorController::new();
        let templates = builtin_templates();
        let a = ctrl.drop_template_at(&templates[0], 100.0, 100.0);
        let b = ctrl.drop_template_at(&templates[2], 500.0, 100.0);

        ctrl.output_port_pointer_down(a, 1, 190.0, 90.0);
        ctrl.pointer_move(300.0, 95.0);
        ctrl.input_port_pointer_up(b, 1, 410.0, 90.0);

        let editor = ctrl.editor();
        let editor = editor.borrow();
        assert_eq!(editor.graph.connections().len(), 1);
        let conn = &editor.graph.connections()[0];
        assert_eq!((conn.from_node, conn.to_node), (a, b));
    }

    #[test]
    fn test_release_on_canvas_abandons_connection() {
        let ctrl = FlowEditorController::new();
        let templates = builtin_templates();
        let a = ctrl.drop_template_at(&templates[0], 100.0, 100.0);

        ctrl.output_port_pointer_down(a, 1, 190.0, 90.0);
        assert!(!ctrl.pending_connection_path().is_empty());

        ctrl.pointer_up(300.0, 300.0);
        assert!(ctrl.pending_connection_path().is_empty());

        let editor = ctrl.editor();
        assert!(editor.borrow().graph.connections().is_empty());
    }

    #[test]
    fn test_unknown_button_code_is_ignored() {
        let ctrl = FlowEditorController::new();
        ctrl.canvas_pointer_down(0.0, 0.0, 7, false);
        assert!(ctrl.marquee_rect().is_none());
    }

    // ========================================================================
    // Model sync
    // ========================================================================

    #[test]
    fn test_sync_nodes_to_model_updates_and_trims() {
        let ctrl = FlowEditorController::new();
        let templates = builtin_templates();
        let a = ctrl.drop_template_at(&templates[0], 100.0, 100.0);
        let b = ctrl.drop_template_at(&templates[2], 400.0, 100.0);

        let model: Rc<VecModel<i32>> = Rc::new(VecModel::default());
        ctrl.sync_nodes_to_model(&model, |n| n.id);
        assert_eq!(model.row_count(), 2);

        ctrl.editor().borrow_mut().graph.delete_node(a);
        ctrl.sync_nodes_to_model(&model, |n| n.id);
        assert_eq!(model.row_count(), 1);
        assert_eq!(model.row_data(0), Some(b));
    }

    #[test]
    fn test_sync_selection_to_model() {
        let ctrl = FlowEditorController::new();
        let templates = builtin_templates();
        let a = ctrl.drop_template_at(&templates[0], 100.0, 100.0);

        ctrl.editor().borrow_mut().graph.set_selection(vec![a]);

        let model: Rc<VecModel<i32>> = Rc::new(VecModel::default());
        ctrl.sync_selection_to_model(&model);
        assert_eq!(model.row_count(), 1);
        assert_eq!(model.row_data(0), Some(a));
    }

    #[test]
    fn test_connection_path_callback() {
        let ctrl = FlowEditorController::new();
        let templates = builtin_templates();
        let a = ctrl.drop_template_at(&templates[0], 100.0, 100.0);
        let b = ctrl.drop_template_at(&templates[2], 500.0, 100.0);
        let conn = {
            let editor = ctrl.editor();
            let id = editor.borrow_mut().graph.connect((a, 1), (b, 1)).unwrap();
            id
        };

        let callback = ctrl.connection_path_callback();
        let path = callback(conn);
        assert!(path.starts_with("M "));
        assert!(path.contains(" C "));

        assert!(callback(9999).is_empty());
    }
}
