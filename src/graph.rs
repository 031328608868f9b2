use crate::selection::SelectionSet;
use crate::templates::NodeTemplate;
use crate::viewport::CanvasPoint;
use slint::SharedString;
use std::fmt;

pub type NodeId = i32;
pub type PortId = i32;
pub type ConnectionId = i32;

/// Which side of a node a port sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

/// A connection point on a node.
///
/// Port ids are unique within their owning node's direction-specific list
/// only: an input and an output on the same node may share an id.
#[derive(Clone, Debug)]
pub struct Port {
    pub id: PortId,
    pub name: SharedString,
    /// Type tag shown next to the port. Display only; never checked.
    pub type_tag: SharedString,
}

/// A node on the canvas.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    /// Archetype tag of the template this node was created from.
    pub archetype: SharedString,
    pub position: CanvasPoint,
    pub width: f32,
    pub height: f32,
    pub title: SharedString,
    pub description: SharedString,
    pub inputs: Vec<Port>,
    pub outputs: Vec<Port>,
}

impl Node {
    /// The port list for one direction.
    pub fn ports(&self, direction: PortDirection) -> &[Port] {
        match direction {
            PortDirection::Input => &self.inputs,
            PortDirection::Output => &self.outputs,
        }
    }

    /// Position of a port within its direction's list.
    pub fn port_index(&self, direction: PortDirection, id: PortId) -> Option<usize> {
        self.ports(direction).iter().position(|p| p.id == id)
    }
}

/// A directed connection from an output port to an input port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    pub from_node: NodeId,
    pub from_port: PortId,
    pub to_node: NodeId,
    pub to_port: PortId,
}

/// Why [`GraphStore::connect`] refused to create a connection.
///
/// Gesture code discards these: a connection attempt whose endpoints no
/// longer resolve is a silent no-op, because pointer gestures legitimately
/// race against keyboard-triggered deletions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectError {
    UnknownNode(NodeId),
    UnknownOutputPort { node: NodeId, port: PortId },
    UnknownInputPort { node: NodeId, port: PortId },
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "node {} does not exist", id),
            Self::UnknownOutputPort { node, port } => {
                write!(f, "node {} has no output port {}", node, port)
            }
            Self::UnknownInputPort { node, port } => {
                write!(f, "node {} has no input port {}", node, port)
            }
        }
    }
}

/// A partial node update. Absent fields are left untouched; the whole
/// update is applied in one step.
#[derive(Clone, Debug, Default)]
pub struct NodeUpdate {
    pub position: Option<CanvasPoint>,
    pub size: Option<(f32, f32)>,
    pub title: Option<SharedString>,
    pub description: Option<SharedString>,
}

impl NodeUpdate {
    /// Update that moves a node. This is the drag hot path.
    pub fn position(position: CanvasPoint) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// Update that rewrites a node's description text.
    pub fn description(text: SharedString) -> Self {
        Self {
            description: Some(text),
            ..Self::default()
        }
    }
}

/// Owner of the graph model: nodes, connections, and the selection set.
///
/// Every mutation is synchronous and atomic from the caller's point of
/// view. Operations referencing ids that no longer exist are no-ops, never
/// faults, and nothing can leave a connection dangling or a deleted node
/// selected.
#[derive(Debug)]
pub struct GraphStore {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    selection: SelectionSet,
    next_node_id: NodeId,
    next_connection_id: ConnectionId,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            connections: Vec::new(),
            selection: SelectionSet::new(),
            next_node_id: 1,
            next_connection_id: 1,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    // ------------------------------------------------------------------
    // Node operations
    // ------------------------------------------------------------------

    /// Create a node from a template at the given canvas position.
    ///
    /// The new node gets a fresh id and echoes the template's title,
    /// description, size, and port lists. Port ids are assigned
    /// sequentially from 1 within each direction.
    pub fn create_node(&mut self, template: &NodeTemplate, position: CanvasPoint) -> NodeId {
        let id = self.next_node_id;
        self.next_node_id += 1;

        let make_ports = |specs: &[crate::templates::PortSpec]| -> Vec<Port> {
            specs
                .iter()
                .enumerate()
                .map(|(i, spec)| Port {
                    id: i as PortId + 1,
                    name: spec.name.clone(),
                    type_tag: spec.type_tag.clone(),
                })
                .collect()
        };

        self.nodes.push(Node {
            id,
            archetype: template.archetype.clone(),
            position,
            width: template.width,
            height: template.height,
            title: template.title.clone(),
            description: template.description.clone(),
            inputs: make_ports(&template.inputs),
            outputs: make_ports(&template.outputs),
        });
        id
    }

    /// Apply a partial update. Unknown ids are ignored: rapid drag updates
    /// may arrive for a node that a concurrent key press just deleted.
    pub fn update_node(&mut self, id: NodeId, update: NodeUpdate) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if let Some(position) = update.position {
            node.position = position;
        }
        if let Some((width, height)) = update.size {
            node.width = width;
            node.height = height;
        }
        if let Some(title) = update.title {
            node.title = title;
        }
        if let Some(description) = update.description {
            node.description = description;
        }
    }

    /// Delete a node, every connection touching it, and its selection
    /// entry, as one transaction. Unknown ids are ignored.
    pub fn delete_node(&mut self, id: NodeId) {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if self.nodes.len() == before {
            return;
        }
        self.connections
            .retain(|c| c.from_node != id && c.to_node != id);
        self.selection.remove(id);
    }

    // ------------------------------------------------------------------
    // Connection operations
    // ------------------------------------------------------------------

    /// Create a connection from an output port to an input port.
    ///
    /// Both endpoints must resolve to a live node and a port of the
    /// correct direction; otherwise nothing is mutated and the reason is
    /// returned. Fan-in, fan-out, duplicates, and same-node wiring are
    /// all permitted.
    pub fn connect(
        &mut self,
        from: (NodeId, PortId),
        to: (NodeId, PortId),
    ) -> Result<ConnectionId, ConnectError> {
        let (from_node, from_port) = from;
        let (to_node, to_port) = to;

        let source = self
            .node(from_node)
            .ok_or(ConnectError::UnknownNode(from_node))?;
        source
            .port_index(PortDirection::Output, from_port)
            .ok_or(ConnectError::UnknownOutputPort {
                node: from_node,
                port: from_port,
            })?;

        let dest = self.node(to_node).ok_or(ConnectError::UnknownNode(to_node))?;
        dest.port_index(PortDirection::Input, to_port)
            .ok_or(ConnectError::UnknownInputPort {
                node: to_node,
                port: to_port,
            })?;

        let id = self.next_connection_id;
        self.next_connection_id += 1;
        self.connections.push(Connection {
            id,
            from_node,
            from_port,
            to_node,
            to_port,
        });
        Ok(id)
    }

    /// Delete a connection. Unknown ids are ignored.
    pub fn delete_connection(&mut self, id: ConnectionId) {
        self.connections.retain(|c| c.id != id);
    }

    // ------------------------------------------------------------------
    // Selection operations
    // ------------------------------------------------------------------

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Replace the selection. Ids that do not name a live node are dropped,
    /// keeping the set consistent with the node table.
    pub fn set_selection<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        let live: Vec<NodeId> = ids
            .into_iter()
            .filter(|&id| self.node(id).is_some())
            .collect();
        self.selection.replace(live);
    }

    /// Toggle a node's selection membership. Unknown ids are ignored.
    pub fn toggle_selection(&mut self, id: NodeId) {
        if self.node(id).is_some() {
            self.selection.toggle(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Click semantics used when a drag starts on a node title: replace
    /// the selection, or toggle membership under the modifier key.
    pub fn click_select(&mut self, id: NodeId, toggle: bool) {
        if self.node(id).is_some() {
            self.selection.click(id, toggle);
        }
    }
}
