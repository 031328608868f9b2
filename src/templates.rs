use slint::SharedString;

/// One port of a node archetype: the display name and the type tag shown
/// next to the port. The tag is informational only; connections are checked
/// for direction, not type.
#[derive(Clone, Debug)]
pub struct PortSpec {
    pub name: SharedString,
    pub type_tag: SharedString,
}

impl PortSpec {
    pub fn new(name: &str, type_tag: &str) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
        }
    }
}

/// A node archetype offered by the palette.
///
/// The palette hands one of these to [`GraphStore::create_node`] when the
/// user places a node; the store echoes its title, description, size, and
/// port lists into the new node.
///
/// [`GraphStore::create_node`]: crate::graph::GraphStore::create_node
#[derive(Clone, Debug)]
pub struct NodeTemplate {
    /// Archetype tag, stored on every node created from this template.
    pub archetype: SharedString,
    pub title: SharedString,
    pub description: SharedString,
    pub width: f32,
    pub height: f32,
    pub inputs: Vec<PortSpec>,
    pub outputs: Vec<PortSpec>,
}

/// The built-in palette: an input source, a processing stage, and an
/// output sink.
pub fn builtin_templates() -> Vec<NodeTemplate> {
    vec![
        NodeTemplate {
            archetype: "input".into(),
            title: "Input".into(),
            description: "Provides input data".into(),
            width: 180.0,
            height: 80.0,
            inputs: vec![],
            outputs: vec![PortSpec::new("Out", "default")],
        },
        NodeTemplate {
            archetype: "process".into(),
            title: "Process".into(),
            description: "Processes input data".into(),
            width: 200.0,
            height: 100.0,
            inputs: vec![PortSpec::new("In", "default")],
            outputs: vec![PortSpec::new("Out", "default")],
        },
        NodeTemplate {
            archetype: "output".into(),
            title: "Output".into(),
            description: "Displays the result".into(),
            width: 180.0,
            height: 80.0,
            inputs: vec![PortSpec::new("In", "default")],
            outputs: vec![],
        },
    ]
}
