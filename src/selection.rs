use crate::graph::NodeId;
use slint::{Model, VecModel};
use std::collections::HashSet;

/// The set of currently selected nodes.
///
/// Membership is what matters; order is not tracked. The graph store keeps
/// this consistent with the node table: deleting a node removes its id here
/// in the same mutation.
#[derive(Default, Debug)]
pub struct SelectionSet {
    selected: HashSet<NodeId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply pointer-click semantics: replace the selection with `id`, or
    /// toggle its membership when the modifier key is held.
    pub fn click(&mut self, id: NodeId, toggle: bool) {
        if toggle {
            self.toggle(id);
        } else {
            if self.selected.len() == 1 && self.selected.contains(&id) {
                return;
            }
            self.selected.clear();
            self.selected.insert(id);
        }
    }

    /// Add `id` if absent, remove it if present.
    pub fn toggle(&mut self, id: NodeId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Replace the whole selection, e.g. with the result of a marquee.
    pub fn replace<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        self.selected.clear();
        self.selected.extend(ids);
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Remove a single id. Returns whether it was present.
    pub fn remove(&mut self, id: NodeId) -> bool {
        self.selected.remove(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.selected.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.selected.iter()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Mirror the selection into a Slint model for the renderer.
    pub fn sync_to_model(&self, model: &VecModel<i32>) {
        while model.row_count() > 0 {
            model.remove(0);
        }
        for &id in &self.selected {
            model.push(id);
        }
    }
}
