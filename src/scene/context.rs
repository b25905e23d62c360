use std::collections::{BTreeMap, BTreeSet};

use crate::{
    dispatch::pointer::ClickEvent,
    foundation::{
        core::{Color, Point},
        error::SceneResult,
    },
    render::{debug::DEBUG_PALETTE, surface::Surface},
    scene::{
        node::{Node, NodeFrame, NodeId, Scope},
        widget::Widget,
    },
};

/// Owns every node of one scene: the identity arena, the id counter and the ordered registry of
/// globally scoped nodes.
///
/// Ids grow monotonically, so iterating the registry in id order is creation order.
#[derive(Debug)]
pub struct SceneContext {
    pub(crate) nodes: BTreeMap<NodeId, Node>,
    pub(crate) registry: BTreeSet<NodeId>,
    next_id: u64,
    debug_bounds: bool,
    debug_palette: Vec<Color>,
}

impl Default for SceneContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneContext {
    /// Empty scene; the first node gets id 1.
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            registry: BTreeSet::new(),
            next_id: 1,
            debug_bounds: false,
            debug_palette: DEBUG_PALETTE.to_vec(),
        }
    }

    /// Create a root-level node. It is registered iff `scope` is [`Scope::Global`].
    pub fn create(&mut self, frame: NodeFrame, scope: Scope, widget: Widget) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        tracing::trace!(%id, kind = widget.kind(), ?scope, "create node");
        self.nodes.insert(id, Node::new(id, frame, scope, widget));
        if scope == Scope::Global {
            self.registry.insert(id);
        }
        id
    }

    /// Create a node owned by `parent`, appended to its children.
    ///
    /// A missing parent leaves the node detached; an [`Scope::Owned`] node is then unreachable
    /// and is dropped again right away.
    pub fn create_child(
        &mut self,
        parent: NodeId,
        frame: NodeFrame,
        scope: Scope,
        widget: Widget,
    ) -> NodeId {
        let id = self.create(frame, scope, widget);
        match self.nodes.get_mut(&parent) {
            Some(p) => {
                p.children.push(id);
                if let Some(child) = self.nodes.get_mut(&id) {
                    child.parent = Some(parent);
                }
            }
            None => {
                tracing::warn!(%parent, child = %id, "create_child on a missing parent");
                if scope == Scope::Owned {
                    self.destroy(id);
                }
            }
        }
        id
    }

    /// Destroy a node and, transitively, everything it owns.
    ///
    /// Removal is by identity from the arena, the registry and the parent's child list. Unknown
    /// or already destroyed ids are ignored.
    pub fn destroy(&mut self, id: NodeId) {
        let Some(node) = self.nodes.remove(&id) else {
            tracing::trace!(%id, "destroy of unknown node ignored");
            return;
        };
        self.registry.remove(&id);
        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }
        for child in node.children {
            self.destroy_detached(child);
        }
    }

    // Children of a node being destroyed: no need to edit the (already removed) parent.
    fn destroy_detached(&mut self, id: NodeId) {
        let Some(node) = self.nodes.remove(&id) else {
            return;
        };
        self.registry.remove(&id);
        for child in node.children {
            self.destroy_detached(child);
        }
    }

    /// Whether `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Live node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Mutable live node by id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Registered (globally scoped) ids in creation order.
    pub fn registry(&self) -> Vec<NodeId> {
        self.registry.iter().copied().collect()
    }

    /// Whether `id` is in the registry.
    pub fn is_registered(&self, id: NodeId) -> bool {
        self.registry.contains(&id)
    }

    /// Number of live nodes, owned ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene holds no live nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Frame of a live node.
    pub fn frame(&self, id: NodeId) -> Option<NodeFrame> {
        self.nodes.get(&id).map(|n| n.frame)
    }

    /// Replace the frame of a live node. Returns `false` for unknown ids.
    pub fn set_frame(&mut self, id: NodeId, frame: NodeFrame) -> bool {
        match self.nodes.get_mut(&id) {
            Some(n) => {
                n.frame = frame;
                true
            }
            None => false,
        }
    }

    /// Owned children of a live node (empty for unknown ids).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Enable or disable a node; disabled nodes and their subtrees are skipped by traversals.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) {
        if let Some(n) = self.nodes.get_mut(&id) {
            n.enabled = enabled;
        }
    }

    /// Flip the enabled flag, returning the new value.
    pub fn toggle_enabled(&mut self, id: NodeId) -> Option<bool> {
        let n = self.nodes.get_mut(&id)?;
        n.enabled = !n.enabled;
        Some(n.enabled)
    }

    /// Whether a node is live and enabled.
    pub fn is_enabled(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.enabled)
    }

    /// Hit test a live node. Unknown ids never contain anything.
    pub fn contains_point(&self, id: NodeId, p: Point) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.contains_point(p))
    }

    /// Whether render ticks overlay per-depth bounding outlines.
    pub fn debug_bounds(&self) -> bool {
        self.debug_bounds
    }

    /// Toggle the debug bounding outlines.
    pub fn set_debug_bounds(&mut self, on: bool) {
        self.debug_bounds = on;
    }

    /// Outline colors cycled by traversal depth.
    pub fn debug_palette(&self) -> &[Color] {
        &self.debug_palette
    }

    /// Replace the debug palette; an empty palette falls back to the built-in one.
    pub fn set_debug_palette(&mut self, palette: Vec<Color>) {
        self.debug_palette = if palette.is_empty() {
            DEBUG_PALETTE.to_vec()
        } else {
            palette
        };
    }

    /// Run `f` with the widget of `id` detached from the arena.
    ///
    /// The widget is put back afterwards unless `f` destroyed its node.
    pub(crate) fn with_widget<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut Widget, &mut Self) -> R,
    ) -> Option<R> {
        let node = self.nodes.get_mut(&id)?;
        let mut widget = std::mem::take(&mut node.widget);
        let out = f(&mut widget, self);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.widget = widget;
        }
        Some(out)
    }

    /// Run one node's logic.
    pub fn logic(&mut self, id: NodeId, surface: &mut dyn Surface) -> SceneResult<()> {
        self.with_widget(id, |w, scene| {
            w.as_behavior_mut().logic(scene, id, surface)
        })
        .unwrap_or(Ok(()))
    }

    /// Draw one node.
    pub fn render(&self, id: NodeId, surface: &mut dyn Surface) -> SceneResult<()> {
        match self.nodes.get(&id) {
            Some(n) => n.widget.as_behavior().render(&n.frame, surface),
            None => Ok(()),
        }
    }

    /// Deliver a click payload to one node.
    pub fn click(&mut self, id: NodeId, event: &ClickEvent) {
        self.with_widget(id, |w, scene| w.as_behavior_mut().click(scene, id, event));
    }

    /// Deliver a hover notification to one node.
    pub fn hover(&mut self, id: NodeId) {
        self.with_widget(id, |w, scene| w.as_behavior_mut().hover(scene, id));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/context.rs"]
mod tests;
