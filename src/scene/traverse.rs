//! Tree walks over a [`SceneContext`].
//!
//! Both walks start from the registered root nodes in creation order and skip dead or disabled nodes together
//! with their subtrees.

use crate::{
    foundation::error::SceneResult,
    scene::{
        context::SceneContext,
        node::{Node, NodeId},
    },
};

impl SceneContext {
    fn visitable(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id).filter(|n| n.enabled)
    }

    /// Registered nodes that are not owned by another node, in creation order.
    ///
    /// A registered child is reached through its parent, never as a root as well.
    pub fn roots(&self) -> Vec<NodeId> {
        self.registry
            .iter()
            .copied()
            .filter(|id| self.nodes.get(id).is_some_and(|n| n.parent.is_none()))
            .collect()
    }

    /// Unlayered depth-first walk: a node, then its whole subtree, then the next sibling.
    ///
    /// The visitor may mutate the scene. A node's children are read after it has been visited,
    /// so children created by the visit (e.g. freshly laid out text leaves) are walked in the same
    /// pass. Returns the number of visited nodes; the first visitor error aborts the walk.
    pub fn walk_depth_first<F>(&mut self, mut visit: F) -> SceneResult<usize>
    where
        F: FnMut(&mut Self, NodeId, usize) -> SceneResult<()>,
    {
        let mut visited = 0;
        for root in self.roots() {
            self.depth_first_from(root, 0, &mut visit, &mut visited)?;
        }
        Ok(visited)
    }

    fn depth_first_from<F>(
        &mut self,
        id: NodeId,
        depth: usize,
        visit: &mut F,
        visited: &mut usize,
    ) -> SceneResult<()>
    where
        F: FnMut(&mut Self, NodeId, usize) -> SceneResult<()>,
    {
        if self.visitable(id).is_none() {
            return Ok(());
        }
        visit(self, id, depth)?;
        *visited += 1;

        // The visit may have destroyed or disabled the node.
        let Some(children) = self.visitable(id).map(|n| n.children.clone()) else {
            return Ok(());
        };
        for child in children {
            self.depth_first_from(child, depth + 1, visit, visited)?;
        }
        Ok(())
    }

    /// Layered walk: every enabled node at depth N in order, then the combined children of that
    /// level, one level at a time.
    ///
    /// Later-visited nodes sit on top of earlier ones, which is what hit testing relies on.
    /// Returns the number of visited nodes.
    pub fn walk_layered<F>(&self, mut visit: F) -> SceneResult<usize>
    where
        F: FnMut(&Node, usize) -> SceneResult<()>,
    {
        let mut level = self.roots();
        let mut depth = 0;
        let mut visited = 0;
        while !level.is_empty() {
            let mut next = Vec::new();
            for id in level {
                let Some(node) = self.visitable(id) else {
                    continue;
                };
                visit(node, depth)?;
                visited += 1;
                next.extend_from_slice(&node.children);
            }
            level = next;
            depth += 1;
        }
        Ok(visited)
    }

    /// Ids in layered order with their depths.
    pub fn layered_order(&self) -> Vec<(NodeId, usize)> {
        let mut out = Vec::new();
        // The visitor is infallible.
        let _ = self.walk_layered(|node, depth| {
            out.push((node.id, depth));
            Ok(())
        });
        out
    }

    /// Ids in depth-first order with their depths, without running any behavior.
    pub fn depth_first_order(&self) -> Vec<(NodeId, usize)> {
        fn push(scene: &SceneContext, id: NodeId, depth: usize, out: &mut Vec<(NodeId, usize)>) {
            let Some(node) = scene.visitable(id) else {
                return;
            };
            out.push((id, depth));
            for &child in &node.children {
                push(scene, child, depth + 1, out);
            }
        }

        let mut out = Vec::new();
        for root in self.roots() {
            push(self, root, 0, &mut out);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/traverse.rs"]
mod tests;
