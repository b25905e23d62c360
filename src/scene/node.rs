use std::fmt;

use crate::{
    foundation::{
        core::{Point, Rect},
        geometry,
    },
    scene::widget::Widget,
};

/// Identity of a node within one [`crate::SceneContext`].
///
/// Ids start at 1, grow monotonically and are never reused, so a stale id can never alias a newer
/// node.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    /// Raw identity value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a new node is made reachable from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Registered in the scene's registry: a traversal root.
    Global,
    /// Reachable only through its parent's child list.
    Owned,
}

/// Position, size and rotation of a node.
///
/// `rotation` is in radians, clockwise on a Y-down surface, about `(x, y)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeFrame {
    /// Left edge before rotation.
    pub x: f64,
    /// Top edge before rotation.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
    /// Rotation about `(x, y)`.
    pub rotation: f64,
}

impl NodeFrame {
    /// Unrotated frame.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w,
            h,
            rotation: 0.0,
        }
    }

    /// Same frame rotated by `rotation` radians.
    pub fn with_rotation(self, rotation: f64) -> Self {
        Self { rotation, ..self }
    }

    /// Top-left corner (the rotation pivot).
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Unrotated rect.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }

    /// Center of the frame in surface space.
    pub fn center(&self) -> Point {
        geometry::to_surface(self.rect().center(), self.rect(), self.rotation)
    }

    /// Rotation-aware hit test with open intervals: edge points are outside.
    pub fn contains_point(&self, p: Point) -> bool {
        geometry::rotated_rect_contains(self.rect(), self.rotation, p)
    }
}

/// A scene-graph element: identity, frame, lifecycle flags, owned children and its widget.
///
/// Nodes live in a [`crate::SceneContext`] arena; a destroyed node is removed from it, so
/// liveness is `SceneContext::is_alive(id)`.
#[derive(Debug)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) frame: NodeFrame,
    pub(crate) enabled: bool,
    pub(crate) scope: Scope,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) widget: Widget,
}

impl Node {
    pub(crate) fn new(id: NodeId, frame: NodeFrame, scope: Scope, widget: Widget) -> Self {
        Self {
            id,
            frame,
            enabled: true,
            scope,
            parent: None,
            children: Vec::new(),
            widget,
        }
    }

    /// Node identity.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Current frame.
    pub fn frame(&self) -> &NodeFrame {
        &self.frame
    }

    /// Whether traversals visit this node (and its subtree).
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Registration scope the node was created with.
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Owning parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Owned children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Widget variant driving this node's behavior.
    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    /// Mutable access to the widget variant.
    pub fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    /// Hit test against this node's frame.
    pub fn contains_point(&self, p: Point) -> bool {
        self.frame.contains_point(p)
    }
}
