use crate::{
    dispatch::pointer::ClickEvent,
    foundation::error::SceneResult,
    layout::{leaf::TextLeaf, text_flow::TextBox},
    render::surface::Surface,
    scene::{
        context::SceneContext,
        node::{NodeFrame, NodeId},
    },
    widgets::{arrow::Arrow, library::Library, timers::Timers},
};

/// Capabilities every node variant exposes. All of them default to no-ops.
///
/// `logic`, `click` and `hover` run while the widget is temporarily detached from its node, so
/// they may freely create, destroy and mutate other nodes through `scene` (including children of
/// `id`). Changes to the frame of `id` must go through `scene` as well.
pub trait Behavior {
    /// Per-logic-tick state update.
    fn logic(
        &mut self,
        _scene: &mut SceneContext,
        _id: NodeId,
        _surface: &mut dyn Surface,
    ) -> SceneResult<()> {
        Ok(())
    }

    /// Draw the node for the current render tick.
    fn render(&self, _frame: &NodeFrame, _surface: &mut dyn Surface) -> SceneResult<()> {
        Ok(())
    }

    /// Pointer-down delivered to this node as the topmost hit.
    fn click(&mut self, _scene: &mut SceneContext, _id: NodeId, _event: &ClickEvent) {}

    /// Hover notification. Nothing dispatches this yet.
    fn hover(&mut self, _scene: &mut SceneContext, _id: NodeId) {}
}

/// Node without behavior: a pure grouping/hit-test element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Plain;

impl Behavior for Plain {}

/// Closed set of node variants.
#[derive(Debug)]
pub enum Widget {
    /// No behavior.
    Plain(Plain),
    /// Text flow container producing [`Widget::TextLeaf`] children.
    TextBox(TextBox),
    /// One positioned run of text.
    TextLeaf(TextLeaf),
    /// Circular library marker with a toggleable label.
    Library(Library),
    /// Directed connector with a toggleable label.
    Arrow(Arrow),
    /// Render/logic timing readout.
    Timers(Timers),
}

impl Default for Widget {
    fn default() -> Self {
        Self::Plain(Plain)
    }
}

impl Widget {
    /// Short variant name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Plain(_) => "plain",
            Self::TextBox(_) => "text_box",
            Self::TextLeaf(_) => "text_leaf",
            Self::Library(_) => "library",
            Self::Arrow(_) => "arrow",
            Self::Timers(_) => "timers",
        }
    }

    /// The variant as its capability interface.
    pub fn as_behavior(&self) -> &dyn Behavior {
        match self {
            Self::Plain(w) => w,
            Self::TextBox(w) => w,
            Self::TextLeaf(w) => w,
            Self::Library(w) => w,
            Self::Arrow(w) => w,
            Self::Timers(w) => w,
        }
    }

    /// The variant as its mutable capability interface.
    pub fn as_behavior_mut(&mut self) -> &mut dyn Behavior {
        match self {
            Self::Plain(w) => w,
            Self::TextBox(w) => w,
            Self::TextLeaf(w) => w,
            Self::Library(w) => w,
            Self::Arrow(w) => w,
            Self::Timers(w) => w,
        }
    }

    /// Text box payload, if this is one.
    pub fn as_text_box(&self) -> Option<&TextBox> {
        match self {
            Self::TextBox(b) => Some(b),
            _ => None,
        }
    }

    /// Mutable text box payload, if this is one.
    pub fn as_text_box_mut(&mut self) -> Option<&mut TextBox> {
        match self {
            Self::TextBox(b) => Some(b),
            _ => None,
        }
    }

    /// Text leaf payload, if this is one.
    pub fn as_text_leaf(&self) -> Option<&TextLeaf> {
        match self {
            Self::TextLeaf(l) => Some(l),
            _ => None,
        }
    }
}
