use crate::{
    foundation::core::{Color, Font, Point},
    layout::text_flow::{RunSpec, TextBox},
    scene::{
        context::SceneContext,
        node::{NodeId, Scope},
    },
};

/// How a composite widget's toggleable text label is built.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelStyle {
    /// Label font.
    pub font: Font,
    /// Text color.
    pub color: Color,
    /// Text box margin.
    pub margin: f64,
    /// Initial enabled state.
    pub visible: bool,
    /// Registration scope of the label node.
    pub scope: Scope,
}

impl LabelStyle {
    /// Visible, owned, black label without margin.
    pub fn new(font: Font) -> Self {
        Self {
            font,
            color: Color::BLACK,
            margin: 0.0,
            visible: true,
            scope: Scope::Owned,
        }
    }

    /// Register the label with `scope`.
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Start the label shown or hidden.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// Build a single-run label text box under `parent`.
pub(crate) fn spawn_label(
    scene: &mut SceneContext,
    parent: NodeId,
    origin: Point,
    text: &str,
    style: &LabelStyle,
) -> NodeId {
    let text_box = TextBox::new(style.margin).with_runs(vec![RunSpec::text(
        text,
        style.font.clone(),
        style.color,
    )]);
    let id = TextBox::spawn_child(scene, parent, origin, text_box, style.scope);
    if !style.visible {
        scene.set_enabled(id, false);
    }
    id
}

/// Show or hide a label on behalf of `owner`.
pub(crate) fn toggle_label(scene: &mut SceneContext, owner: NodeId, label: Option<NodeId>) {
    let Some(label) = label else {
        return;
    };
    let shown = scene.toggle_enabled(label);
    tracing::debug!(%owner, %label, ?shown, "toggle label");
}
