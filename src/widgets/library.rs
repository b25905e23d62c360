use crate::{
    dispatch::pointer::ClickEvent,
    foundation::{
        core::{Color, Point},
        error::SceneResult,
    },
    render::surface::{Surface, fill_circle},
    scene::{
        context::SceneContext,
        node::{NodeFrame, NodeId, Scope},
        widget::{Behavior, Widget},
    },
    widgets::label::{LabelStyle, spawn_label, toggle_label},
};

/// Gap between the marker and its label.
const LABEL_GAP: f64 = 4.0;

/// Circular library marker. Clicking it shows or hides its name label.
#[derive(Clone, Debug, PartialEq)]
pub struct Library {
    name: String,
    radius: f64,
    color: Color,
    label: Option<NodeId>,
}

impl Library {
    /// Create the marker centred on `center` and its label to the right of it.
    pub fn spawn(
        scene: &mut SceneContext,
        center: Point,
        radius: f64,
        name: &str,
        label: &LabelStyle,
        scope: Scope,
    ) -> NodeId {
        let frame = NodeFrame::new(
            center.x - radius,
            center.y - radius,
            2.0 * radius,
            2.0 * radius,
        );
        let widget = Self {
            name: name.to_owned(),
            radius,
            color: Color::BLACK,
            label: None,
        };
        let id = scene.create(frame, scope, Widget::Library(widget));
        let label_id = spawn_label(
            scene,
            id,
            Point::new(center.x + radius + LABEL_GAP, center.y - radius),
            name,
            label,
        );
        if let Some(Widget::Library(lib)) = scene.get_mut(id).map(|n| n.widget_mut()) {
            lib.label = Some(label_id);
        }
        tracing::debug!(%id, name, "spawn library");
        id
    }

    /// Library name shown in the label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Circle radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Label text box node.
    pub fn label(&self) -> Option<NodeId> {
        self.label
    }
}

impl Behavior for Library {
    fn render(&self, frame: &NodeFrame, surface: &mut dyn Surface) -> SceneResult<()> {
        surface.set_fill(self.color);
        fill_circle(surface, frame.center(), self.radius);
        Ok(())
    }

    fn click(&mut self, scene: &mut SceneContext, id: NodeId, _event: &ClickEvent) {
        toggle_label(scene, id, self.label);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/library.rs"]
mod tests;
