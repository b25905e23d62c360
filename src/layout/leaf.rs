use std::fmt;

use crate::{
    dispatch::pointer::ClickEvent,
    foundation::{core::Point, error::SceneResult},
    layout::text_flow::{ClickHandler, HoverHandler, StyledText},
    render::surface::Surface,
    scene::{
        context::SceneContext,
        node::{NodeFrame, NodeId},
        widget::Behavior,
    },
};

/// One positioned run of text, produced by a [`crate::TextBox`] layout pass.
///
/// Leaves are rebuilt on every pass; their identity is not stable.
#[derive(Clone)]
pub struct TextLeaf {
    pub(crate) style: StyledText,
    pub(crate) ascent: f64,
    pub(crate) on_click: Option<ClickHandler>,
    pub(crate) on_hover: Option<HoverHandler>,
}

impl fmt::Debug for TextLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextLeaf")
            .field("style", &self.style)
            .field("ascent", &self.ascent)
            .field("on_click", &self.on_click.is_some())
            .field("on_hover", &self.on_hover.is_some())
            .finish()
    }
}

impl TextLeaf {
    /// Text, font and color of this leaf.
    pub fn style(&self) -> &StyledText {
        &self.style
    }

    /// Displayed string.
    pub fn text(&self) -> &str {
        &self.style.text
    }

    /// Whether a click handler was copied onto this leaf.
    pub fn has_click_handler(&self) -> bool {
        self.on_click.is_some()
    }
}

impl Behavior for TextLeaf {
    fn render(&self, frame: &NodeFrame, surface: &mut dyn Surface) -> SceneResult<()> {
        surface.set_font(&self.style.font)?;
        surface.set_fill(self.style.color);
        surface.fill_text(
            &self.style.text,
            Point::new(frame.x, frame.y + self.ascent),
        )
    }

    fn click(&mut self, _scene: &mut SceneContext, _id: NodeId, event: &ClickEvent) {
        if let Some(handler) = &self.on_click {
            handler(event);
        }
    }

    fn hover(&mut self, _scene: &mut SceneContext, _id: NodeId) {
        if let Some(handler) = &self.on_hover {
            handler();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/leaf.rs"]
mod tests;
