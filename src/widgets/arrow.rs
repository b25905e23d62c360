//! Directed connector between two points, labelled with a transfer count.
//!
//! The node frame is the shaft's bounding box in the shaft's own rotated space: it starts at
//! `from`, extends `|to - from|` along the shaft and is centred on it across, so hit testing
//! follows the drawn arrow at any angle.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_6};

use crate::{
    dispatch::pointer::ClickEvent,
    foundation::{
        core::{Color, Point},
        error::SceneResult,
        geometry::polar,
    },
    render::surface::{Surface, stroke_polylines},
    scene::{
        context::SceneContext,
        node::{NodeFrame, NodeId, Scope},
        widget::{Behavior, Widget},
    },
    widgets::label::{LabelStyle, spawn_label, toggle_label},
};

/// Stroke settings for an arrow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width of shaft and head.
    pub line_width: f64,
    /// Length of each head stroke.
    pub head_len: f64,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            line_width: 1.0,
            head_len: 10.0,
        }
    }
}

/// Arrow widget.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrow {
    count: u64,
    style: ArrowStyle,
    label: Option<NodeId>,
}

/// Frame whose origin-side edge centre is `from` and whose long axis points at `to`.
pub fn arrow_frame(from: Point, to: Point, thickness: f64) -> NodeFrame {
    let d = to - from;
    let angle = d.y.atan2(d.x);
    let origin = from + polar(thickness / 2.0, angle - FRAC_PI_2);
    NodeFrame::new(origin.x, origin.y, d.hypot(), thickness).with_rotation(angle)
}

/// Shaft and the two head strokes, as polylines.
pub fn arrow_polylines(from: Point, to: Point, head_len: f64) -> [[Point; 2]; 3] {
    let d = to - from;
    let angle = d.y.atan2(d.x);
    [
        [from, to],
        [to, to - polar(head_len, angle - FRAC_PI_6)],
        [to, to - polar(head_len, angle + FRAC_PI_6)],
    ]
}

/// Move both endpoints `inset` towards each other, e.g. to stop at a marker's rim.
///
/// Segments shorter than `2 * inset` collapse onto their midpoint.
pub fn trim_endpoints(from: Point, to: Point, inset: f64) -> (Point, Point) {
    let d = to - from;
    let len = d.hypot();
    if len <= 2.0 * inset {
        let mid = from.midpoint(to);
        return (mid, mid);
    }
    let step = d * (inset / len);
    (from + step, to - step)
}

/// Stroke width for a transfer count relative to the largest count in the data.
pub fn width_for_count(count: u64, max_count: u64, max_width: f64) -> f64 {
    if max_count == 0 || max_width <= 1.0 {
        return 1.0;
    }
    let ratio = (count.min(max_count)) as f64 / max_count as f64;
    1.0 + (max_width - 1.0) * ratio
}

impl Arrow {
    /// Create an arrow from `from` to `to` with a count label at its midpoint.
    pub fn spawn(
        scene: &mut SceneContext,
        from: Point,
        to: Point,
        count: u64,
        style: ArrowStyle,
        label: &LabelStyle,
        scope: Scope,
    ) -> NodeId {
        let frame = arrow_frame(from, to, style.head_len);
        let id = scene.create(
            frame,
            scope,
            Widget::Arrow(Self {
                count,
                style,
                label: None,
            }),
        );
        let label_id = spawn_label(scene, id, from.midpoint(to), &count.to_string(), label);
        if let Some(Widget::Arrow(arrow)) = scene.get_mut(id).map(|n| n.widget_mut()) {
            arrow.label = Some(label_id);
        }
        tracing::debug!(%id, count, "spawn arrow");
        id
    }

    /// Transfer count the arrow stands for.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Stroke settings, after count scaling.
    pub fn style(&self) -> &ArrowStyle {
        &self.style
    }

    /// Count label, if one was spawned.
    pub fn label(&self) -> Option<NodeId> {
        self.label
    }

    /// Endpoints recovered from a frame built by [`arrow_frame`].
    pub fn endpoints(frame: &NodeFrame) -> (Point, Point) {
        let from = frame.origin() + polar(frame.h / 2.0, frame.rotation + FRAC_PI_2);
        (from, from + polar(frame.w, frame.rotation))
    }
}

impl Behavior for Arrow {
    fn render(&self, frame: &NodeFrame, surface: &mut dyn Surface) -> SceneResult<()> {
        let (from, to) = Self::endpoints(frame);
        let lines = arrow_polylines(from, to, self.style.head_len);
        let old_width = surface.line_width();
        surface.set_stroke(self.style.color);
        surface.set_line_width(self.style.line_width);
        stroke_polylines(surface, &[&lines[0], &lines[1], &lines[2]]);
        surface.set_line_width(old_width);
        Ok(())
    }

    fn click(&mut self, scene: &mut SceneContext, id: NodeId, _event: &ClickEvent) {
        toggle_label(scene, id, self.label);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/arrow.rs"]
mod tests;
