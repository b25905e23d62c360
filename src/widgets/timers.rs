use std::{cell::Cell, rc::Rc};

use crate::{
    dispatch::pointer::ClickEvent,
    foundation::{
        core::{Color, Font, Point},
        error::SceneResult,
    },
    frame::scheduler::FrameTimings,
    layout::text_flow::{RunSpec, StyledText, TextBox},
    render::surface::Surface,
    scene::{
        context::SceneContext,
        node::{NodeFrame, NodeId, Scope},
        widget::{Behavior, Widget},
    },
};

/// Look of the timing readout.
#[derive(Clone, Debug, PartialEq)]
pub struct TimersStyle {
    /// Font of both lines.
    pub font: Font,
    /// Text color.
    pub color: Color,
    /// Distance from the top-right corner, also used as the gap between the two lines.
    pub offset: f64,
}

/// Top-right readout of milliseconds per render tick (`MSPT`) and per logic tick (`MSPU`).
///
/// The node's box is the readout padded by the offset on every side. A click anywhere in it
/// logs the click payload.
#[derive(Clone, Debug)]
pub struct Timers {
    readout: NodeId,
    offset: f64,
    clicks: Rc<Cell<u64>>,
}

fn record_click(clicks: &Cell<u64>, event: &ClickEvent, area: &str) {
    clicks.set(clicks.get() + 1);
    tracing::info!(?event, area, "timers clicked");
}

impl Timers {
    /// Spawn the readout as a node of its own with the text box as an owned child.
    pub fn spawn(
        scene: &mut SceneContext,
        timings: Rc<FrameTimings>,
        style: &TimersStyle,
        scope: Scope,
    ) -> NodeId {
        let clicks = Rc::new(Cell::new(0));
        let id = scene.create(NodeFrame::default(), scope, Widget::default());

        let line = |label: &'static str, read: fn(&FrameTimings) -> f64| {
            let timings = Rc::clone(&timings);
            let font = style.font.clone();
            let color = style.color;
            let clicks = Rc::clone(&clicks);
            RunSpec::dynamic(move || {
                Ok(StyledText::new(
                    format!("{label}:{:>3.0}", read(&timings)),
                    font.clone(),
                    color,
                ))
            })
            .on_click(move |event| record_click(&clicks, event, label))
        };
        let runs = vec![
            line("MSPT", FrameTimings::ms_per_render),
            RunSpec::line_break(style.offset),
            line("MSPU", FrameTimings::ms_per_logic),
        ];
        let box_clicks = Rc::clone(&clicks);
        let readout = TextBox::spawn_child(
            scene,
            id,
            Point::ZERO,
            TextBox::new(0.0)
                .with_runs(runs)
                .with_on_click(move |event| record_click(&box_clicks, event, "readout")),
            Scope::Owned,
        );

        if let Some(node) = scene.get_mut(id) {
            *node.widget_mut() = Widget::Timers(Self {
                readout,
                offset: style.offset,
                clicks,
            });
        }
        id
    }

    /// Text box holding the two readout lines.
    pub fn readout(&self) -> NodeId {
        self.readout
    }

    /// Clicks received anywhere in the readout box.
    pub fn clicks(&self) -> u64 {
        self.clicks.get()
    }
}

impl Behavior for Timers {
    /// Lay the readout out for this tick, then pin it to the top-right corner.
    ///
    /// The readout's own visit comes after this one in the depth-first walk.
    fn logic(
        &mut self,
        scene: &mut SceneContext,
        id: NodeId,
        surface: &mut dyn Surface,
    ) -> SceneResult<()> {
        let readout = self.readout;
        scene
            .with_widget(readout, |widget, scene| match widget.as_text_box_mut() {
                Some(text_box) => text_box.layout(scene, readout, surface),
                None => Ok(()),
            })
            .unwrap_or(Ok(()))?;

        let Some(mut frame) = scene.frame(readout) else {
            return Ok(());
        };
        frame.x = surface.size().width - frame.w - self.offset;
        frame.y = self.offset;
        scene.set_frame(readout, frame);
        scene.set_frame(
            id,
            NodeFrame::new(
                frame.x - self.offset,
                0.0,
                frame.w + 2.0 * self.offset,
                frame.h + 2.0 * self.offset,
            ),
        );
        Ok(())
    }

    fn click(&mut self, _scene: &mut SceneContext, _id: NodeId, event: &ClickEvent) {
        record_click(&self.clicks, event, "margin");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/timers.rs"]
mod tests;
