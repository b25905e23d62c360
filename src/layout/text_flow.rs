//! Text flow layout: ordered runs and line breaks become positioned [`TextLeaf`] nodes.
//!
//! A layout pass has two halves. [`TextBox::measure_runs`] resolves and measures every run into
//! [`FlowMetrics`] without touching the scene; [`TextBox::rebuild_leaves`] then replaces the box's
//! leaf children with fresh ones placed from those metrics. Leaves are recreated on every pass.

use std::{fmt, rc::Rc};

use crate::{
    dispatch::pointer::ClickEvent,
    foundation::{
        core::{Color, Font, Point},
        error::{SceneError, SceneResult},
    },
    layout::leaf::TextLeaf,
    render::surface::{Surface, TextMetrics},
    scene::{
        context::SceneContext,
        node::{NodeFrame, NodeId, Scope},
        widget::{Behavior, Widget},
    },
};

/// Handler invoked with the click payload when a leaf is the topmost hit.
pub type ClickHandler = Rc<dyn Fn(&ClickEvent)>;
/// Handler invoked on hover.
pub type HoverHandler = Rc<dyn Fn()>;
/// Zero-argument producer resolved at layout time.
pub type TextProducer = Rc<dyn Fn() -> anyhow::Result<StyledText>>;

/// Text together with the font and color it is drawn with.
#[derive(Clone, Debug, PartialEq)]
pub struct StyledText {
    /// Displayed string.
    pub text: String,
    /// Font used to measure and draw.
    pub font: Font,
    /// Fill color.
    pub color: Color,
}

impl StyledText {
    /// Bundle text with its style.
    pub fn new(text: impl Into<String>, font: Font, color: Color) -> Self {
        Self {
            text: text.into(),
            font,
            color,
        }
    }
}

/// Literal text run.
#[derive(Clone)]
pub struct TextRun {
    /// Text and style.
    pub style: StyledText,
    /// Copied onto the leaf built from this run.
    pub on_click: Option<ClickHandler>,
    /// Copied onto the leaf built from this run.
    pub on_hover: Option<HoverHandler>,
}

/// Run whose text and style come from a producer called on every layout pass.
#[derive(Clone)]
pub struct DynamicRun {
    /// Called once per pass; errors abort the pass.
    pub producer: TextProducer,
    /// Copied onto the leaf built from this run.
    pub on_click: Option<ClickHandler>,
    /// Copied onto the leaf built from this run.
    pub on_hover: Option<HoverHandler>,
}

/// One unit of text-flow input.
#[derive(Clone)]
pub enum RunSpec {
    /// Literal text.
    Text(TextRun),
    /// Text resolved at layout time.
    Dynamic(DynamicRun),
    /// Ends the current line; `margin` is added below the line it closes.
    Break {
        /// Extra space below the closed line.
        margin: f64,
    },
}

impl fmt::Debug for RunSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(r) => f
                .debug_struct("Text")
                .field("style", &r.style)
                .field("on_click", &r.on_click.is_some())
                .field("on_hover", &r.on_hover.is_some())
                .finish(),
            Self::Dynamic(r) => f
                .debug_struct("Dynamic")
                .field("on_click", &r.on_click.is_some())
                .field("on_hover", &r.on_hover.is_some())
                .finish_non_exhaustive(),
            Self::Break { margin } => f.debug_struct("Break").field("margin", margin).finish(),
        }
    }
}

impl RunSpec {
    /// Literal run.
    pub fn text(text: impl Into<String>, font: Font, color: Color) -> Self {
        Self::Text(TextRun {
            style: StyledText::new(text, font, color),
            on_click: None,
            on_hover: None,
        })
    }

    /// Dynamic run.
    pub fn dynamic(producer: impl Fn() -> anyhow::Result<StyledText> + 'static) -> Self {
        Self::Dynamic(DynamicRun {
            producer: Rc::new(producer),
            on_click: None,
            on_hover: None,
        })
    }

    /// Line break with a trailing margin.
    pub fn line_break(margin: f64) -> Self {
        Self::Break { margin }
    }

    /// Attach a click handler. No effect on breaks.
    pub fn on_click(mut self, handler: impl Fn(&ClickEvent) + 'static) -> Self {
        match &mut self {
            Self::Text(r) => r.on_click = Some(Rc::new(handler)),
            Self::Dynamic(r) => r.on_click = Some(Rc::new(handler)),
            Self::Break { .. } => {}
        }
        self
    }

    /// Attach a hover handler. No effect on breaks.
    pub fn on_hover(mut self, handler: impl Fn() + 'static) -> Self {
        match &mut self {
            Self::Text(r) => r.on_hover = Some(Rc::new(handler)),
            Self::Dynamic(r) => r.on_hover = Some(Rc::new(handler)),
            Self::Break { .. } => {}
        }
        self
    }
}

/// Measured extent of one laid out line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineMetrics {
    /// Sum of run widths.
    pub width: f64,
    /// Tallest run on the line.
    pub content_height: f64,
    /// Margin of the break that closed the line (or of the trailing break).
    pub margin: f64,
}

impl LineMetrics {
    /// Content height plus margin.
    pub fn height(&self) -> f64 {
        self.content_height + self.margin
    }
}

/// A text run after resolution and measurement.
#[derive(Clone)]
pub(crate) struct MeasuredRun {
    pub(crate) style: StyledText,
    pub(crate) metrics: TextMetrics,
    pub(crate) line: usize,
    pub(crate) on_click: Option<ClickHandler>,
    pub(crate) on_hover: Option<HoverHandler>,
}

/// Result of measuring a run list.
#[derive(Clone)]
pub struct FlowMetrics {
    /// Per-line metrics; never empty.
    pub lines: Vec<LineMetrics>,
    /// Box width including margins.
    pub width: f64,
    /// Box height including margins.
    pub height: f64,
    pub(crate) runs: Vec<MeasuredRun>,
}

impl fmt::Debug for FlowMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowMetrics")
            .field("lines", &self.lines)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("runs", &self.runs.len())
            .finish()
    }
}

/// Text flow container. Its node's size follows the laid out content.
#[derive(Clone, Default)]
pub struct TextBox {
    margin: f64,
    runs: Vec<RunSpec>,
    lines: Vec<LineMetrics>,
    on_click: Option<ClickHandler>,
}

impl fmt::Debug for TextBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBox")
            .field("margin", &self.margin)
            .field("runs", &self.runs)
            .field("lines", &self.lines)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

impl TextBox {
    /// Empty box with a uniform margin.
    pub fn new(margin: f64) -> Self {
        Self {
            margin,
            runs: Vec::new(),
            lines: vec![LineMetrics::default()],
            on_click: None,
        }
    }

    /// Handler for clicks that land on the box itself rather than on one of its leaves
    /// (margins, line gaps).
    pub fn with_on_click(mut self, handler: impl Fn(&ClickEvent) + 'static) -> Self {
        self.on_click = Some(Rc::new(handler));
        self
    }

    /// Replace the run list (builder form).
    pub fn with_runs(mut self, runs: Vec<RunSpec>) -> Self {
        self.runs = runs;
        self
    }

    /// Append a run.
    pub fn push(&mut self, run: RunSpec) {
        self.runs.push(run);
    }

    /// Replace the run list; takes effect on the next layout pass.
    pub fn set_runs(&mut self, runs: Vec<RunSpec>) {
        self.runs = runs;
    }

    /// Current runs.
    pub fn runs(&self) -> &[RunSpec] {
        &self.runs
    }

    /// Uniform margin around the content.
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Lines from the last layout pass.
    pub fn lines(&self) -> &[LineMetrics] {
        &self.lines
    }

    /// Line heights (content plus margin) from the last layout pass.
    pub fn line_heights(&self) -> Vec<f64> {
        self.lines.iter().map(LineMetrics::height).collect()
    }

    /// Line widths from the last layout pass.
    pub fn line_widths(&self) -> Vec<f64> {
        self.lines.iter().map(|l| l.width).collect()
    }

    /// Create a globally registered text box node.
    pub fn spawn(scene: &mut SceneContext, origin: Point, text_box: Self, scope: Scope) -> NodeId {
        let side = 2.0 * text_box.margin;
        scene.create(
            NodeFrame::new(origin.x, origin.y, side, side),
            scope,
            Widget::TextBox(text_box),
        )
    }

    /// Create a text box owned by `parent`.
    pub fn spawn_child(
        scene: &mut SceneContext,
        parent: NodeId,
        origin: Point,
        text_box: Self,
        scope: Scope,
    ) -> NodeId {
        let side = 2.0 * text_box.margin;
        scene.create_child(
            parent,
            NodeFrame::new(origin.x, origin.y, side, side),
            scope,
            Widget::TextBox(text_box),
        )
    }

    /// Resolve dynamic runs and measure every run, accumulating line metrics.
    ///
    /// A break only closes its line once more text follows, so the margin of a trailing break
    /// lands on the last line and adjacent breaks keep the last margin instead of adding up.
    pub fn measure_runs(&self, surface: &mut dyn Surface) -> SceneResult<FlowMetrics> {
        let mut lines = vec![LineMetrics::default()];
        let mut runs = Vec::new();
        let mut pending_margin = 0.0;
        let mut break_pending = false;

        for run in &self.runs {
            let (style, on_click, on_hover) = match run {
                RunSpec::Break { margin } => {
                    pending_margin = *margin;
                    break_pending = true;
                    continue;
                }
                RunSpec::Text(r) => (r.style.clone(), r.on_click.clone(), r.on_hover.clone()),
                RunSpec::Dynamic(r) => (
                    (r.producer)().map_err(SceneError::Producer)?,
                    r.on_click.clone(),
                    r.on_hover.clone(),
                ),
            };

            if break_pending {
                if let Some(line) = lines.last_mut() {
                    line.margin = pending_margin;
                }
                lines.push(LineMetrics::default());
                pending_margin = 0.0;
                break_pending = false;
            }

            surface.set_font(&style.font)?;
            let metrics = surface.measure_text(&style.text)?;
            let line_idx = lines.len() - 1;
            let line = &mut lines[line_idx];
            line.width += metrics.width;
            line.content_height = line.content_height.max(metrics.height());

            runs.push(MeasuredRun {
                style,
                metrics,
                line: line_idx,
                on_click,
                on_hover,
            });
        }

        if let Some(line) = lines.last_mut() {
            line.margin = pending_margin;
        }

        let width = lines.iter().map(|l| l.width).fold(0.0, f64::max) + 2.0 * self.margin;
        let height = lines.iter().map(LineMetrics::height).sum::<f64>() + 2.0 * self.margin;
        Ok(FlowMetrics {
            lines,
            width,
            height,
            runs,
        })
    }

    /// Replace the text leaves of `id` with new ones placed from `flow`.
    ///
    /// Runs sit on the bottom of their line's content area. Non-leaf children are left alone.
    pub fn rebuild_leaves(&self, scene: &mut SceneContext, id: NodeId, flow: &FlowMetrics) {
        let Some(frame) = scene.frame(id) else {
            return;
        };
        let stale: Vec<NodeId> = scene
            .children(id)
            .iter()
            .copied()
            .filter(|c| {
                scene
                    .get(*c)
                    .is_some_and(|n| n.widget().as_text_leaf().is_some())
            })
            .collect();
        for leaf in stale {
            scene.destroy(leaf);
        }

        let mut line_top = 0.0;
        let mut current_line = 0;
        let mut cum_w = 0.0;
        for run in &flow.runs {
            while current_line < run.line {
                line_top += flow.lines[current_line].height();
                current_line += 1;
                cum_w = 0.0;
            }
            let cum_h = line_top + flow.lines[current_line].content_height;
            let run_h = run.metrics.height();
            let leaf_frame = NodeFrame::new(
                frame.x + self.margin + cum_w,
                frame.y + self.margin + (cum_h - run_h),
                run.metrics.width,
                run_h,
            );
            scene.create_child(
                id,
                leaf_frame,
                Scope::Owned,
                Widget::TextLeaf(TextLeaf {
                    style: run.style.clone(),
                    ascent: run.metrics.ascent,
                    on_click: run.on_click.clone(),
                    on_hover: run.on_hover.clone(),
                }),
            );
            cum_w += run.metrics.width;
        }
    }

    /// Full layout pass for the node `id`: measure, resize the node, rebuild leaves.
    pub fn layout(
        &mut self,
        scene: &mut SceneContext,
        id: NodeId,
        surface: &mut dyn Surface,
    ) -> SceneResult<()> {
        let flow = self.measure_runs(surface)?;
        let Some(mut frame) = scene.frame(id) else {
            return Ok(());
        };
        frame.w = flow.width;
        frame.h = flow.height;
        scene.set_frame(id, frame);
        self.rebuild_leaves(scene, id, &flow);
        self.lines = flow.lines;
        Ok(())
    }
}

impl Behavior for TextBox {
    fn logic(
        &mut self,
        scene: &mut SceneContext,
        id: NodeId,
        surface: &mut dyn Surface,
    ) -> SceneResult<()> {
        self.layout(scene, id, surface)
    }

    fn click(&mut self, _scene: &mut SceneContext, _id: NodeId, event: &ClickEvent) {
        if let Some(handler) = &self.on_click {
            handler(event);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text_flow.rs"]
mod tests;
