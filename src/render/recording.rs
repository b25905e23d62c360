use kurbo::Size;

use crate::{
    foundation::{
        core::{BezPath, Color, Font, Point, Rect},
        error::{SceneError, SceneResult},
    },
    render::surface::{Surface, TextMetrics},
};

/// Horizontal advance per character, as a fraction of the font size.
const ADVANCE_EM: f64 = 0.6;
/// Ascent as a fraction of the font size.
const ASCENT_EM: f64 = 0.8;
/// Descent as a fraction of the font size.
const DESCENT_EM: f64 = 0.2;

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// Region reset to background.
    Clear(Rect),
    /// Filled path.
    FillPath {
        /// Path geometry.
        path: BezPath,
        /// Fill paint at the time of the call.
        color: Color,
    },
    /// Stroked path.
    StrokePath {
        /// Path geometry.
        path: BezPath,
        /// Stroke paint at the time of the call.
        color: Color,
        /// Stroke width at the time of the call.
        width: f64,
    },
    /// Baseline text.
    FillText {
        /// Drawn string.
        text: String,
        /// Baseline start.
        baseline: Point,
        /// Font at the time of the call.
        font: Font,
        /// Fill paint at the time of the call.
        color: Color,
    },
    /// End of frame.
    Present,
}

/// Headless [`Surface`] that records every call and measures text with fixed monospace metrics.
///
/// A character advances `0.6em`; ascent and descent are `0.8em` and `0.2em`, so a line of text is
/// exactly one font size tall.
#[derive(Debug)]
pub struct RecordingSurface {
    size: Size,
    fill: Color,
    stroke: Color,
    line_width: f64,
    font: Option<Font>,
    commands: Vec<DrawCmd>,
    frames: u64,
}

impl RecordingSurface {
    /// New surface of the given size with no font selected.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            fill: Color::BLACK,
            stroke: Color::BLACK,
            line_width: 1.0,
            font: None,
            commands: Vec::new(),
            frames: 0,
        }
    }

    /// Measure without touching surface state.
    pub fn metrics_for(text: &str, font: &Font) -> TextMetrics {
        let size = f64::from(font.size_px);
        TextMetrics {
            width: text.chars().count() as f64 * size * ADVANCE_EM,
            ascent: size * ASCENT_EM,
            descent: size * DESCENT_EM,
        }
    }

    /// Calls recorded since the last [`RecordingSurface::take_commands`].
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Drain recorded calls.
    pub fn take_commands(&mut self) -> Vec<DrawCmd> {
        std::mem::take(&mut self.commands)
    }

    /// Strings drawn since the last drain, in call order.
    pub fn drawn_text(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of frames presented so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    fn current_font(&self) -> SceneResult<&Font> {
        self.font
            .as_ref()
            .ok_or_else(|| SceneError::layout("no font selected on the drawing surface"))
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, rect: Rect) {
        self.commands.push(DrawCmd::Clear(rect));
    }

    fn set_fill(&mut self, color: Color) {
        self.fill = color;
    }

    fn set_stroke(&mut self, color: Color) {
        self.stroke = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn line_width(&self) -> f64 {
        self.line_width
    }

    fn set_font(&mut self, font: &Font) -> SceneResult<()> {
        self.font = Some(font.clone());
        Ok(())
    }

    fn fill_path(&mut self, path: &BezPath) {
        self.commands.push(DrawCmd::FillPath {
            path: path.clone(),
            color: self.fill,
        });
    }

    fn stroke_path(&mut self, path: &BezPath) {
        self.commands.push(DrawCmd::StrokePath {
            path: path.clone(),
            color: self.stroke,
            width: self.line_width,
        });
    }

    fn fill_text(&mut self, text: &str, baseline: Point) -> SceneResult<()> {
        let font = self.current_font()?.clone();
        self.commands.push(DrawCmd::FillText {
            text: text.to_owned(),
            baseline,
            font,
            color: self.fill,
        });
        Ok(())
    }

    fn measure_text(&mut self, text: &str) -> SceneResult<TextMetrics> {
        Ok(Self::metrics_for(text, self.current_font()?))
    }

    fn present(&mut self) -> SceneResult<()> {
        self.commands.push(DrawCmd::Present);
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
