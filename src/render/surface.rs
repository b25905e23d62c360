use kurbo::{Circle, Shape, Size};

use crate::foundation::{
    core::{BezPath, Color, Font, Point, Rect},
    error::SceneResult,
};

/// Extent of a piece of text under a font, as reported by a [`Surface`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// Horizontal advance.
    pub width: f64,
    /// Distance from the baseline to the top of the tallest glyph.
    pub ascent: f64,
    /// Distance from the baseline to the bottom of the lowest glyph.
    pub descent: f64,
}

impl TextMetrics {
    /// Total vertical extent.
    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// Immediate-mode drawing target the scene renders into and measures text with.
///
/// The scene graph only ever talks to this contract. State setters (`set_fill`, `set_font`, ...)
/// persist until changed, like a 2D canvas context.
pub trait Surface {
    /// Drawable area in surface units.
    fn size(&self) -> Size;

    /// Reset `rect` to the surface background.
    fn clear(&mut self, rect: Rect);

    /// Set the paint used by [`Surface::fill_path`] and [`Surface::fill_text`].
    fn set_fill(&mut self, color: Color);

    /// Set the paint used by [`Surface::stroke_path`].
    fn set_stroke(&mut self, color: Color);

    /// Set the stroke width.
    fn set_line_width(&mut self, width: f64);

    /// Current stroke width.
    fn line_width(&self) -> f64;

    /// Select the font used for text drawing and measurement.
    fn set_font(&mut self, font: &Font) -> SceneResult<()>;

    /// Fill a closed path with the fill paint.
    fn fill_path(&mut self, path: &BezPath);

    /// Stroke a path with the stroke paint and width.
    fn stroke_path(&mut self, path: &BezPath);

    /// Draw `text` with its baseline starting at `baseline`.
    ///
    /// Fails with [`crate::SceneError::Layout`] when no font has been selected.
    fn fill_text(&mut self, text: &str, baseline: Point) -> SceneResult<()>;

    /// Measure `text` under the current font.
    ///
    /// Fails with [`crate::SceneError::Layout`] when no font has been selected; there is no
    /// fallback measurement.
    fn measure_text(&mut self, text: &str) -> SceneResult<TextMetrics>;

    /// Finish the current frame.
    fn present(&mut self) -> SceneResult<()> {
        Ok(())
    }
}

/// Stroke the outline of an axis-aligned rect.
pub fn stroke_rect(surface: &mut dyn Surface, rect: Rect) {
    surface.stroke_path(&rect.to_path(0.1));
}

/// Fill a circle.
pub fn fill_circle(surface: &mut dyn Surface, center: Point, radius: f64) {
    surface.fill_path(&Circle::new(center, radius).to_path(0.1));
}

/// Stroke a sequence of disconnected polylines as a single path.
pub fn stroke_polylines(surface: &mut dyn Surface, lines: &[&[Point]]) {
    let mut path = BezPath::new();
    for line in lines {
        let Some((first, rest)) = line.split_first() else {
            continue;
        };
        path.move_to(*first);
        for &p in rest {
            path.line_to(p);
        }
    }
    surface.stroke_path(&path);
}
