use std::path::Path;

use anyhow::Context as _;
use kurbo::Size;

use crate::{
    foundation::{
        core::{BezPath, Color, Font, Point, Rect},
        error::{SceneError, SceneResult},
    },
    render::surface::{Surface, TextMetrics},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct GlyphBrush;

/// Shapes and measures text with Parley against a single font loaded from bytes.
struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<GlyphBrush>,
    family_name: String,
    font_data: vello_cpu::peniko::FontData,
}

impl TextShaper {
    fn from_font_bytes(font_bytes: Vec<u8>) -> SceneResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| SceneError::surface("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SceneError::surface("registered font family has no name"))?
            .to_string();
        tracing::debug!(family = %family_name, "loaded surface font");

        let font_data =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font_data,
        })
    }

    fn layout(&mut self, text: &str, size_px: f32) -> parley::Layout<GlyphBrush> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        let mut layout: parley::Layout<GlyphBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

/// Raster [`Surface`] backed by `vello_cpu`, measuring and drawing text through Parley.
///
/// Every font descriptor resolves to the one font the surface was created with; only the size is
/// taken from the descriptor.
pub struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    background: Color,
    fill: Color,
    stroke: Color,
    line_width: f64,
    font: Option<Font>,
    shaper: TextShaper,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("font", &self.font)
            .field("family", &self.shaper.family_name)
            .finish()
    }
}

impl CpuSurface {
    /// Create a surface and load its font from raw TTF/OTF bytes.
    pub fn new(width: u32, height: u32, font_bytes: Vec<u8>) -> SceneResult<Self> {
        let w: u16 = width
            .try_into()
            .map_err(|_| SceneError::surface("surface width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| SceneError::surface("surface height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(SceneError::surface("surface must be at least 1x1"));
        }

        Ok(Self {
            width: w,
            height: h,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            background: Color::WHITE,
            fill: Color::BLACK,
            stroke: Color::BLACK,
            line_width: 1.0,
            font: None,
            shaper: TextShaper::from_font_bytes(font_bytes)?,
        })
    }

    /// Create a surface, reading the font from a file.
    pub fn with_font_file(width: u32, height: u32, font_path: &Path) -> SceneResult<Self> {
        let bytes = std::fs::read(font_path)
            .with_context(|| format!("read font '{}'", font_path.display()))?;
        Self::new(width, height, bytes)
    }

    /// Change the color used by [`Surface::clear`].
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Pixels of the last presented frame as premultiplied RGBA8.
    pub fn rgba8(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Write the last presented frame as a PNG.
    pub fn save_png(&self, path: &Path) -> SceneResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            self.rgba8(),
            u32::from(self.width),
            u32::from(self.height),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    fn current_size_px(&self) -> SceneResult<f32> {
        self.font
            .as_ref()
            .map(|f| f.size_px)
            .ok_or_else(|| SceneError::layout("no font selected on the drawing surface"))
    }

    fn paint(&mut self, color: Color) {
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }
}

impl Surface for CpuSurface {
    fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    fn clear(&mut self, rect: Rect) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.paint(self.background);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
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
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.paint(self.fill);
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn stroke_path(&mut self, path: &BezPath) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.paint(self.stroke);
        self.ctx
            .set_stroke(vello_cpu::kurbo::Stroke::new(self.line_width));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn fill_text(&mut self, text: &str, baseline: Point) -> SceneResult<()> {
        let size_px = self.current_size_px()?;
        let layout = self.shaper.layout(text, size_px);
        let Some(first_line) = layout.lines().next() else {
            return Ok(());
        };
        let line_baseline = f64::from(first_line.metrics().baseline);

        self.ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            baseline.x,
            baseline.y - line_baseline,
        )));
        self.paint(self.fill);
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&self.shaper.font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    fn measure_text(&mut self, text: &str) -> SceneResult<TextMetrics> {
        let size_px = self.current_size_px()?;
        let layout = self.shaper.layout(text, size_px);
        let mut metrics = TextMetrics::default();
        for line in layout.lines() {
            let m = line.metrics();
            metrics.width = metrics.width.max(f64::from(m.advance));
            metrics.ascent = metrics.ascent.max(f64::from(m.ascent));
            metrics.descent = metrics.descent.max(f64::from(m.descent));
        }
        Ok(metrics)
    }

    fn present(&mut self) -> SceneResult<()> {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        self.ctx.reset();
        Ok(())
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
