use crate::{
    foundation::{core::Color, geometry},
    render::surface::Surface,
    scene::node::NodeFrame,
};

/// Outline colors for debug bounds, indexed by traversal depth (wrapping).
pub const DEBUG_PALETTE: [Color; 5] = [
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::ORANGE,
    Color::PURPLE,
];

/// Palette color for a traversal depth.
pub fn depth_color(palette: &[Color], depth: usize) -> Color {
    if palette.is_empty() {
        return DEBUG_PALETTE[depth % DEBUG_PALETTE.len()];
    }
    palette[depth % palette.len()]
}

/// Stroke the rotated bounding outline of a node.
pub fn draw_bounds(surface: &mut dyn Surface, frame: &NodeFrame, color: Color) {
    let old_width = surface.line_width();
    surface.set_stroke(color);
    surface.set_line_width(1.0);
    surface.stroke_path(&geometry::rotated_outline(frame.rect(), frame.rotation));
    surface.set_line_width(old_width);
}

#[cfg(test)]
#[path = "../../tests/unit/render/debug.rs"]
mod tests;
