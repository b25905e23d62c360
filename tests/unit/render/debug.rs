use super::*;
use crate::render::recording::{DrawCmd, RecordingSurface};

#[test]
fn depth_colors_wrap_around_the_palette() {
    let palette = [Color::RED, Color::BLUE];
    assert_eq!(depth_color(&palette, 0), Color::RED);
    assert_eq!(depth_color(&palette, 3), Color::BLUE);
    assert_eq!(depth_color(&[], 1), DEBUG_PALETTE[1]);
}

#[test]
fn bounds_follow_rotation_and_keep_line_width() {
    let mut surface = RecordingSurface::new(50.0, 50.0);
    surface.set_line_width(3.0);
    let frame = NodeFrame::new(10.0, 10.0, 20.0, 5.0).with_rotation(std::f64::consts::FRAC_PI_2);
    draw_bounds(&mut surface, &frame, Color::GREEN);

    let [DrawCmd::StrokePath { path, color, width }] = surface.commands() else {
        panic!("expected one stroke, got {:?}", surface.commands());
    };
    assert_eq!(*color, Color::GREEN);
    assert_eq!(*width, 1.0);
    assert_eq!(surface.line_width(), 3.0);
    let bbox = kurbo::Shape::bounding_box(path);
    assert!((bbox.x0 - 5.0).abs() < 1e-9 && (bbox.x1 - 10.0).abs() < 1e-9);
    assert!((bbox.y0 - 10.0).abs() < 1e-9 && (bbox.y1 - 30.0).abs() < 1e-9);
}
