use super::*;
use crate::{
    foundation::core::{Color, Font},
    render::recording::{DrawCmd, RecordingSurface},
};

#[test]
fn text_is_drawn_on_the_baseline() {
    let font = Font::new(10.0, "mono").unwrap();
    let leaf = TextLeaf {
        style: StyledText::new("ok", font.clone(), Color::BLUE),
        ascent: 8.0,
        on_click: None,
        on_hover: None,
    };
    let mut surface = RecordingSurface::new(50.0, 50.0);
    leaf.render(&NodeFrame::new(3.0, 4.0, 12.0, 10.0), &mut surface)
        .unwrap();
    assert_eq!(
        surface.commands(),
        &[DrawCmd::FillText {
            text: "ok".to_owned(),
            baseline: Point::new(3.0, 12.0),
            font,
            color: Color::BLUE,
        }]
    );
}

#[test]
fn hover_handler_runs_but_nothing_dispatches_it() {
    use std::{cell::Cell, rc::Rc};

    let hovered = Rc::new(Cell::new(false));
    let flag = Rc::clone(&hovered);
    let mut leaf = TextLeaf {
        style: StyledText::new("h", Font::new(10.0, "mono").unwrap(), Color::BLACK),
        ascent: 8.0,
        on_click: None,
        on_hover: Some(Rc::new(move || flag.set(true))),
    };
    let mut scene = SceneContext::new();
    let id = scene.create(
        NodeFrame::new(0.0, 0.0, 6.0, 10.0),
        crate::scene::node::Scope::Global,
        crate::scene::widget::Widget::default(),
    );
    leaf.hover(&mut scene, id);
    assert!(hovered.get());
}
