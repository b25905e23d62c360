use super::*;
use crate::{
    dispatch::pointer::dispatch_click,
    foundation::core::Font,
    render::recording::{DrawCmd, RecordingSurface},
};

fn label_style() -> LabelStyle {
    LabelStyle::new(Font::new(12.0, "mono").unwrap())
}

fn library_of(scene: &SceneContext, id: NodeId) -> &Library {
    match scene.get(id).unwrap().widget() {
        Widget::Library(lib) => lib,
        other => panic!("expected a library, got {}", other.kind()),
    }
}

#[test]
fn spawn_centres_the_marker_and_places_the_label() {
    let mut scene = SceneContext::new();
    let id = Library::spawn(
        &mut scene,
        Point::new(100.0, 50.0),
        10.0,
        "serde",
        &label_style(),
        Scope::Global,
    );
    let frame = scene.frame(id).unwrap();
    assert_eq!((frame.x, frame.y, frame.w, frame.h), (90.0, 40.0, 20.0, 20.0));

    let lib = library_of(&scene, id);
    assert_eq!(lib.name(), "serde");
    let label = lib.label().unwrap();
    assert_eq!(scene.children(id), &[label]);
    assert!(!scene.is_registered(label));
    let label_frame = scene.frame(label).unwrap();
    assert_eq!((label_frame.x, label_frame.y), (114.0, 40.0));
}

#[test]
fn label_scope_is_explicit() {
    let mut scene = SceneContext::new();
    let style = label_style().with_scope(Scope::Global);
    let id = Library::spawn(
        &mut scene,
        Point::new(0.0, 0.0),
        5.0,
        "a",
        &style,
        Scope::Global,
    );
    let label = library_of(&scene, id).label().unwrap();
    assert!(scene.is_registered(label));
    scene.destroy(id);
    assert!(!scene.is_alive(label));
    assert!(scene.registry().is_empty());
}

#[test]
fn click_toggles_the_label() {
    let mut scene = SceneContext::new();
    let id = Library::spawn(
        &mut scene,
        Point::new(50.0, 50.0),
        10.0,
        "tokio",
        &label_style(),
        Scope::Global,
    );
    let label = library_of(&scene, id).label().unwrap();

    assert_eq!(
        dispatch_click(&mut scene, Point::new(50.0, 50.0), &ClickEvent::default()),
        Some(id)
    );
    assert!(!scene.is_enabled(label));
    dispatch_click(&mut scene, Point::new(50.0, 50.0), &ClickEvent::default());
    assert!(scene.is_enabled(label));
}

#[test]
fn hidden_labels_start_disabled() {
    let mut scene = SceneContext::new();
    let id = Library::spawn(
        &mut scene,
        Point::new(0.0, 0.0),
        5.0,
        "a",
        &label_style().with_visible(false),
        Scope::Global,
    );
    let label = library_of(&scene, id).label().unwrap();
    assert!(!scene.is_enabled(label));
}

#[test]
fn renders_a_filled_circle() {
    let mut scene = SceneContext::new();
    let mut surface = RecordingSurface::new(100.0, 100.0);
    let id = Library::spawn(
        &mut scene,
        Point::new(30.0, 30.0),
        10.0,
        "a",
        &label_style(),
        Scope::Global,
    );
    scene.render(id, &mut surface).unwrap();
    let [DrawCmd::FillPath { path, color }] = surface.commands() else {
        panic!("expected one fill, got {:?}", surface.commands());
    };
    assert_eq!(*color, Color::BLACK);
    let bbox = kurbo::Shape::bounding_box(path);
    assert!((bbox.x0 - 20.0).abs() < 0.2 && (bbox.x1 - 40.0).abs() < 0.2);
}
