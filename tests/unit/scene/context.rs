use super::*;
use crate::scene::node::Scope;

fn plain(scene: &mut SceneContext, x: f64, y: f64) -> NodeId {
    scene.create(
        NodeFrame::new(x, y, 10.0, 10.0),
        Scope::Global,
        Widget::default(),
    )
}

#[test]
fn ids_are_monotonic_from_one() {
    let mut scene = SceneContext::new();
    let a = plain(&mut scene, 0.0, 0.0);
    let b = plain(&mut scene, 0.0, 0.0);
    assert_eq!(a.get(), 1);
    assert_eq!(b.get(), 2);
    scene.destroy(b);
    let c = plain(&mut scene, 0.0, 0.0);
    assert_eq!(c.get(), 3);
}

#[test]
fn destroy_middle_keeps_registry_order() {
    let mut scene = SceneContext::new();
    let a = plain(&mut scene, 0.0, 0.0);
    let b = plain(&mut scene, 0.0, 0.0);
    let c = plain(&mut scene, 0.0, 0.0);
    scene.destroy(b);
    assert_eq!(scene.registry(), vec![a, c]);
    assert!(!scene.is_alive(b));
}

#[test]
fn destroying_unknown_ids_is_a_no_op() {
    let mut scene = SceneContext::new();
    let a = plain(&mut scene, 0.0, 0.0);
    scene.destroy(a);
    scene.destroy(a);
    scene.destroy(NodeId(999));
    assert!(scene.is_empty());
}

#[test]
fn owned_children_are_not_registered_and_die_with_parent() {
    let mut scene = SceneContext::new();
    let parent = plain(&mut scene, 0.0, 0.0);
    let child = scene.create_child(
        parent,
        NodeFrame::new(1.0, 1.0, 2.0, 2.0),
        Scope::Owned,
        Widget::default(),
    );
    let grandchild = scene.create_child(
        child,
        NodeFrame::new(1.0, 1.0, 1.0, 1.0),
        Scope::Owned,
        Widget::default(),
    );
    assert!(!scene.is_registered(child));
    assert_eq!(scene.children(parent), &[child]);
    assert_eq!(scene.get(grandchild).and_then(|n| n.parent()), Some(child));

    scene.destroy(parent);
    assert!(!scene.is_alive(child));
    assert!(!scene.is_alive(grandchild));
    assert!(scene.is_empty());
}

#[test]
fn destroying_a_child_detaches_it_from_its_parent() {
    let mut scene = SceneContext::new();
    let parent = plain(&mut scene, 0.0, 0.0);
    let child = scene.create_child(
        parent,
        NodeFrame::default(),
        Scope::Owned,
        Widget::default(),
    );
    scene.destroy(child);
    assert!(scene.children(parent).is_empty());
}

#[test]
fn owned_child_of_missing_parent_is_dropped() {
    let mut scene = SceneContext::new();
    let orphan = scene.create_child(
        NodeId(42),
        NodeFrame::default(),
        Scope::Owned,
        Widget::default(),
    );
    assert!(!scene.is_alive(orphan));
}

#[test]
fn toggle_enabled_flips_and_reports() {
    let mut scene = SceneContext::new();
    let a = plain(&mut scene, 0.0, 0.0);
    assert_eq!(scene.toggle_enabled(a), Some(false));
    assert!(!scene.is_enabled(a));
    assert_eq!(scene.toggle_enabled(a), Some(true));
    assert_eq!(scene.toggle_enabled(NodeId(77)), None);
}

#[test]
fn contains_point_uses_open_intervals() {
    let mut scene = SceneContext::new();
    let a = plain(&mut scene, 10.0, 10.0);
    assert!(scene.contains_point(a, Point::new(15.0, 15.0)));
    assert!(!scene.contains_point(a, Point::new(10.0, 15.0)));
    assert!(!scene.contains_point(a, Point::new(20.0, 15.0)));
    assert!(!scene.contains_point(a, Point::new(15.0, 20.0)));
    scene.destroy(a);
    assert!(!scene.contains_point(a, Point::new(15.0, 15.0)));
}

#[test]
fn empty_debug_palette_falls_back_to_default() {
    let mut scene = SceneContext::new();
    scene.set_debug_palette(vec![]);
    assert_eq!(scene.debug_palette(), &DEBUG_PALETTE[..]);
    scene.set_debug_palette(vec![Color::BLACK]);
    assert_eq!(scene.debug_palette(), &[Color::BLACK]);
}
