use super::*;
use crate::scene::{
    node::{NodeFrame, Scope},
    widget::Widget,
};

fn node(scene: &mut SceneContext) -> NodeId {
    scene.create(NodeFrame::default(), Scope::Global, Widget::default())
}

fn child(scene: &mut SceneContext, parent: NodeId) -> NodeId {
    scene.create_child(parent, NodeFrame::default(), Scope::Owned, Widget::default())
}

/// a(b(d), c) e
fn sample() -> (SceneContext, [NodeId; 5]) {
    let mut scene = SceneContext::new();
    let a = node(&mut scene);
    let b = child(&mut scene, a);
    let c = child(&mut scene, a);
    let d = child(&mut scene, b);
    let e = node(&mut scene);
    (scene, [a, b, c, d, e])
}

#[test]
fn depth_first_finishes_subtrees_before_siblings() {
    let (mut scene, [a, b, c, d, e]) = sample();
    let mut seen = Vec::new();
    let visited = scene
        .walk_depth_first(|_, id, depth| {
            seen.push((id, depth));
            Ok(())
        })
        .unwrap();
    assert_eq!(visited, 5);
    assert_eq!(seen, vec![(a, 0), (b, 1), (d, 2), (c, 1), (e, 0)]);
    assert_eq!(scene.depth_first_order(), seen);
}

#[test]
fn layered_visits_one_depth_at_a_time() {
    let (scene, [a, b, c, d, e]) = sample();
    assert_eq!(
        scene.layered_order(),
        vec![(a, 0), (e, 0), (b, 1), (c, 1), (d, 2)]
    );
}

#[test]
fn disabled_subtrees_are_skipped_by_both_walks() {
    let (mut scene, [a, b, c, _d, e]) = sample();
    scene.set_enabled(b, false);
    assert_eq!(scene.layered_order(), vec![(a, 0), (e, 0), (c, 1)]);
    let visited = scene.walk_depth_first(|_, _, _| Ok(())).unwrap();
    assert_eq!(visited, 3);
}

#[test]
fn children_created_during_a_visit_are_walked() {
    let mut scene = SceneContext::new();
    let root = node(&mut scene);
    let mut seen = Vec::new();
    scene
        .walk_depth_first(|scene, id, depth| {
            seen.push(depth);
            if id == root {
                child(scene, root);
            }
            Ok(())
        })
        .unwrap();
    assert_eq!(seen, vec![0, 1]);
}

#[test]
fn visitor_errors_abort_the_walk() {
    let (mut scene, _) = sample();
    let mut count = 0;
    let err = scene.walk_depth_first(|_, _, _| {
        count += 1;
        if count == 2 {
            return Err(crate::SceneError::layout("boom"));
        }
        Ok(())
    });
    assert!(err.is_err());
    assert_eq!(count, 2);
}

#[test]
fn destroyed_handles_are_never_visited() {
    let (mut scene, [a, b, _c, d, _e]) = sample();
    scene.destroy(b);
    let order: Vec<NodeId> = scene.layered_order().into_iter().map(|(id, _)| id).collect();
    assert!(!order.contains(&b));
    assert!(!order.contains(&d));
    assert!(order.contains(&a));
}

#[test]
fn registered_children_are_walked_once_through_their_parent() {
    let mut scene = SceneContext::new();
    let a = node(&mut scene);
    let b = scene.create_child(a, NodeFrame::default(), Scope::Global, Widget::default());
    assert!(scene.is_registered(b));
    assert_eq!(scene.roots(), vec![a]);
    assert_eq!(scene.layered_order(), vec![(a, 0), (b, 1)]);
    assert_eq!(scene.depth_first_order(), vec![(a, 0), (b, 1)]);
}
