use std::cell::Cell;

use super::*;
use crate::render::recording::RecordingSurface;

fn mono(size: f32) -> Font {
    Font::new(size, "mono").unwrap()
}

fn leaves(scene: &SceneContext, id: NodeId) -> Vec<(NodeId, NodeFrame, String)> {
    scene
        .children(id)
        .iter()
        .filter_map(|c| {
            let node = scene.get(*c)?;
            let leaf = node.widget().as_text_leaf()?;
            Some((*c, *node.frame(), leaf.text().to_owned()))
        })
        .collect()
}

fn spawn(scene: &mut SceneContext, x: f64, y: f64, tb: TextBox) -> NodeId {
    TextBox::spawn(scene, Point::new(x, y), tb, Scope::Global)
}

fn run_logic(scene: &mut SceneContext, id: NodeId, surface: &mut RecordingSurface) {
    scene.logic(id, surface).unwrap();
}

fn line_heights(scene: &SceneContext, id: NodeId) -> Vec<f64> {
    scene
        .get(id)
        .and_then(|n| n.widget().as_text_box())
        .map(TextBox::line_heights)
        .unwrap()
}

#[test]
fn break_margins_attach_to_the_line_they_close() {
    let mut surface = RecordingSurface::new(200.0, 200.0);
    let mut scene = SceneContext::new();
    let tb = TextBox::new(0.0).with_runs(vec![
        RunSpec::text("A", mono(10.0), Color::BLACK),
        RunSpec::line_break(5.0),
        RunSpec::text("B", mono(20.0), Color::BLACK),
        RunSpec::line_break(2.0),
    ]);
    let id = spawn(&mut scene, 0.0, 0.0, tb);
    run_logic(&mut scene, id, &mut surface);

    assert_eq!(line_heights(&scene, id), vec![15.0, 22.0]);
    let frame = scene.frame(id).unwrap();
    assert_eq!(frame.h, 37.0);
    assert_eq!(frame.w, 12.0);
}

#[test]
fn single_run_is_inset_by_margin() {
    let mut surface = RecordingSurface::new(200.0, 200.0);
    let mut scene = SceneContext::new();
    let tb = TextBox::new(5.0).with_runs(vec![RunSpec::text("Hi", mono(10.0), Color::BLACK)]);
    let id = spawn(&mut scene, 40.0, 30.0, tb);
    run_logic(&mut scene, id, &mut surface);

    let out = leaves(&scene, id);
    assert_eq!(out.len(), 1);
    let (_, frame, text) = &out[0];
    assert_eq!(text, "Hi");
    assert_eq!((frame.x, frame.y), (45.0, 35.0));
    assert_eq!((frame.w, frame.h), (12.0, 10.0));

    let boxed = scene.frame(id).unwrap();
    assert_eq!((boxed.w, boxed.h), (22.0, 20.0));
}

#[test]
fn shorter_runs_sit_on_the_line_bottom() {
    let mut surface = RecordingSurface::new(200.0, 200.0);
    let mut scene = SceneContext::new();
    let tb = TextBox::new(0.0).with_runs(vec![
        RunSpec::text("big", mono(20.0), Color::BLACK),
        RunSpec::text("s", mono(10.0), Color::BLACK),
        RunSpec::line_break(3.0),
        RunSpec::text("next", mono(10.0), Color::BLACK),
    ]);
    let id = spawn(&mut scene, 0.0, 0.0, tb);
    run_logic(&mut scene, id, &mut surface);

    let out = leaves(&scene, id);
    assert_eq!(out.len(), 3);
    assert_eq!((out[0].1.x, out[0].1.y), (0.0, 0.0));
    assert_eq!((out[1].1.x, out[1].1.y), (36.0, 10.0));
    assert_eq!((out[2].1.x, out[2].1.y), (0.0, 23.0));
}

#[test]
fn consecutive_breaks_keep_the_last_margin() {
    let mut surface = RecordingSurface::new(200.0, 200.0);
    let mut scene = SceneContext::new();
    let tb = TextBox::new(0.0).with_runs(vec![
        RunSpec::text("a", mono(10.0), Color::BLACK),
        RunSpec::line_break(4.0),
        RunSpec::line_break(7.0),
        RunSpec::text("b", mono(10.0), Color::BLACK),
    ]);
    let id = spawn(&mut scene, 0.0, 0.0, tb);
    run_logic(&mut scene, id, &mut surface);
    assert_eq!(line_heights(&scene, id), vec![17.0, 10.0]);
}

#[test]
fn empty_box_is_twice_the_margin() {
    let mut surface = RecordingSurface::new(200.0, 200.0);
    let mut scene = SceneContext::new();
    let id = spawn(&mut scene, 3.0, 4.0, TextBox::new(6.0));
    run_logic(&mut scene, id, &mut surface);

    let frame = scene.frame(id).unwrap();
    assert_eq!((frame.x, frame.y, frame.w, frame.h), (3.0, 4.0, 12.0, 12.0));
    assert!(leaves(&scene, id).is_empty());
}

#[test]
fn relayout_replaces_leaves_with_same_geometry() {
    let mut surface = RecordingSurface::new(200.0, 200.0);
    let mut scene = SceneContext::new();
    let tb = TextBox::new(2.0).with_runs(vec![
        RunSpec::text("one", mono(10.0), Color::BLACK),
        RunSpec::line_break(1.0),
        RunSpec::text("two", mono(10.0), Color::BLACK),
    ]);
    let id = spawn(&mut scene, 0.0, 0.0, tb);
    run_logic(&mut scene, id, &mut surface);
    let first = leaves(&scene, id);
    run_logic(&mut scene, id, &mut surface);
    let second = leaves(&scene, id);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.1, b.1);
        assert_eq!(a.2, b.2);
        assert_ne!(a.0, b.0);
        assert!(!scene.is_alive(a.0));
    }
}

#[test]
fn non_leaf_children_survive_relayout() {
    let mut surface = RecordingSurface::new(200.0, 200.0);
    let mut scene = SceneContext::new();
    let tb = TextBox::new(0.0).with_runs(vec![RunSpec::text("x", mono(10.0), Color::BLACK)]);
    let id = spawn(&mut scene, 0.0, 0.0, tb);
    let extra = scene.create_child(
        id,
        NodeFrame::new(0.0, 0.0, 1.0, 1.0),
        Scope::Owned,
        Widget::default(),
    );
    run_logic(&mut scene, id, &mut surface);
    run_logic(&mut scene, id, &mut surface);
    assert!(scene.is_alive(extra));
    assert_eq!(scene.children(id).len(), 2);
}

#[test]
fn dynamic_runs_are_resolved_every_pass() {
    let mut surface = RecordingSurface::new(200.0, 200.0);
    let mut scene = SceneContext::new();
    let calls = Rc::new(Cell::new(0u32));
    let seen = Rc::clone(&calls);
    let tb = TextBox::new(0.0).with_runs(vec![RunSpec::dynamic(move || {
        seen.set(seen.get() + 1);
        Ok(StyledText::new(
            "x".repeat(seen.get() as usize),
            mono(10.0),
            Color::BLACK,
        ))
    })]);
    let id = spawn(&mut scene, 0.0, 0.0, tb);
    run_logic(&mut scene, id, &mut surface);
    run_logic(&mut scene, id, &mut surface);

    assert_eq!(calls.get(), 2);
    assert_eq!(leaves(&scene, id)[0].2, "xx");
    assert_eq!(scene.frame(id).unwrap().w, 12.0);
}

#[test]
fn producer_errors_abort_the_pass() {
    let mut surface = RecordingSurface::new(200.0, 200.0);
    let mut scene = SceneContext::new();
    let tb = TextBox::new(0.0).with_runs(vec![RunSpec::dynamic(|| {
        Err(anyhow::anyhow!("source offline"))
    })]);
    let id = spawn(&mut scene, 0.0, 0.0, tb);
    let err = scene.logic(id, &mut surface).unwrap_err();
    assert!(matches!(err, SceneError::Producer(_)));
    assert!(scene.is_alive(id));
}

#[test]
fn handlers_are_copied_onto_leaves() {
    let mut surface = RecordingSurface::new(200.0, 200.0);
    let mut scene = SceneContext::new();
    let clicks = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&clicks);
    let tb = TextBox::new(0.0).with_runs(vec![
        RunSpec::text("tap", mono(10.0), Color::BLACK).on_click(move |_| {
            counter.set(counter.get() + 1);
        }),
        RunSpec::text("plain", mono(10.0), Color::BLACK),
    ]);
    let id = spawn(&mut scene, 0.0, 0.0, tb);
    run_logic(&mut scene, id, &mut surface);

    let out = leaves(&scene, id);
    let tap = scene.get(out[0].0).unwrap().widget().as_text_leaf().unwrap();
    assert!(tap.has_click_handler());
    let plain = scene.get(out[1].0).unwrap().widget().as_text_leaf().unwrap();
    assert!(!plain.has_click_handler());

    scene.click(out[0].0, &ClickEvent::default());
    assert_eq!(clicks.get(), 1);
}

#[test]
fn clicks_between_lines_reach_the_box_handler() {
    let mut surface = RecordingSurface::new(200.0, 200.0);
    let mut scene = SceneContext::new();
    let clicks = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&clicks);
    let tb = TextBox::new(0.0)
        .with_runs(vec![
            RunSpec::text("A", mono(10.0), Color::BLACK),
            RunSpec::line_break(5.0),
            RunSpec::text("B", mono(20.0), Color::BLACK),
        ])
        .with_on_click(move |_| counter.set(counter.get() + 1));
    let id = spawn(&mut scene, 0.0, 0.0, tb);
    run_logic(&mut scene, id, &mut surface);

    // First line ends at y=10, the second starts at y=15.
    let target = crate::dispatch::pointer::dispatch_click(
        &mut scene,
        Point::new(3.0, 12.0),
        &ClickEvent::default(),
    );
    assert_eq!(target, Some(id));
    assert_eq!(clicks.get(), 1);

    let leaf = leaves(&scene, id)[0].0;
    scene.click(leaf, &ClickEvent::default());
    assert_eq!(clicks.get(), 1);
}

#[test]
fn measure_runs_leaves_the_scene_alone() {
    let mut surface = RecordingSurface::new(200.0, 200.0);
    let tb = TextBox::new(1.0).with_runs(vec![
        RunSpec::text("ab", mono(10.0), Color::BLACK),
        RunSpec::line_break(0.0),
        RunSpec::text("abcd", mono(10.0), Color::BLACK),
    ]);
    let flow = tb.measure_runs(&mut surface).unwrap();
    assert_eq!(flow.lines.len(), 2);
    assert_eq!(flow.width, 26.0);
    assert_eq!(flow.height, 22.0);
}
