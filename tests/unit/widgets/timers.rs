use super::*;
use crate::{
    dispatch::pointer::dispatch_click,
    frame::scheduler::FrameScheduler,
    render::recording::{DrawCmd, RecordingSurface},
};
use std::time::Duration;

fn style() -> TimersStyle {
    TimersStyle {
        font: Font::new(20.0, "mono").unwrap(),
        color: Color::BLACK,
        offset: 5.0,
    }
}

fn timers_of(scene: &SceneContext, id: NodeId) -> &Timers {
    match scene.get(id).unwrap().widget() {
        Widget::Timers(t) => t,
        other => panic!("expected timers, got {}", other.kind()),
    }
}

fn tick(scene: &mut SceneContext, surface: &mut RecordingSurface) {
    scene
        .walk_depth_first(|scene, id, _| scene.logic(id, surface))
        .unwrap();
}

#[test]
fn readout_lines_show_current_timings() {
    let mut scene = SceneContext::new();
    let mut surface = RecordingSurface::new(400.0, 300.0);
    let timings = FrameTimings::new();
    let id = Timers::spawn(&mut scene, timings, &style(), Scope::Global);
    tick(&mut scene, &mut surface);

    let readout = timers_of(&scene, id).readout();
    let texts: Vec<String> = scene
        .children(readout)
        .iter()
        .filter_map(|c| scene.get(*c)?.widget().as_text_leaf().map(|l| l.text().to_owned()))
        .collect();
    assert_eq!(texts, vec!["MSPT:  0", "MSPU:  0"]);
}

#[test]
fn readout_is_pinned_to_the_top_right() {
    let mut scene = SceneContext::new();
    let mut surface = RecordingSurface::new(400.0, 300.0);
    let id = Timers::spawn(&mut scene, FrameTimings::new(), &style(), Scope::Global);
    tick(&mut scene, &mut surface);

    let readout = timers_of(&scene, id).readout();
    let frame = scene.frame(readout).unwrap();
    // "MSPT:  0" is 8 chars at 12px.
    assert_eq!(frame.w, 96.0);
    assert_eq!(frame.x, 400.0 - 96.0 - 5.0);
    assert_eq!(frame.y, 5.0);
    assert_eq!(frame.h, 45.0);
    assert_eq!(
        scene.frame(id).unwrap(),
        NodeFrame::new(frame.x - 5.0, 0.0, 106.0, 55.0)
    );
}

#[test]
fn first_rendered_frame_shows_the_readout_on_canvas() {
    let mut scene = SceneContext::new();
    let mut surface = RecordingSurface::new(1280.0, 720.0);
    let mut scheduler = FrameScheduler::default();
    Timers::spawn(&mut scene, scheduler.timings(), &style(), Scope::Global);

    scheduler
        .logic_tick(&mut scene, &mut surface, Duration::ZERO)
        .unwrap();
    scheduler
        .render_tick(&scene, &mut surface, Duration::ZERO)
        .unwrap();

    let baselines: Vec<(String, Point)> = surface
        .commands()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCmd::FillText { text, baseline, .. } => Some((text.clone(), *baseline)),
            _ => None,
        })
        .collect();
    assert_eq!(baselines.len(), 2);
    for (text, baseline) in baselines {
        assert_eq!(baseline.x, 1280.0 - 96.0 - 5.0, "{text}");
        assert!(baseline.y > 0.0 && baseline.y < 720.0, "{text}");
    }
}

#[test]
fn clicking_a_line_is_counted() {
    let mut scene = SceneContext::new();
    let mut surface = RecordingSurface::new(400.0, 300.0);
    let id = Timers::spawn(&mut scene, FrameTimings::new(), &style(), Scope::Global);
    tick(&mut scene, &mut surface);

    let readout = timers_of(&scene, id).readout();
    let frame = scene.frame(readout).unwrap();
    let target = dispatch_click(
        &mut scene,
        Point::new(frame.x + 10.0, frame.y + 10.0),
        &ClickEvent::default(),
    )
    .unwrap();
    assert!(scene.get(target).unwrap().widget().as_text_leaf().is_some());
    assert_eq!(timers_of(&scene, id).clicks(), 1);
}

#[test]
fn clicks_in_the_gap_and_margin_are_counted() {
    let mut scene = SceneContext::new();
    let mut surface = RecordingSurface::new(400.0, 300.0);
    let id = Timers::spawn(&mut scene, FrameTimings::new(), &style(), Scope::Global);
    tick(&mut scene, &mut surface);

    let readout = timers_of(&scene, id).readout();
    let frame = scene.frame(readout).unwrap();
    // The first line spans y 5..25, the line gap 25..30.
    let gap = dispatch_click(
        &mut scene,
        Point::new(frame.x + 10.0, 27.0),
        &ClickEvent::default(),
    );
    assert_eq!(gap, Some(readout));

    let margin = dispatch_click(&mut scene, Point::new(frame.x - 2.0, 2.0), &ClickEvent::default());
    assert_eq!(margin, Some(id));
    assert_eq!(timers_of(&scene, id).clicks(), 2);
}
