use std::{f64::consts::TAU, rc::Rc};

use crate::{
    demo::{config::SceneConfig, provider::Dataset},
    foundation::{core::Point, error::SceneResult},
    frame::scheduler::FrameTimings,
    scene::{
        context::SceneContext,
        node::{NodeId, Scope},
    },
    widgets::{
        arrow::{Arrow, ArrowStyle, trim_endpoints, width_for_count},
        library::Library,
        timers::Timers,
    },
};

/// Ids of the widgets making up the demo scene.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoScene {
    /// Timing readout.
    pub timers: NodeId,
    /// In dataset order.
    pub libraries: Vec<NodeId>,
    /// In dataset order.
    pub arrows: Vec<NodeId>,
}

/// `n` points on a circle, starting on the left and turning clockwise on a Y-down surface.
pub fn ring_positions(n: usize, center: Point, radius: f64) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let a = TAU * i as f64 / n as f64;
            Point::new(center.x - radius * a.cos(), center.y - radius * a.sin())
        })
        .collect()
}

/// Populate `scene` with the timing readout, one marker per library on a ring of radius
/// `height / 3` around the surface centre, and one arrow per transfer.
#[tracing::instrument(level = "debug", skip_all, fields(libraries = data.libraries.len()))]
pub fn build_scene(
    scene: &mut SceneContext,
    cfg: &SceneConfig,
    data: &Dataset,
    timings: Rc<FrameTimings>,
) -> SceneResult<DemoScene> {
    data.validate()?;
    scene.set_debug_bounds(cfg.debug_bounds);
    scene.set_debug_palette(cfg.debug_palette.clone());

    let timers = Timers::spawn(scene, timings, &cfg.timers_style(), Scope::Global);

    let (w, h) = (f64::from(cfg.width), f64::from(cfg.height));
    let centers = ring_positions(data.libraries.len(), Point::new(w / 2.0, h / 2.0), h / 3.0);
    let label = cfg.label_style();
    let libraries: Vec<NodeId> = data
        .libraries
        .iter()
        .zip(&centers)
        .map(|(lib, c)| {
            Library::spawn(
                scene,
                *c,
                cfg.library_radius,
                &lib.name,
                &label,
                Scope::Global,
            )
        })
        .collect();

    let max_count = data.max_count();
    let mut arrows = Vec::with_capacity(data.transfers.len());
    for t in &data.transfers {
        // Both ends were checked by `validate`.
        let (Some(from), Some(to)) = (data.library_index(&t.from), data.library_index(&t.to))
        else {
            continue;
        };
        let (a, b) = trim_endpoints(centers[from], centers[to], cfg.library_radius);
        let style = ArrowStyle {
            line_width: width_for_count(t.count, max_count, cfg.max_arrow_width),
            ..cfg.arrow_style()
        };
        arrows.push(Arrow::spawn(scene, a, b, t.count, style, &label, Scope::Global));
    }

    tracing::info!(
        nodes = scene.len(),
        libraries = data.libraries.len(),
        arrows = arrows.len(),
        "demo scene built"
    );
    Ok(DemoScene {
        timers,
        libraries,
        arrows,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/demo/builder.rs"]
mod tests;
