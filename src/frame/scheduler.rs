//! Dual-clock frame loop.
//!
//! Render ticks fire on a fixed period; logic ticks run on every loop iteration with no enforced
//! delay. The two are independent: there is no frame skipping and no catch-up.

use std::{cell::Cell, rc::Rc, time::Duration};

use crate::{
    dispatch::pointer::{PointerDispatcher, PointerSource},
    foundation::{
        core::{Color, Rect},
        error::SceneResult,
    },
    frame::clock::Clock,
    render::{
        debug::{depth_color, draw_bounds},
        surface::{Surface, stroke_rect},
    },
    scene::context::SceneContext,
};

/// Default render rate.
pub const DEFAULT_RENDER_HZ: f64 = 60.0;

/// Per-tick timings shared with readouts such as [`crate::Timers`].
#[derive(Debug, Default)]
pub struct FrameTimings {
    ms_per_render: Cell<f64>,
    ms_per_logic: Cell<f64>,
    renders: Cell<u64>,
    logic_ticks: Cell<u64>,
}

impl FrameTimings {
    /// Zeroed timings, ready to share.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Milliseconds between the two most recent render ticks.
    pub fn ms_per_render(&self) -> f64 {
        self.ms_per_render.get()
    }

    /// Milliseconds between the two most recent logic ticks.
    pub fn ms_per_logic(&self) -> f64 {
        self.ms_per_logic.get()
    }

    /// Render ticks recorded so far.
    pub fn renders(&self) -> u64 {
        self.renders.get()
    }

    /// Logic ticks recorded so far.
    pub fn logic_ticks(&self) -> u64 {
        self.logic_ticks.get()
    }

    fn record_render(&self, elapsed: Duration) {
        self.ms_per_render.set(elapsed.as_secs_f64() * 1000.0);
        self.renders.set(self.renders.get() + 1);
    }

    fn record_logic(&self, elapsed: Duration) {
        self.ms_per_logic.set(elapsed.as_secs_f64() * 1000.0);
        self.logic_ticks.set(self.logic_ticks.get() + 1);
    }
}

/// Stop conditions for [`FrameScheduler::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Stop after this many render ticks.
    pub max_render_frames: u64,
    /// Optional cap on logic ticks, for clocks that never reach the next render.
    pub max_logic_ticks: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            max_render_frames: 1,
            max_logic_ticks: None,
        }
    }
}

/// What a [`FrameScheduler::run`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Render ticks run.
    pub render_frames: u64,
    /// Logic ticks run.
    pub logic_ticks: u64,
    /// Pointer events polled, moves included.
    pub pointer_events: u64,
    /// Pointer-downs that reached a node.
    pub clicks_delivered: u64,
}

/// Drives the logic and render passes of a scene.
#[derive(Debug)]
pub struct FrameScheduler {
    render_period: Duration,
    last_render: Option<Duration>,
    last_logic: Option<Duration>,
    timings: Rc<FrameTimings>,
    border: Option<Color>,
    dispatcher: PointerDispatcher,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::from_hz(DEFAULT_RENDER_HZ)
    }
}

impl FrameScheduler {
    /// Scheduler rendering once per `render_period`, with a black frame border.
    pub fn new(render_period: Duration) -> Self {
        Self {
            render_period,
            last_render: None,
            last_logic: None,
            timings: FrameTimings::new(),
            border: Some(Color::BLACK),
            dispatcher: PointerDispatcher::new(),
        }
    }

    /// Scheduler rendering `hz` times per second. Non-positive rates render on every iteration.
    pub fn from_hz(hz: f64) -> Self {
        let period = if hz > 0.0 {
            Duration::from_secs_f64(1.0 / hz)
        } else {
            Duration::ZERO
        };
        Self::new(period)
    }

    /// Frame border color; `None` disables the border.
    pub fn with_border(mut self, border: Option<Color>) -> Self {
        self.border = border;
        self
    }

    /// Share an existing timings record (e.g. one already handed to a readout widget).
    pub fn with_timings(mut self, timings: Rc<FrameTimings>) -> Self {
        self.timings = timings;
        self
    }

    /// Minimum time between render ticks.
    pub fn render_period(&self) -> Duration {
        self.render_period
    }

    /// Shared handle to the tick timings.
    pub fn timings(&self) -> Rc<FrameTimings> {
        Rc::clone(&self.timings)
    }

    /// Pointer state tracked by [`FrameScheduler::run`].
    pub fn dispatcher(&self) -> &PointerDispatcher {
        &self.dispatcher
    }

    /// Whether a render tick is due at `now`.
    pub fn render_due(&self, now: Duration) -> bool {
        self.last_render
            .is_none_or(|last| now.saturating_sub(last) >= self.render_period)
    }

    /// Run every enabled node's logic in depth-first order. Returns the number of visited nodes.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn logic_tick(
        &mut self,
        scene: &mut SceneContext,
        surface: &mut dyn Surface,
        now: Duration,
    ) -> SceneResult<usize> {
        let elapsed = self.last_logic.map_or(Duration::ZERO, |l| now.saturating_sub(l));
        self.last_logic = Some(now);
        self.timings.record_logic(elapsed);
        scene.walk_depth_first(|scene, id, _| scene.logic(id, surface))
    }

    /// Clear, draw the border, draw every enabled node in layered order and present.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn render_tick(
        &mut self,
        scene: &SceneContext,
        surface: &mut dyn Surface,
        now: Duration,
    ) -> SceneResult<usize> {
        let elapsed = self.last_render.map_or(Duration::ZERO, |l| now.saturating_sub(l));
        self.last_render = Some(now);
        self.timings.record_render(elapsed);

        let size = surface.size();
        let bounds = Rect::new(0.0, 0.0, size.width, size.height);
        surface.clear(bounds);
        if let Some(border) = self.border {
            surface.set_stroke(border);
            surface.set_line_width(1.0);
            stroke_rect(surface, bounds);
        }

        let debug = scene.debug_bounds();
        let drawn = scene.walk_layered(|node, depth| {
            node.widget().as_behavior().render(node.frame(), surface)?;
            if debug {
                draw_bounds(surface, node.frame(), depth_color(scene.debug_palette(), depth));
            }
            Ok(())
        })?;
        surface.present()?;
        Ok(drawn)
    }

    /// Cooperative host loop: poll pointer events, run a logic tick, render when due.
    ///
    /// Returns once `options.max_render_frames` frames were rendered or the logic cap was hit.
    /// The first error from any tick ends the loop.
    #[tracing::instrument(level = "debug", skip_all, fields(max_frames = options.max_render_frames))]
    pub fn run(
        &mut self,
        scene: &mut SceneContext,
        surface: &mut dyn Surface,
        pointer: &mut dyn PointerSource,
        clock: &dyn Clock,
        options: RunOptions,
    ) -> SceneResult<RunStats> {
        let mut stats = RunStats::default();
        while stats.render_frames < options.max_render_frames {
            if options
                .max_logic_ticks
                .is_some_and(|cap| stats.logic_ticks >= cap)
            {
                tracing::warn!(logic_ticks = stats.logic_ticks, "logic tick cap reached");
                break;
            }
            let now = clock.now();

            for event in pointer.poll() {
                stats.pointer_events += 1;
                if self.dispatcher.handle(scene, &event).is_some() {
                    stats.clicks_delivered += 1;
                }
            }

            self.logic_tick(scene, surface, now)?;
            stats.logic_ticks += 1;

            if self.render_due(now) {
                self.render_tick(scene, surface, now)?;
                stats.render_frames += 1;
            }
            clock.yield_now();
        }
        tracing::debug!(?stats, "frame loop finished");
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/scheduler.rs"]
mod tests;
