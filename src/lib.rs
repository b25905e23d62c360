//! canvas-scene is a lightweight retained-mode 2D scene graph for interactive canvas UIs.
//!
//! A [`SceneContext`] owns every node: identity, frame (position, size, rotation), lifecycle
//! flags and the ownership tree. Nodes carry a [`Widget`], a closed set of variants behind the
//! [`Behavior`] capability trait.
//!
//! # Frame loop
//!
//! 1. **Logic** ([`FrameScheduler::logic_tick`]): unlayered depth-first walk calling each node's
//!    logic. [`TextBox`] nodes lay their runs out into fresh [`TextLeaf`] children here.
//! 2. **Render** ([`FrameScheduler::render_tick`]): fixed-period layered walk drawing every enabled
//!    node onto a [`Surface`], with optional per-depth debug outlines.
//! 3. **Input** ([`dispatch_click`]): a pointer-down is delivered to the last node in layered order
//!    whose rotation-aware hit test passes.
//!
//! The scene only talks to the [`Surface`] contract. [`RecordingSurface`] is a headless
//! implementation with fixed text metrics; `CpuSurface` (feature `cpu`) rasterizes with
//! `vello_cpu` and shapes text with `parley`.
//!
//! The `demo` layer ([`SceneConfig`], [`DataProvider`], [`build_scene`]) builds the library/arrow
//! scene used by the `canvas-scene` binary.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod demo;
mod dispatch;
mod foundation;
mod frame;
mod layout;
mod render;
mod scene;
mod widgets;

/// Rotation helpers shared by hit testing, debug outlines and arrow geometry.
pub use foundation::geometry;

pub use demo::builder::{DemoScene, build_scene, ring_positions};
pub use demo::config::{DEBUG_BOUNDS_ENV, SceneConfig};
pub use demo::provider::{
    DataProvider, Dataset, JsonFileProvider, LibraryRecord, StaticProvider, Transfer,
};
pub use dispatch::pointer::{
    ClickEvent, Modifiers, PointerDispatcher, PointerEvent, PointerKind, PointerSource,
    ScriptedPointer, dispatch_click, hit_test,
};
pub use foundation::core::{Affine, BezPath, Color, Font, Point, Rect, Vec2};
pub use foundation::error::{SceneError, SceneResult};
pub use frame::clock::{Clock, ManualClock, SystemClock};
pub use frame::scheduler::{
    DEFAULT_RENDER_HZ, FrameScheduler, FrameTimings, RunOptions, RunStats,
};
pub use layout::leaf::TextLeaf;
pub use layout::text_flow::{
    ClickHandler, DynamicRun, FlowMetrics, HoverHandler, LineMetrics, RunSpec, StyledText,
    TextBox, TextProducer, TextRun,
};
#[cfg(feature = "cpu")]
pub use render::cpu::CpuSurface;
pub use render::debug::{DEBUG_PALETTE, depth_color, draw_bounds};
pub use render::recording::{DrawCmd, RecordingSurface};
pub use render::surface::{Surface, TextMetrics, fill_circle, stroke_polylines, stroke_rect};
pub use scene::context::SceneContext;
pub use scene::node::{Node, NodeFrame, NodeId, Scope};
pub use scene::widget::{Behavior, Plain, Widget};
pub use widgets::arrow::{
    Arrow, ArrowStyle, arrow_frame, arrow_polylines, trim_endpoints, width_for_count,
};
pub use widgets::label::LabelStyle;
pub use widgets::library::Library;
pub use widgets::timers::{Timers, TimersStyle};
