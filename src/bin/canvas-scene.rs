use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use canvas_scene::{
    Clock, DataProvider, Dataset, DemoScene, FrameScheduler, JsonFileProvider, ManualClock, Point,
    PointerEvent, RecordingSurface, RunOptions, RunStats, SceneConfig, SceneContext,
    ScriptedPointer, StaticProvider, Surface, SystemClock, build_scene,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Build the library/arrow demo scene and drive it headlessly for a number of frames.
#[derive(Parser, Debug)]
#[command(name = "canvas-scene", version)]
struct Cli {
    /// Scene config JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dataset JSON. The built-in sample is used when omitted.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Render frames to run before exiting.
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// Pointer-down at `x,y`, delivered one per loop iteration. Repeatable.
    #[arg(long = "click", value_parser = parse_point)]
    clicks: Vec<Point>,

    /// Advance a simulated clock by this many milliseconds per iteration instead of real time.
    /// Must be at least 1, or the next render would never come due.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    step_ms: Option<u64>,

    /// Force the debug bounding outlines on or off.
    #[arg(long)]
    debug_bounds: Option<bool>,

    /// TTF/OTF font for the raster surface. Required with `--out`.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Write the last frame as a PNG.
    #[arg(long, requires = "font")]
    out: Option<PathBuf>,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got '{s}'"))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("x: {e}"))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("y: {e}"))?;
    Ok(Point::new(x, y))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => SceneConfig::from_json_file(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => SceneConfig::default(),
    };
    cfg.apply_env();
    if let Some(on) = cli.debug_bounds {
        cfg.debug_bounds = on;
    }

    let data = fetch_dataset(cli.data.as_ref())?;
    let clock: Box<dyn Clock> = match cli.step_ms {
        Some(ms) => Box::new(ManualClock::new(Duration::from_millis(ms))),
        None => Box::new(SystemClock::new()),
    };

    match (&cli.font, &cli.out) {
        (Some(font), Some(out)) => run_raster(&cli, &cfg, &data, clock.as_ref(), font, out),
        _ => run_recording(&cli, &cfg, &data, clock.as_ref()),
    }
}

fn fetch_dataset(path: Option<&PathBuf>) -> anyhow::Result<Dataset> {
    let data = match path {
        Some(path) => JsonFileProvider::new(path)
            .fetch()
            .with_context(|| format!("fetch dataset '{}'", path.display()))?,
        None => StaticProvider::sample().fetch()?,
    };
    Ok(data)
}

fn drive(
    cli: &Cli,
    cfg: &SceneConfig,
    data: &Dataset,
    clock: &dyn Clock,
    surface: &mut dyn Surface,
) -> anyhow::Result<(SceneContext, DemoScene, RunStats)> {
    let mut scene = SceneContext::new();
    let mut scheduler = FrameScheduler::new(cfg.render_period()).with_border(cfg.border);
    let demo = build_scene(&mut scene, cfg, data, scheduler.timings())?;

    let mut pointer = ScriptedPointer::new(cli.clicks.iter().map(|p| PointerEvent::down(*p)));
    let stats = scheduler
        .run(
            &mut scene,
            surface,
            &mut pointer,
            clock,
            RunOptions {
                max_render_frames: cli.frames,
                max_logic_ticks: None,
            },
        )
        .context("frame loop")?;
    let timings = scheduler.timings();
    tracing::info!(
        frames = stats.render_frames,
        logic_ticks = stats.logic_ticks,
        clicks = stats.clicks_delivered,
        ms_per_render = timings.ms_per_render(),
        ms_per_logic = timings.ms_per_logic(),
        "run finished"
    );
    Ok((scene, demo, stats))
}

fn run_recording(
    cli: &Cli,
    cfg: &SceneConfig,
    data: &Dataset,
    clock: &dyn Clock,
) -> anyhow::Result<()> {
    let mut surface = RecordingSurface::new(f64::from(cfg.width), f64::from(cfg.height));
    let (scene, demo, stats) = drive(cli, cfg, data, clock, &mut surface)?;

    let visible_labels = demo
        .libraries
        .iter()
        .chain(&demo.arrows)
        .flat_map(|id| scene.children(*id))
        .filter(|id| scene.is_enabled(**id))
        .count();
    println!("frames: {}", stats.render_frames);
    println!("logic ticks: {}", stats.logic_ticks);
    println!("clicks delivered: {}", stats.clicks_delivered);
    println!("live nodes: {}", scene.len());
    println!("visible labels: {visible_labels}");
    println!("draw commands: {}", surface.commands().len());
    println!("frames presented: {}", surface.frames_presented());
    Ok(())
}

#[cfg(feature = "cpu")]
fn run_raster(
    cli: &Cli,
    cfg: &SceneConfig,
    data: &Dataset,
    clock: &dyn Clock,
    font: &std::path::Path,
    out: &std::path::Path,
) -> anyhow::Result<()> {
    let mut surface = canvas_scene::CpuSurface::with_font_file(cfg.width, cfg.height, font)?;
    surface.set_background(cfg.background);
    drive(cli, cfg, data, clock, &mut surface)?;
    surface.save_png(out)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

#[cfg(not(feature = "cpu"))]
fn run_raster(
    _cli: &Cli,
    _cfg: &SceneConfig,
    _data: &Dataset,
    _clock: &dyn Clock,
    _font: &std::path::Path,
    _out: &std::path::Path,
) -> anyhow::Result<()> {
    anyhow::bail!("PNG output requires the `cpu` feature")
}
