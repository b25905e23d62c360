//! Demo scene configuration.
//!
//! Loaded from JSON; every field is optional and falls back to [`SceneConfig::default`].

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        core::{Color, Font},
        error::{SceneError, SceneResult},
    },
    render::debug::DEBUG_PALETTE,
    scene::node::Scope,
    widgets::{arrow::ArrowStyle, label::LabelStyle, timers::TimersStyle},
};

/// Env var overriding [`SceneConfig::debug_bounds`] (`1`/`true`/`on` or `0`/`false`/`off`).
pub const DEBUG_BOUNDS_ENV: &str = "CANVAS_SCENE_DEBUG_BOUNDS";

/// Surface, timing and styling options for the demo scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Render ticks per second.
    pub render_hz: f64,
    /// Clear color.
    pub background: Color,
    /// Frame border; `null` disables it.
    pub border: Option<Color>,
    /// Stroke per-depth outlines around every node.
    pub debug_bounds: bool,
    /// Outline colors, cycled by depth.
    pub debug_palette: Vec<Color>,

    /// Font of the timing readout.
    pub timers_font: Font,
    /// Text color of the timing readout.
    pub timers_color: Color,
    /// Readout inset from the top-right corner.
    pub timers_offset: f64,

    /// Radius of every library circle.
    pub library_radius: f64,
    /// Font of library and arrow labels.
    pub label_font: Font,
    /// Text color of labels.
    pub label_color: Color,
    /// Whether labels start out shown.
    pub labels_visible: bool,
    /// Register labels globally instead of owning them through their widget.
    pub labels_global: bool,

    /// Stroke color of arrows.
    pub arrow_color: Color,
    /// Length of each arrowhead stroke.
    pub arrow_head_len: f64,
    /// Stroke width of the arrow with the largest count.
    pub max_arrow_width: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            render_hz: 60.0,
            background: Color::WHITE,
            border: Some(Color::BLACK),
            debug_bounds: true,
            debug_palette: DEBUG_PALETTE.to_vec(),
            timers_font: Font {
                size_px: 20.0,
                family: "mono".to_owned(),
            },
            timers_color: Color::BLACK,
            timers_offset: 5.0,
            library_radius: 10.0,
            label_font: Font {
                size_px: 12.0,
                family: "mono".to_owned(),
            },
            label_color: Color::BLACK,
            labels_visible: true,
            labels_global: false,
            arrow_color: Color::BLACK,
            arrow_head_len: 10.0,
            max_arrow_width: 6.0,
        }
    }
}

impl SceneConfig {
    /// Read a JSON config file.
    pub fn from_json_file(path: &Path) -> SceneResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SceneError::config(format!("read {}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(text: &str) -> SceneResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| SceneError::config(format!("invalid scene config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject zero-sized surfaces, non-positive rates and negative lengths.
    pub fn validate(&self) -> SceneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::config("surface width/height must be > 0"));
        }
        if !self.render_hz.is_finite() || self.render_hz <= 0.0 {
            return Err(SceneError::config("render_hz must be finite and > 0"));
        }
        for (name, v) in [
            ("timers_offset", self.timers_offset),
            ("library_radius", self.library_radius),
            ("arrow_head_len", self.arrow_head_len),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(SceneError::config(format!("{name} must be finite and >= 0")));
            }
        }
        if !self.max_arrow_width.is_finite() || self.max_arrow_width < 1.0 {
            return Err(SceneError::config("max_arrow_width must be finite and >= 1"));
        }
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        if let Some(on) = std::env::var(DEBUG_BOUNDS_ENV)
            .ok()
            .and_then(|v| parse_switch(&v))
        {
            self.debug_bounds = on;
        }
    }

    /// Time between render ticks.
    pub fn render_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.render_hz)
    }

    /// Style shared by every label.
    pub fn label_style(&self) -> LabelStyle {
        LabelStyle {
            font: self.label_font.clone(),
            color: self.label_color,
            margin: 0.0,
            visible: self.labels_visible,
            scope: if self.labels_global {
                Scope::Global
            } else {
                Scope::Owned
            },
        }
    }

    /// Style of the timing readout.
    pub fn timers_style(&self) -> TimersStyle {
        TimersStyle {
            font: self.timers_font.clone(),
            color: self.timers_color,
            offset: self.timers_offset,
        }
    }

    /// Arrow style before count scaling.
    pub fn arrow_style(&self) -> ArrowStyle {
        ArrowStyle {
            color: self.arrow_color,
            line_width: 1.0,
            head_len: self.arrow_head_len,
        }
    }
}

fn parse_switch(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/demo/config.rs"]
mod tests;
