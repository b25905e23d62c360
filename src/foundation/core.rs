use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{SceneError, SceneResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Straight-alpha RGBA8 color used for fills, strokes and text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Opaque green.
    pub const GREEN: Self = Self::rgb(0, 128, 0);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Opaque orange.
    pub const ORANGE: Self = Self::rgb(255, 165, 0);
    /// Opaque purple.
    pub const PURPLE: Self = Self::rgb(128, 0, 128);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Opaque color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from channels including alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB`, `#RRGGBBAA` or one of the named colors.
    pub fn parse(s: &str) -> SceneResult<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            "red" => return Ok(Self::RED),
            "green" => return Ok(Self::GREEN),
            "blue" => return Ok(Self::BLUE),
            "orange" => return Ok(Self::ORANGE),
            "purple" => return Ok(Self::PURPLE),
            "transparent" => return Ok(Self::TRANSPARENT),
            _ => {}
        }

        let hex = s.strip_prefix('#').unwrap_or(s);
        fn hex_byte(pair: &str) -> SceneResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| SceneError::config(format!("invalid hex byte \"{pair}\"")))
        }

        if !hex.is_ascii() {
            return Err(SceneError::config(format!("invalid color \"{s}\"")));
        }
        match hex.len() {
            6 => Ok(Self::rgb(
                hex_byte(&hex[0..2])?,
                hex_byte(&hex[2..4])?,
                hex_byte(&hex[4..6])?,
            )),
            8 => Ok(Self::rgba(
                hex_byte(&hex[0..2])?,
                hex_byte(&hex[2..4])?,
                hex_byte(&hex[4..6])?,
                hex_byte(&hex[6..8])?,
            )),
            _ => Err(SceneError::config(format!(
                "color \"{s}\" must be a name, #RRGGBB or #RRGGBBAA"
            ))),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            RgbaObj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
            Arr(Vec<u8>),
        }

        fn opaque() -> u8 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => Self::parse(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

/// Font descriptor in the compact canvas form `"<size>px <family>"`, e.g. `"20px mono"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Font {
    /// Pixel size of the em box.
    pub size_px: f32,
    /// Family name handed to the surface's font resolver.
    pub family: String,
}

impl Font {
    /// Build a font, rejecting non-positive or non-finite sizes.
    pub fn new(size_px: f32, family: impl Into<String>) -> SceneResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SceneError::config("font size_px must be finite and > 0"));
        }
        Ok(Self {
            size_px,
            family: family.into(),
        })
    }
}

impl FromStr for Font {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (size, family) = s
            .split_once(char::is_whitespace)
            .ok_or_else(|| SceneError::config(format!("font \"{s}\" must be \"<size>px <family>\"")))?;
        let size = size
            .strip_suffix("px")
            .ok_or_else(|| SceneError::config(format!("font size \"{size}\" must end in px")))?;
        let size_px = size
            .parse::<f32>()
            .map_err(|e| SceneError::config(format!("font size \"{size}\": {e}")))?;
        Self::new(size_px, family.trim())
    }
}

impl TryFrom<String> for Font {
    type Error = SceneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Font> for String {
    fn from(value: Font) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size_px, self.family)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
