//! Color values and color-string resolution.
//!
//! Markup colors come in three forms:
//!
//! - a color name (`black`, `darkblue`, ...)
//! - a hex triplet `#RRGGBB`
//! - a float triple `(r,g,b)` with components in `0.0..=1.0`

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use phf::phf_map;
use regex::Regex;
use serde::Serialize;

/// RGB color representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    /// Red channel (0.0 - 1.0)
    pub r: f32,
    /// Green channel (0.0 - 1.0)
    pub g: f32,
    /// Blue channel (0.0 - 1.0)
    pub b: f32,
}

impl Color {
    /// Create a new color.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_barcode::color::Color;
    ///
    /// let red = Color::new(1.0, 0.0, 0.0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Create a black color.
    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Create a white color.
    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// Resolves a color string into a [`Color`].
pub trait ColorResolver: Send + Sync {
    /// Resolve `value` into a color.
    fn resolve(&self, value: &str) -> Result<Color>;
}

static NAMED_COLORS: phf::Map<&'static str, [u8; 3]> = phf_map! {
    "aqua" => [0x00, 0xFF, 0xFF],
    "black" => [0x00, 0x00, 0x00],
    "blue" => [0x00, 0x00, 0xFF],
    "brown" => [0xA5, 0x2A, 0x2A],
    "cyan" => [0x00, 0xFF, 0xFF],
    "darkblue" => [0x00, 0x00, 0x8B],
    "darkgray" => [0xA9, 0xA9, 0xA9],
    "darkgreen" => [0x00, 0x64, 0x00],
    "darkgrey" => [0xA9, 0xA9, 0xA9],
    "darkred" => [0x8B, 0x00, 0x00],
    "fuchsia" => [0xFF, 0x00, 0xFF],
    "gold" => [0xFF, 0xD7, 0x00],
    "gray" => [0x80, 0x80, 0x80],
    "green" => [0x00, 0x80, 0x00],
    "grey" => [0x80, 0x80, 0x80],
    "indigo" => [0x4B, 0x00, 0x82],
    "lightgrey" => [0xD3, 0xD3, 0xD3],
    "lightgray" => [0xD3, 0xD3, 0xD3],
    "lime" => [0x00, 0xFF, 0x00],
    "magenta" => [0xFF, 0x00, 0xFF],
    "maroon" => [0x80, 0x00, 0x00],
    "navy" => [0x00, 0x00, 0x80],
    "olive" => [0x80, 0x80, 0x00],
    "orange" => [0xFF, 0xA5, 0x00],
    "pink" => [0xFF, 0xC0, 0xCB],
    "purple" => [0x80, 0x00, 0x80],
    "red" => [0xFF, 0x00, 0x00],
    "silver" => [0xC0, 0xC0, 0xC0],
    "teal" => [0x00, 0x80, 0x80],
    "violet" => [0xEE, 0x82, 0xEE],
    "white" => [0xFF, 0xFF, 0xFF],
    "yellow" => [0xFF, 0xFF, 0x00],
};

lazy_static! {
    /// `#RRGGBB`
    static ref RE_HEX: Regex = Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$").unwrap();

    /// `(r,g,b)` with float components
    static ref RE_TRIPLE: Regex =
        Regex::new(r"^\(\s*([0-9]*\.?[0-9]+)\s*,\s*([0-9]*\.?[0-9]+)\s*,\s*([0-9]*\.?[0-9]+)\s*\)$").unwrap();
}

/// Names, hex triplets, and float triples. Unrecognized strings are errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardColors;

impl StandardColors {
    /// Create the standard color resolver.
    pub fn new() -> Self {
        Self
    }

    /// Look up a color name, case-insensitively.
    pub fn named(name: &str) -> Option<Color> {
        NAMED_COLORS
            .get(name)
            .or_else(|| NAMED_COLORS.get(name.to_ascii_lowercase().as_str()))
            .map(|[r, g, b]| Color::from_rgb8(*r, *g, *b))
    }
}

impl ColorResolver for StandardColors {
    fn resolve(&self, value: &str) -> Result<Color> {
        let value = value.trim();

        if let Some(color) = Self::named(value) {
            return Ok(color);
        }

        if let Some(caps) = RE_HEX.captures(value) {
            let channel = |i: usize| u8::from_str_radix(&caps[i], 16).unwrap_or(0);
            return Ok(Color::from_rgb8(channel(1), channel(2), channel(3)));
        }

        if let Some(caps) = RE_TRIPLE.captures(value) {
            let mut channels = [0.0f32; 3];
            for (i, slot) in channels.iter_mut().enumerate() {
                let component: f32 = caps[i + 1]
                    .parse()
                    .map_err(|_| Error::InvalidColor(value.to_string()))?;
                if component > 1.0 {
                    return Err(Error::InvalidColor(value.to_string()));
                }
                *slot = component;
            }
            return Ok(Color::new(channels[0], channels[1], channels[2]));
        }

        Err(Error::InvalidColor(value.to_string()))
    }
}
