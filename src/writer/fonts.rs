//! Base-14 fonts and approximate text metrics.

use crate::error::{Error, Result};

/// The standard Type 1 fonts every PDF reader provides.
pub const BASE14_FONTS: [&str; 14] = [
    "Courier",
    "Courier-Bold",
    "Courier-BoldOblique",
    "Courier-Oblique",
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-BoldOblique",
    "Helvetica-Oblique",
    "Symbol",
    "Times-Bold",
    "Times-BoldItalic",
    "Times-Italic",
    "Times-Roman",
    "ZapfDingbats",
];

/// Resource name under which a base-14 font is referenced from content
/// streams (`Helvetica-Bold` becomes `HelveticaBold`).
pub fn font_resource_name(font_name: &str) -> Result<String> {
    if BASE14_FONTS.contains(&font_name) {
        Ok(font_name.replace('-', ""))
    } else {
        Err(Error::InvalidStyle {
            name: "fontName".to_string(),
            value: font_name.to_string(),
        })
    }
}

/// Base font for a resource name produced by [`font_resource_name`].
pub fn base_font_for_resource(resource: &str) -> Option<&'static str> {
    BASE14_FONTS
        .iter()
        .copied()
        .find(|name| name.replace('-', "") == resource)
}

/// Font metrics for measuring text.
pub trait FontMetrics {
    /// Width of `text` at `font_size`.
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

/// Average-width metrics, good enough for centering short labels.
#[derive(Debug, Clone, Copy)]
pub struct SimpleFontMetrics {
    /// Average character width as proportion of font size
    pub char_width_ratio: f32,
}

impl Default for SimpleFontMetrics {
    fn default() -> Self {
        Self {
            char_width_ratio: 0.5,
        }
    }
}

impl SimpleFontMetrics {
    /// Create metrics for monospace fonts.
    pub fn monospace() -> Self {
        Self {
            char_width_ratio: 0.6,
        }
    }

    /// Metrics for a base-14 font name.
    pub fn for_font(font_name: &str) -> Self {
        if font_name.starts_with("Courier") {
            Self::monospace()
        } else {
            Self::default()
        }
    }
}

impl FontMetrics for SimpleFontMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * self.char_width_ratio
    }
}
