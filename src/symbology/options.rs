//! Drawing options for linear symbols, resolved from style parameters.

use super::linear::LinearKind;
use crate::color::Color;
use crate::drawing::Stroke;
use crate::error::{Error, Result};
use crate::style::{parse_flag, StyleParams, BASELINE_BAR_STROKE_WIDTH};

/// Width of one side's quiet zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuietZone {
    /// The symbology's standard width
    Standard,
    /// No quiet zone
    None,
    /// Explicit width in points
    Width(f32),
}

impl QuietZone {
    /// Interpret an `lquiet`/`rquiet` value: a boolean-like flag or a number
    /// of points.
    pub fn parse(name: &str, raw: &str) -> Result<Self> {
        if let Some(flag) = parse_flag(raw) {
            return Ok(if flag { QuietZone::Standard } else { QuietZone::None });
        }
        match raw.trim().parse::<f32>() {
            Ok(width) if width.is_finite() && width >= 0.0 => Ok(QuietZone::Width(width)),
            _ => Err(Error::InvalidStyle {
                name: name.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    /// Resolved width given the symbology's standard width.
    pub fn width(&self, standard: f32) -> f32 {
        match self {
            QuietZone::Standard => standard,
            QuietZone::None => 0.0,
            QuietZone::Width(w) => *w,
        }
    }
}

/// Options for drawing a linear symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearOptions {
    /// Narrow module width in points
    pub bar_width: f32,
    /// Bar height in points; `None` derives it from the symbol width
    pub bar_height: Option<f32>,
    /// Bar fill color
    pub bar_fill: Color,
    /// Bar outline
    pub bar_stroke: Option<Stroke>,
    /// Background fill behind the whole symbol
    pub background: Option<Color>,
    /// Outline around the whole symbol
    pub outline: Option<Stroke>,
    /// Human-readable text color
    pub text_color: Color,
    /// Human-readable text font
    pub font_name: String,
    /// Human-readable text size in points
    pub font_size: f32,
    /// Print the value beneath the bars
    pub human_readable: bool,
    /// Left quiet zone
    pub left_quiet: QuietZone,
    /// Right quiet zone
    pub right_quiet: QuietZone,
    /// Draw quiet-zone guides
    pub debug: bool,
}

impl LinearOptions {
    /// Defaults for `kind` with no style applied.
    pub fn defaults(kind: LinearKind) -> Self {
        Self {
            bar_width: kind.module_width(),
            bar_height: None,
            bar_fill: Color::black(),
            bar_stroke: None,
            background: None,
            outline: None,
            text_color: Color::black(),
            font_name: "Helvetica".to_string(),
            font_size: kind.font_size(),
            human_readable: kind.human_readable(),
            left_quiet: QuietZone::Standard,
            right_quiet: QuietZone::Standard,
            debug: false,
        }
    }

    /// Defaults for `kind` overridden by whatever `style` carries.
    pub fn from_style(kind: LinearKind, style: &StyleParams) -> Result<Self> {
        let mut options = Self::defaults(kind);

        let fill = style.color("fillColor")?;
        if let Some(color) = style.color("barFillColor")?.or(fill) {
            options.bar_fill = color;
        }
        if let Some(color) = style.color("textColor")?.or(fill) {
            options.text_color = color;
        }
        options.background = style.color("background")?;

        options.bar_stroke = bar_stroke(style)?;

        options.outline = outline(style)?;

        let iso_scale = style.length("isoScale")?.unwrap_or(1.0);
        if iso_scale <= 0.0 {
            return Err(Error::InvalidStyle {
                name: "isoScale".to_string(),
                value: iso_scale.to_string(),
            });
        }
        if let Some(width) = style.length("barWidth")? {
            options.bar_width = positive("barWidth", width)?;
        }
        options.bar_width *= iso_scale;
        if let Some(height) = style.length("barHeight")? {
            options.bar_height = Some(positive("barHeight", height)?);
        }
        options.bar_height = options.bar_height.map(|h| h * iso_scale);

        if let Some(size) = style.length("fontSize")? {
            options.font_size = positive("fontSize", size)?;
        }
        if let Some(name) = style.text("fontName")? {
            options.font_name = name.to_string();
        }
        if let Some(flag) = style.flag("humanReadable")? {
            options.human_readable = flag;
        }
        if let Some(flag) = style.flag("debug")? {
            options.debug = flag;
        }

        // quiet applies to both sides; lquiet/rquiet refine one side each
        if let Some(false) = style.flag("quiet")? {
            options.left_quiet = QuietZone::None;
            options.right_quiet = QuietZone::None;
        }
        if let Some(raw) = style.text("lquiet")? {
            options.left_quiet = QuietZone::parse("lquiet", raw)?;
        }
        if let Some(raw) = style.text("rquiet")? {
            options.right_quiet = QuietZone::parse("rquiet", raw)?;
        }

        Ok(options)
    }

    /// Builder: module width.
    pub fn bar_width(mut self, width: f32) -> Self {
        self.bar_width = width;
        self
    }

    /// Builder: bar height.
    pub fn bar_height(mut self, height: f32) -> Self {
        self.bar_height = Some(height);
        self
    }

    /// Builder: human-readable text.
    pub fn human_readable(mut self, show: bool) -> Self {
        self.human_readable = show;
        self
    }

    /// Builder: quiet zones on both sides.
    pub fn quiet(mut self, zone: QuietZone) -> Self {
        self.left_quiet = zone;
        self.right_quiet = zone;
        self
    }
}

/// Whole-symbol outline from `strokeColor`/`strokeWidth`; either one turns
/// it on, and a zero width turns it off.
pub(super) fn outline(style: &StyleParams) -> Result<Option<Stroke>> {
    let color = style.color("strokeColor")?;
    let width = style.length("strokeWidth")?;
    if color.is_none() && width.is_none() {
        return Ok(None);
    }
    let width = width.unwrap_or(1.0);
    Ok((width > 0.0).then(|| Stroke {
        color: color.unwrap_or_else(Color::black),
        width,
    }))
}

/// Bar outline from `barStrokeColor`, as wide as `barStrokeWidth`.
pub(super) fn bar_stroke(style: &StyleParams) -> Result<Option<Stroke>> {
    match style.color("barStrokeColor")? {
        Some(color) => Ok(Some(Stroke {
            color,
            width: style
                .length("barStrokeWidth")?
                .unwrap_or(BASELINE_BAR_STROKE_WIDTH),
        })),
        None => Ok(None),
    }
}

pub(super) fn positive(name: &str, value: f32) -> Result<f32> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidStyle {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleValue;

    #[test]
    fn test_quiet_zone_parse() {
        assert_eq!(QuietZone::parse("lquiet", "1").unwrap(), QuietZone::Standard);
        assert_eq!(QuietZone::parse("lquiet", "false").unwrap(), QuietZone::None);
        assert_eq!(QuietZone::parse("lquiet", "12.5").unwrap(), QuietZone::Width(12.5));
        assert!(QuietZone::parse("lquiet", "-3").is_err());
        assert!(QuietZone::parse("lquiet", "wide").is_err());
    }

    #[test]
    fn test_baseline_style_matches_defaults() {
        let options = LinearOptions::from_style(LinearKind::Code128, &StyleParams::baseline()).unwrap();
        assert_eq!(options, LinearOptions::defaults(LinearKind::Code128));
    }

    #[test]
    fn test_fill_color_feeds_bars_and_text() {
        let red = Color::new(1.0, 0.0, 0.0);
        let style = StyleParams::baseline().with("fillColor", StyleValue::Color(red));
        let options = LinearOptions::from_style(LinearKind::Ean13, &style).unwrap();
        assert_eq!(options.bar_fill, red);
        assert_eq!(options.text_color, red);
    }

    #[test]
    fn test_bar_fill_color_wins_over_fill_color() {
        let red = Color::new(1.0, 0.0, 0.0);
        let style = StyleParams::baseline()
            .with("fillColor", StyleValue::Color(red))
            .with("barFillColor", StyleValue::Color(Color::black()));
        let options = LinearOptions::from_style(LinearKind::Code128, &style).unwrap();
        assert_eq!(options.bar_fill, Color::black());
        assert_eq!(options.text_color, red);
    }

    #[test]
    fn test_bar_stroke_uses_baseline_width() {
        let style = StyleParams::baseline().with("barStrokeColor", StyleValue::Color(Color::black()));
        let options = LinearOptions::from_style(LinearKind::Code128, &style).unwrap();
        assert_eq!(options.bar_stroke.unwrap().width, BASELINE_BAR_STROKE_WIDTH);
    }

    #[test]
    fn test_outline_needs_positive_width() {
        let style = StyleParams::baseline().with("strokeWidth", StyleValue::Length(0.0));
        let options = LinearOptions::from_style(LinearKind::Code128, &style).unwrap();
        assert!(options.outline.is_none());

        let style = StyleParams::baseline().with("strokeColor", StyleValue::Color(Color::black()));
        let options = LinearOptions::from_style(LinearKind::Code128, &style).unwrap();
        assert_eq!(options.outline.unwrap().width, 1.0);
    }

    #[test]
    fn test_iso_scale_multiplies_module_width() {
        let style = StyleParams::baseline()
            .with("barWidth", StyleValue::Length(1.0))
            .with("barHeight", StyleValue::Length(20.0))
            .with("isoScale", StyleValue::Length(2.0));
        let options = LinearOptions::from_style(LinearKind::Code128, &style).unwrap();
        assert_eq!(options.bar_width, 2.0);
        assert_eq!(options.bar_height, Some(40.0));
    }

    #[test]
    fn test_quiet_flags() {
        let style = StyleParams::baseline()
            .with("quiet", StyleValue::Text("0".into()))
            .with("rquiet", StyleValue::Text("5".into()));
        let options = LinearOptions::from_style(LinearKind::Code128, &style).unwrap();
        assert_eq!(options.left_quiet, QuietZone::None);
        assert_eq!(options.right_quiet, QuietZone::Width(5.0));
    }

    #[test]
    fn test_rejects_non_positive_lengths() {
        let style = StyleParams::baseline().with("barWidth", StyleValue::Length(0.0));
        assert!(matches!(
            LinearOptions::from_style(LinearKind::Code128, &style),
            Err(Error::InvalidStyle { .. })
        ));
    }

    #[test]
    fn test_human_readable_flag() {
        let style = StyleParams::baseline().with("humanReadable", StyleValue::Text("no".into()));
        let options = LinearOptions::from_style(LinearKind::Ean13, &style).unwrap();
        assert!(!options.human_readable);
    }
}
