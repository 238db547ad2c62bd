//! Postal symbologies: fixed-width bars at a fixed pitch.
//!
//! POSTNET carries digits in tall and short bars. FIM (facing identification
//! mark) is one of four fixed patterns of full-height bars. Neither has a
//! quiet zone or human-readable text.

use super::options::{bar_stroke, outline, positive};
use super::Symbology;
use crate::color::Color;
use crate::drawing::{Drawing, Shape, Stroke};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::style::StyleParams;
use crate::units::INCH;

/// Short POSTNET bars relative to the full bar height.
const SHORT_BAR_RATIO: f32 = 0.4;

/// POSTNET digit patterns, tall bars weighted 7, 4, 2, 1, 0.
const POSTNET_DIGITS: [[u8; 5]; 10] = [
    [1, 1, 0, 0, 0],
    [0, 0, 0, 1, 1],
    [0, 0, 1, 0, 1],
    [0, 0, 1, 1, 0],
    [0, 1, 0, 0, 1],
    [0, 1, 0, 1, 0],
    [0, 1, 1, 0, 0],
    [1, 0, 0, 0, 1],
    [1, 0, 0, 1, 0],
    [1, 0, 1, 0, 0],
];

/// FIM A to D over nine bar positions.
const FIM_PATTERNS: [(char, [u8; 9]); 4] = [
    ('A', [1, 1, 0, 0, 1, 0, 0, 1, 1]),
    ('B', [1, 0, 1, 1, 0, 1, 1, 0, 1]),
    ('C', [1, 1, 0, 1, 0, 1, 0, 1, 1]),
    ('D', [1, 1, 1, 0, 1, 0, 1, 1, 1]),
];

/// One bar position of a postal symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostalBar {
    /// Full-height bar
    Full,
    /// Short bar
    Short,
    /// No bar
    Gap,
}

/// Postal symbologies in the standard catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostalKind {
    /// POSTNET (5, 9 or 11 digits plus check digit)
    Postnet,
    /// Facing identification mark (`A` to `D`)
    Fim,
}

impl std::fmt::Display for PostalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl PostalKind {
    /// Every postal kind, in catalog order.
    pub const ALL: [PostalKind; 2] = [PostalKind::Postnet, PostalKind::Fim];

    /// Markup name.
    pub fn name(&self) -> &'static str {
        match self {
            PostalKind::Postnet => "POSTNET",
            PostalKind::Fim => "FIM",
        }
    }

    /// Default bar width in points.
    pub fn bar_width(&self) -> f32 {
        match self {
            PostalKind::Postnet => 0.018 * INCH,
            PostalKind::Fim => INCH / 32.0,
        }
    }

    /// Distance between the left edges of neighbouring bar positions.
    pub fn pitch(&self) -> f32 {
        match self {
            PostalKind::Postnet => (0.018 + 0.0275) * INCH,
            PostalKind::Fim => INCH / 16.0,
        }
    }

    /// Default full bar height in points.
    pub fn bar_height(&self) -> f32 {
        match self {
            PostalKind::Postnet => 0.125 * INCH,
            PostalKind::Fim => 0.625 * INCH,
        }
    }

    /// Encode `value` into bar positions.
    pub fn encode(&self, value: &str) -> Result<Vec<PostalBar>> {
        match self {
            PostalKind::Postnet => postnet(value),
            PostalKind::Fim => fim(value),
        }
    }
}

fn postnet(value: &str) -> Result<Vec<PostalBar>> {
    let mut digits = Vec::with_capacity(12);
    for c in value.chars().filter(|c| !matches!(c, ' ' | '-')) {
        let digit = c
            .to_digit(10)
            .ok_or_else(|| Error::Barcode(format!("POSTNET cannot encode {:?}", c)))?;
        digits.push(digit as usize);
    }
    if !matches!(digits.len(), 5 | 9 | 11) {
        return Err(Error::Barcode(format!(
            "POSTNET requires 5, 9 or 11 digits, got {}",
            digits.len()
        )));
    }
    let sum: usize = digits.iter().sum();
    digits.push((10 - sum % 10) % 10);

    let mut bars = Vec::with_capacity(digits.len() * 5 + 2);
    bars.push(PostalBar::Full);
    for digit in digits {
        bars.extend(POSTNET_DIGITS[digit].iter().map(|&tall| {
            if tall == 1 {
                PostalBar::Full
            } else {
                PostalBar::Short
            }
        }));
    }
    bars.push(PostalBar::Full);
    Ok(bars)
}

fn fim(value: &str) -> Result<Vec<PostalBar>> {
    let letter = value.trim().to_ascii_uppercase();
    FIM_PATTERNS
        .iter()
        .find(|(name, _)| letter.len() == 1 && letter.starts_with(*name))
        .map(|(_, pattern)| {
            pattern
                .iter()
                .map(|&bar| if bar == 1 { PostalBar::Full } else { PostalBar::Gap })
                .collect()
        })
        .ok_or_else(|| Error::Barcode(format!("FIM requires one of A, B, C or D, got '{}'", value)))
}

/// Resolved drawing options for a postal symbol.
#[derive(Debug, Clone, PartialEq)]
struct PostalOptions {
    bar_width: f32,
    pitch: f32,
    bar_height: f32,
    bar_fill: Color,
    bar_stroke: Option<Stroke>,
    background: Option<Color>,
    outline: Option<Stroke>,
}

impl PostalOptions {
    fn defaults(kind: PostalKind) -> Self {
        Self {
            bar_width: kind.bar_width(),
            pitch: kind.pitch(),
            bar_height: kind.bar_height(),
            bar_fill: Color::black(),
            bar_stroke: None,
            background: None,
            outline: None,
        }
    }

    /// `barWidth` keeps the gap between bars; `barHeight` sets the full height.
    fn from_style(kind: PostalKind, style: &StyleParams) -> Result<Self> {
        let mut options = Self::defaults(kind);

        let fill = style.color("fillColor")?;
        if let Some(color) = style.color("barFillColor")?.or(fill) {
            options.bar_fill = color;
        }
        options.background = style.color("background")?;
        options.bar_stroke = bar_stroke(style)?;
        options.outline = outline(style)?;

        if let Some(width) = style.length("barWidth")? {
            let width = positive("barWidth", width)?;
            options.pitch += width - options.bar_width;
            options.bar_width = width;
        }
        if let Some(height) = style.length("barHeight")? {
            options.bar_height = positive("barHeight", height)?;
        }
        Ok(options)
    }

    fn natural(&self, positions: usize) -> Rect {
        let width = positions.saturating_sub(1) as f32 * self.pitch + self.bar_width;
        Rect::new(0.0, 0.0, width, self.bar_height)
    }
}

/// A postal symbology from the standard set.
#[derive(Debug, Clone, Copy)]
pub struct PostalSymbology {
    kind: PostalKind,
}

impl PostalSymbology {
    /// Symbology for `kind`.
    pub fn new(kind: PostalKind) -> Self {
        Self { kind }
    }

    /// The encoded kind.
    pub fn kind(&self) -> PostalKind {
        self.kind
    }
}

impl Symbology for PostalSymbology {
    fn measure(&self, value: &str) -> Result<Rect> {
        let bars = self.kind.encode(value)?;
        Ok(PostalOptions::defaults(self.kind).natural(bars.len()))
    }

    fn build(&self, value: &str, width: f32, height: f32, style: &StyleParams) -> Result<Drawing> {
        let options = PostalOptions::from_style(self.kind, style)?;
        let bars = self.kind.encode(value)?;
        let natural = options.natural(bars.len());

        let mut shapes = Vec::with_capacity(bars.len() + 2);
        if let Some(background) = options.background {
            shapes.push(Shape::filled_rect(natural, background));
        }
        for (i, bar) in bars.iter().enumerate() {
            let bar_height = match bar {
                PostalBar::Full => options.bar_height,
                PostalBar::Short => options.bar_height * SHORT_BAR_RATIO,
                PostalBar::Gap => continue,
            };
            shapes.push(Shape::Rect {
                rect: Rect::new(i as f32 * options.pitch, 0.0, options.bar_width, bar_height),
                fill: Some(options.bar_fill),
                stroke: options.bar_stroke,
            });
        }
        if let Some(stroke) = options.outline {
            shapes.push(Shape::outlined_rect(natural, stroke));
        }

        log::trace!("{} '{}': {} bar positions, drawn {}x{}", self.kind, value, bars.len(), width, height);
        Ok(Drawing::fit(natural, width, height, shapes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleValue;

    fn assert_close(actual: f32, expected: f32) {
        assert!((actual - expected).abs() < 1e-3, "expected {} but got {}", expected, actual);
    }

    fn tall_pattern(bars: &[PostalBar]) -> String {
        bars.iter()
            .map(|bar| match bar {
                PostalBar::Full => '1',
                PostalBar::Short => '0',
                PostalBar::Gap => ' ',
            })
            .collect()
    }

    #[test]
    fn test_postnet_zip() {
        // 55555: digit sum 25, check digit 5
        let bars = PostalKind::Postnet.encode("55555").unwrap();
        assert_eq!(bars.len(), 2 + 6 * 5);
        assert_eq!(tall_pattern(&bars), format!("1{}1", "01010".repeat(6)));
    }

    #[test]
    fn test_postnet_zip_plus_four_ignores_separators() {
        let dashed = PostalKind::Postnet.encode("12345-6789").unwrap();
        let plain = PostalKind::Postnet.encode("123456789").unwrap();
        assert_eq!(dashed, plain);
        // digit sum 45, check digit 5
        assert_eq!(tall_pattern(&plain[plain.len() - 6..plain.len() - 1]), "01010");
    }

    #[test]
    fn test_postnet_rejects_bad_values() {
        assert!(matches!(PostalKind::Postnet.encode("1234"), Err(Error::Barcode(_))));
        assert!(matches!(PostalKind::Postnet.encode("1234A"), Err(Error::Barcode(_))));
    }

    #[test]
    fn test_fim_patterns() {
        let bars = PostalKind::Fim.encode("a").unwrap();
        assert_eq!(tall_pattern(&bars), "11  1  11");
        assert_eq!(tall_pattern(&PostalKind::Fim.encode("D").unwrap()), "111 1 111");
        assert!(PostalKind::Fim.encode("E").is_err());
        assert!(PostalKind::Fim.encode("AB").is_err());
    }

    #[test]
    fn test_measure_postnet() {
        let bounds = PostalSymbology::new(PostalKind::Postnet).measure("55555").unwrap();
        assert_eq!((bounds.x, bounds.y), (0.0, 0.0));
        assert_close(bounds.width, 31.0 * 0.0455 * INCH + 0.018 * INCH);
        assert_close(bounds.height, 9.0);
    }

    #[test]
    fn test_measure_fim() {
        let bounds = PostalSymbology::new(PostalKind::Fim).measure("C").unwrap();
        assert_close(bounds.width, 17.0 / 32.0 * INCH);
        assert_close(bounds.height, 45.0);
    }

    #[test]
    fn test_build_postnet_bar_heights() {
        let symbology = PostalSymbology::new(PostalKind::Postnet);
        let natural = symbology.measure("55555").unwrap();
        let drawing = symbology
            .build("55555", natural.width, natural.height, &StyleParams::baseline())
            .unwrap();
        assert!(drawing.is_untransformed());

        let heights: Vec<f32> = drawing
            .shapes
            .iter()
            .filter_map(|shape| match shape {
                Shape::Rect { rect, fill: Some(_), .. } => Some(rect.height),
                _ => None,
            })
            .collect();
        assert_eq!(heights.len(), 32);
        assert_eq!(heights.iter().filter(|h| **h == 9.0).count(), 2 + 12);
        assert!(heights.iter().all(|h| *h == 9.0 || (*h - 3.6).abs() < 1e-4));
    }

    #[test]
    fn test_build_fim_skips_gaps() {
        let drawing = PostalSymbology::new(PostalKind::Fim)
            .build("A", 40.0, 45.0, &StyleParams::baseline())
            .unwrap();
        assert_eq!(drawing.count_filled(Color::black()), 5);
        assert_eq!((drawing.width, drawing.height), (40.0, 45.0));
    }

    #[test]
    fn test_build_applies_style() {
        let blue = Color::new(0.0, 0.0, 1.0);
        let style = StyleParams::baseline()
            .with("fillColor", StyleValue::Color(blue))
            .with("background", StyleValue::Color(Color::white()))
            .with("strokeWidth", StyleValue::Length(0.5))
            .with("barHeight", StyleValue::Length(20.0));
        let drawing = PostalSymbology::new(PostalKind::Fim)
            .build("B", 50.0, 20.0, &style)
            .unwrap();
        assert!(matches!(drawing.shapes[0], Shape::Rect { fill: Some(c), .. } if c == Color::white()));
        assert_eq!(drawing.count_filled(blue), 6);
        assert!(matches!(
            drawing.shapes.last(),
            Some(Shape::Rect { fill: None, stroke: Some(_), .. })
        ));
        assert_close(drawing.transform[3], 1.0);
    }

    #[test]
    fn test_bar_width_keeps_gap() {
        let style = StyleParams::baseline().with("barWidth", StyleValue::Length(3.0));
        let options = PostalOptions::from_style(PostalKind::Fim, &style).unwrap();
        assert_close(options.pitch - options.bar_width, INCH / 32.0);
        assert!(PostalOptions::from_style(
            PostalKind::Fim,
            &StyleParams::baseline().with("barWidth", StyleValue::Length(0.0))
        )
        .is_err());
    }
}
