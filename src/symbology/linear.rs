//! Linear (1D) symbologies backed by the `barcoders` crate.
//!
//! `barcoders` turns a value into a module sequence (`1` = bar, `0` = space);
//! the full-ASCII and MSI kinds use the encoders in [`tables`](super::tables).
//! This module lays that sequence out as vector bars:
//!
//! ```text
//!  ┌─────────┬──────────────────────────┬─────────┐
//!  │  quiet  │ ▌▌ ▌▌▌ ▌ ▌▌  bars  ▌▌ ▌ ▌ │  quiet  │  bar height
//!  │         ├──────────────────────────┤         │
//!  │         │   human-readable text    │         │  fontSize * 1.2
//!  └─────────┴──────────────────────────┴─────────┘
//! ```

use super::options::LinearOptions;
use super::{tables, Symbology};
use crate::drawing::{Drawing, Shape, Stroke, TextAnchor};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::style::StyleParams;
use crate::units::{INCH, MM};

/// Minimum bar height when none is given.
const MIN_BAR_HEIGHT: f32 = 0.25 * INCH;

/// Line height of the human-readable text relative to its font size.
const TEXT_LEADING: f32 = 1.2;

/// Linear symbologies in the standard catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinearKind {
    /// Code 128 (character set B unless selected by the value)
    Code128,
    /// Code 39 (alphanumeric)
    Standard39,
    /// Code 93 (alphanumeric, compact)
    Standard93,
    /// Interleaved 2 of 5 (numeric pairs)
    I2of5,
    /// Codabar (numeric with start/stop characters)
    Codabar,
    /// EAN-13 (12 or 13 digits)
    Ean13,
    /// EAN-8 (7 or 8 digits)
    Ean8,
    /// UPC-A (11 digits, or 12 with a check digit that must match)
    UpcA,
    /// Code 39 over full ASCII via shift pairs
    Extended39,
    /// Code 93 over full ASCII via shift characters
    Extended93,
    /// Code 11 (digits and `-`)
    Code11,
    /// MSI / modified Plessey (digits, modulo-10 check)
    Msi,
}

impl std::fmt::Display for LinearKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl LinearKind {
    /// Every linear kind, in catalog order.
    pub const ALL: [LinearKind; 12] = [
        LinearKind::Code128,
        LinearKind::Standard39,
        LinearKind::Standard93,
        LinearKind::I2of5,
        LinearKind::Codabar,
        LinearKind::Ean13,
        LinearKind::Ean8,
        LinearKind::UpcA,
        LinearKind::Extended39,
        LinearKind::Extended93,
        LinearKind::Code11,
        LinearKind::Msi,
    ];

    /// Markup name.
    pub fn name(&self) -> &'static str {
        match self {
            LinearKind::Code128 => "Code128",
            LinearKind::Standard39 => "Standard39",
            LinearKind::Standard93 => "Standard93",
            LinearKind::I2of5 => "I2of5",
            LinearKind::Codabar => "Codabar",
            LinearKind::Ean13 => "EAN13",
            LinearKind::Ean8 => "EAN8",
            LinearKind::UpcA => "UPCA",
            LinearKind::Extended39 => "Extended39",
            LinearKind::Extended93 => "Extended93",
            LinearKind::Code11 => "Code11",
            LinearKind::Msi => "MSI",
        }
    }

    fn is_retail(&self) -> bool {
        matches!(self, LinearKind::Ean13 | LinearKind::Ean8 | LinearKind::UpcA)
    }

    /// Default narrow module width in points.
    pub fn module_width(&self) -> f32 {
        if self.is_retail() {
            0.33 * MM
        } else {
            0.0075 * INCH
        }
    }

    /// Default human-readable font size in points.
    pub fn font_size(&self) -> f32 {
        if self.is_retail() {
            8.0
        } else {
            10.0
        }
    }

    /// Whether the value is printed beneath the bars by default.
    pub fn human_readable(&self) -> bool {
        self.is_retail()
    }

    /// Default bar height in points, if the symbology fixes one.
    fn standard_bar_height(&self) -> Option<f32> {
        match self {
            LinearKind::Ean13 | LinearKind::UpcA => Some(22.85 * MM),
            LinearKind::Ean8 => Some(18.23 * MM),
            _ => None,
        }
    }

    /// Standard quiet zones `(left, right)` in modules.
    fn quiet_modules(&self) -> (f32, f32) {
        match self {
            LinearKind::Ean13 | LinearKind::UpcA => (11.0, 7.0),
            LinearKind::Ean8 => (7.0, 7.0),
            _ => (10.0, 10.0),
        }
    }

    /// Encode `value` into modules.
    pub fn encode(&self, value: &str) -> Result<Vec<u8>> {
        use barcoders::sym::codabar::Codabar;
        use barcoders::sym::code11::Code11;
        use barcoders::sym::code128::Code128;
        use barcoders::sym::code39::Code39;
        use barcoders::sym::code93::Code93;
        use barcoders::sym::ean13::EAN13;
        use barcoders::sym::ean8::EAN8;
        use barcoders::sym::tf::TF;

        let encoded = match self {
            LinearKind::Code128 => {
                // \u{00C0} (À), \u{0181} (Ɓ), \u{0106} (Ć) select character set A, B, C
                let data = if value.starts_with('\u{00C0}')
                    || value.starts_with('\u{0181}')
                    || value.starts_with('\u{0106}')
                {
                    value.to_string()
                } else {
                    format!("\u{0181}{}", value)
                };
                Code128::new(&data)
                    .map_err(|e| Error::Barcode(format!("Code128 encoding error: {}", e)))?
                    .encode()
            },
            LinearKind::Standard39 => Code39::new(value)
                .map_err(|e| Error::Barcode(format!("Code39 encoding error: {}", e)))?
                .encode(),
            LinearKind::Standard93 => Code93::new(value)
                .map_err(|e| Error::Barcode(format!("Code93 encoding error: {}", e)))?
                .encode(),
            LinearKind::I2of5 => TF::interleaved(value)
                .map_err(|e| Error::Barcode(format!("I2of5 encoding error: {}", e)))?
                .encode(),
            LinearKind::Codabar => {
                let framed = if value.starts_with(|c: char| matches!(c, 'A'..='D')) {
                    value.to_string()
                } else {
                    format!("A{}A", value)
                };
                Codabar::new(&framed)
                    .map_err(|e| Error::Barcode(format!("Codabar encoding error: {}", e)))?
                    .encode()
            },
            LinearKind::Ean13 => EAN13::new(value)
                .map_err(|e| Error::Barcode(format!("EAN-13 encoding error: {}", e)))?
                .encode(),
            LinearKind::Ean8 => EAN8::new(value)
                .map_err(|e| Error::Barcode(format!("EAN-8 encoding error: {}", e)))?
                .encode(),
            LinearKind::UpcA => {
                // UPC-A is EAN-13 with a leading 0
                let digits = value.bytes().all(|b| b.is_ascii_digit());
                let data = match value.len() {
                    11 if digits => format!("0{}", value),
                    12 if digits => {
                        let expected = upca_check_digit(&value[..11]);
                        if value.as_bytes()[11] != expected {
                            return Err(Error::Barcode(format!(
                                "UPC-A check digit mismatch in '{}': expected {}",
                                value, expected as char
                            )));
                        }
                        format!("0{}", &value[..11])
                    },
                    _ => {
                        return Err(Error::Barcode("UPC-A requires 11 or 12 digits".to_string()));
                    },
                };
                EAN13::new(&data)
                    .map_err(|e| Error::Barcode(format!("UPC-A encoding error: {}", e)))?
                    .encode()
            },
            LinearKind::Extended39 => Code39::new(tables::extended39(value)?)
                .map_err(|e| Error::Barcode(format!("Extended39 encoding error: {}", e)))?
                .encode(),
            LinearKind::Extended93 => tables::extended93(value)?,
            LinearKind::Code11 => Code11::new(value)
                .map_err(|e| Error::Barcode(format!("Code11 encoding error: {}", e)))?
                .encode(),
            LinearKind::Msi => tables::msi(value)?,
        };

        if encoded.is_empty() {
            return Err(Error::Barcode(format!("{} produced no modules for '{}'", self, value)));
        }
        Ok(encoded)
    }
}

/// Check digit (as an ASCII byte) for 11 UPC-A data digits.
fn upca_check_digit(data: &str) -> u8 {
    let sum: u32 = data
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 0 {
                digit * 3
            } else {
                digit
            }
        })
        .sum();
    b'0' + ((10 - sum % 10) % 10) as u8
}

/// Horizontal and vertical placement of a linear symbol's parts.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    natural: Rect,
    left_quiet: f32,
    right_quiet: f32,
    bars_width: f32,
    bar_bottom: f32,
    bar_height: f32,
}

impl Layout {
    fn compute(kind: LinearKind, module_count: usize, options: &LinearOptions) -> Self {
        let module = options.bar_width;
        let (left_modules, right_modules) = kind.quiet_modules();
        let left_quiet = options.left_quiet.width(left_modules * module);
        let right_quiet = options.right_quiet.width(right_modules * module);
        let bars_width = module_count as f32 * module;

        let bar_height = options.bar_height.unwrap_or_else(|| {
            kind.standard_bar_height()
                .unwrap_or_else(|| MIN_BAR_HEIGHT.max(0.15 * bars_width))
        });
        let bar_bottom = if options.human_readable {
            options.font_size * TEXT_LEADING
        } else {
            0.0
        };

        Self {
            natural: Rect::new(0.0, 0.0, left_quiet + bars_width + right_quiet, bar_bottom + bar_height),
            left_quiet,
            right_quiet,
            bars_width,
            bar_bottom,
            bar_height,
        }
    }
}

/// A linear symbology from the standard set.
#[derive(Debug, Clone, Copy)]
pub struct LinearSymbology {
    kind: LinearKind,
}

impl LinearSymbology {
    /// Symbology for `kind`.
    pub fn new(kind: LinearKind) -> Self {
        Self { kind }
    }

    /// The encoded kind.
    pub fn kind(&self) -> LinearKind {
        self.kind
    }

    /// Natural bounds of `value` under explicit `options`.
    pub fn measure_with(&self, value: &str, options: &LinearOptions) -> Result<Rect> {
        let modules = self.kind.encode(value)?;
        Ok(Layout::compute(self.kind, modules.len(), options).natural)
    }

    /// Shapes of `value` under `options`, in natural coordinates.
    fn shapes(&self, value: &str, modules: &[u8], layout: &Layout, options: &LinearOptions) -> Vec<Shape> {
        let mut shapes = Vec::new();
        let module = options.bar_width;

        if let Some(background) = options.background {
            shapes.push(Shape::filled_rect(layout.natural, background));
        }

        // Adjacent bar modules merge into one rectangle
        let mut i = 0;
        while i < modules.len() {
            if modules[i] == 1 {
                let start = i;
                while i < modules.len() && modules[i] == 1 {
                    i += 1;
                }
                shapes.push(Shape::Rect {
                    rect: Rect::new(
                        layout.left_quiet + start as f32 * module,
                        layout.bar_bottom,
                        (i - start) as f32 * module,
                        layout.bar_height,
                    ),
                    fill: Some(options.bar_fill),
                    stroke: options.bar_stroke,
                });
            } else {
                i += 1;
            }
        }

        if options.human_readable {
            shapes.push(Shape::Text {
                x: layout.left_quiet + layout.bars_width / 2.0,
                y: options.font_size * 0.25,
                text: value.to_string(),
                font_name: options.font_name.clone(),
                font_size: options.font_size,
                color: options.text_color,
                anchor: TextAnchor::Middle,
            });
        }

        if options.debug {
            let guide = Stroke {
                color: options.bar_fill,
                width: module / 4.0,
            };
            let height = layout.natural.height;
            shapes.push(Shape::outlined_rect(Rect::new(0.0, 0.0, layout.left_quiet, height), guide));
            shapes.push(Shape::outlined_rect(
                Rect::new(layout.left_quiet + layout.bars_width, 0.0, layout.right_quiet, height),
                guide,
            ));
        }

        if let Some(outline) = options.outline {
            shapes.push(Shape::outlined_rect(layout.natural, outline));
        }

        shapes
    }
}

impl Symbology for LinearSymbology {
    fn measure(&self, value: &str) -> Result<Rect> {
        self.measure_with(value, &LinearOptions::defaults(self.kind))
    }

    fn build(&self, value: &str, width: f32, height: f32, style: &StyleParams) -> Result<Drawing> {
        let options = LinearOptions::from_style(self.kind, style)?;
        let modules = self.kind.encode(value)?;
        let layout = Layout::compute(self.kind, modules.len(), &options);
        let shapes = self.shapes(value, &modules, &layout, &options);

        log::trace!(
            "{} '{}': {} modules, natural {}x{}, drawn {}x{}",
            self.kind,
            value,
            modules.len(),
            layout.natural.width,
            layout.natural.height,
            width,
            height
        );
        Ok(Drawing::fit(layout.natural, width, height, shapes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::style::StyleValue;
    use crate::symbology::QuietZone;

    fn assert_close(actual: f32, expected: f32) {
        assert!((actual - expected).abs() < 1e-3, "expected {} but got {}", expected, actual);
    }

    #[test]
    fn test_encode_all_kinds() {
        let samples = [
            (LinearKind::Code128, "HELLO"),
            (LinearKind::Standard39, "ABC123"),
            (LinearKind::Standard93, "ABC123"),
            (LinearKind::I2of5, "123456"),
            (LinearKind::Codabar, "A40156B"),
            (LinearKind::Ean13, "5901234123457"),
            (LinearKind::Ean8, "9638507"),
            (LinearKind::UpcA, "03600029145"),
            (LinearKind::Extended39, "Ab-1"),
            (LinearKind::Extended93, "Ab-1"),
            (LinearKind::Code11, "123-45"),
            (LinearKind::Msi, "1234567"),
        ];
        for (kind, value) in samples {
            let modules = kind.encode(value).unwrap_or_else(|e| panic!("{}: {}", kind, e));
            assert!(modules.iter().any(|&m| m == 1), "{} has no bars", kind);
        }
    }

    #[test]
    fn test_ean13_module_count() {
        assert_eq!(LinearKind::Ean13.encode("5901234123457").unwrap().len(), 95);
    }

    #[test]
    fn test_code11_modules() {
        let modules: String = LinearKind::Code11
            .encode("123-45")
            .unwrap()
            .iter()
            .map(|m| if *m == 1 { '1' } else { '0' })
            .collect();
        assert_eq!(
            modules,
            "1011001011010110100101101100101010110101011011011011010110110101011001"
        );
    }

    #[test]
    fn test_extended_kinds_accept_lowercase() {
        assert!(LinearKind::Standard39.encode("abc").is_err());
        assert!(LinearKind::Extended39.encode("abc").is_ok());
        assert!(LinearKind::Standard93.encode("abc").is_err());
        assert!(LinearKind::Extended93.encode("abc").is_ok());
    }

    #[test]
    fn test_measure_msi() {
        let bounds = LinearSymbology::new(LinearKind::Msi).measure("1234567").unwrap();
        let module = 0.0075 * INCH;
        assert_close(bounds.width, (10.0 + 103.0 + 10.0) * module);
        assert_close(bounds.height, MIN_BAR_HEIGHT);
    }

    #[test]
    fn test_codabar_gets_start_stop() {
        assert!(LinearKind::Codabar.encode("40156").is_ok());
    }

    #[test]
    fn test_upca_length_check() {
        let err = LinearKind::UpcA.encode("123").unwrap_err();
        assert!(err.to_string().contains("UPC-A requires 11 or 12 digits"));
    }

    #[test]
    fn test_upca_check_digit() {
        assert_eq!(upca_check_digit("03600029145"), b'2');
        assert_eq!(
            LinearKind::UpcA.encode("036000291452").unwrap(),
            LinearKind::UpcA.encode("03600029145").unwrap()
        );
    }

    #[test]
    fn test_upca_rejects_wrong_check_digit() {
        match LinearKind::UpcA.encode("036000291459") {
            Err(Error::Barcode(message)) => assert!(message.contains("expected 2")),
            other => panic!("expected a check digit error, got {:?}", other.map(|m| m.len())),
        }
    }

    #[test]
    fn test_encoding_errors() {
        assert!(matches!(LinearKind::Ean13.encode("ABC"), Err(Error::Barcode(_))));
        assert!(matches!(LinearKind::I2of5.encode("12AB"), Err(Error::Barcode(_))));
    }

    #[test]
    fn test_measure_ean13() {
        let symbology = LinearSymbology::new(LinearKind::Ean13);
        let bounds = symbology.measure("5901234123457").unwrap();
        let module = 0.33 * MM;
        assert_eq!((bounds.x, bounds.y), (0.0, 0.0));
        assert_close(bounds.width, (11.0 + 95.0 + 7.0) * module);
        assert_close(bounds.height, 22.85 * MM + 8.0 * 1.2);
    }

    #[test]
    fn test_measure_code128_minimum_height() {
        let bounds = LinearSymbology::new(LinearKind::Code128).measure("HI").unwrap();
        assert!(bounds.has_area());
        assert_close(bounds.height, MIN_BAR_HEIGHT);
    }

    #[test]
    fn test_measure_without_quiet_zones() {
        let symbology = LinearSymbology::new(LinearKind::Code128);
        let with = symbology.measure("HELLO").unwrap();
        let options = LinearOptions::defaults(LinearKind::Code128).quiet(QuietZone::None);
        let without = symbology.measure_with("HELLO", &options).unwrap();
        assert_close(with.width - without.width, 20.0 * LinearKind::Code128.module_width());
    }

    #[test]
    fn test_build_fills_requested_box() {
        let symbology = LinearSymbology::new(LinearKind::Code128);
        let drawing = symbology.build("HELLO", 141.73, 28.35, &StyleParams::baseline()).unwrap();
        assert_eq!((drawing.width, drawing.height), (141.73, 28.35));

        let natural = symbology.measure("HELLO").unwrap();
        assert_close(drawing.transform[0], 141.73 / natural.width);
        assert_close(drawing.transform[3], 28.35 / natural.height);
    }

    #[test]
    fn test_build_merges_adjacent_bars() {
        let symbology = LinearSymbology::new(LinearKind::Code128);
        let modules = LinearKind::Code128.encode("HELLO").unwrap();
        let runs = modules
            .iter()
            .enumerate()
            .filter(|(i, &m)| m == 1 && (*i == 0 || modules[i - 1] == 0))
            .count();

        let drawing = symbology.build("HELLO", 100.0, 20.0, &StyleParams::baseline()).unwrap();
        assert_eq!(drawing.count_filled(Color::black()), runs);
        assert_eq!(drawing.texts().count(), 0);
    }

    #[test]
    fn test_build_retail_prints_value() {
        let symbology = LinearSymbology::new(LinearKind::Ean13);
        let drawing = symbology.build("5901234123457", 100.0, 60.0, &StyleParams::baseline()).unwrap();
        assert_eq!(drawing.texts().collect::<Vec<_>>(), vec!["5901234123457"]);
    }

    #[test]
    fn test_build_applies_colors() {
        let red = Color::new(1.0, 0.0, 0.0);
        let style = StyleParams::baseline()
            .with("barFillColor", StyleValue::Color(red))
            .with("background", StyleValue::Color(Color::white()));
        let drawing = LinearSymbology::new(LinearKind::Code128)
            .build("HELLO", 100.0, 20.0, &style)
            .unwrap();
        assert_eq!(drawing.count_filled(Color::black()), 0);
        assert!(drawing.count_filled(red) > 0);
        assert_eq!(drawing.count_filled(Color::white()), 1);
        assert!(matches!(drawing.shapes[0], Shape::Rect { fill: Some(c), .. } if c == Color::white()));
    }

    #[test]
    fn test_build_debug_guides_and_outline() {
        let style = StyleParams::baseline()
            .with("debug", StyleValue::Text("1".into()))
            .with("strokeColor", StyleValue::Color(Color::black()));
        let drawing = LinearSymbology::new(LinearKind::Code128)
            .build("HELLO", 100.0, 20.0, &style)
            .unwrap();
        let outlined = drawing
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::Rect { fill: None, stroke: Some(_), .. }))
            .count();
        assert_eq!(outlined, 3);
    }

    #[test]
    fn test_build_rejects_invalid_value() {
        let result = LinearSymbology::new(LinearKind::Ean8).build("NOPE", 10.0, 10.0, &StyleParams::baseline());
        assert!(matches!(result, Err(Error::Barcode(_))));
    }
}
