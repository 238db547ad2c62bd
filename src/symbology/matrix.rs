//! QR code symbology backed by the `qrcode` crate.

use super::options::outline;
use super::Symbology;
use crate::color::Color;
use crate::drawing::{Drawing, Shape};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::style::StyleParams;
use qrcode::{EcLevel, QrCode};

/// Natural module size in points.
pub const QR_MODULE_SIZE: f32 = 2.0;

/// Quiet zone in modules, per side.
const QUIET_MODULES: usize = 4;

/// QR code at error correction level M.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrSymbology;

impl QrSymbology {
    /// QR symbology with the standard module size.
    pub fn new() -> Self {
        Self
    }

    fn encode(value: &str) -> Result<QrCode> {
        QrCode::with_error_correction_level(value.as_bytes(), EcLevel::M)
            .map_err(|e| Error::Barcode(format!("QR code encoding error: {}", e)))
    }
}

impl Symbology for QrSymbology {
    fn measure(&self, value: &str) -> Result<Rect> {
        let code = Self::encode(value)?;
        let side = (code.width() + 2 * QUIET_MODULES) as f32 * QR_MODULE_SIZE;
        Ok(Rect::new(0.0, 0.0, side, side))
    }

    fn build(&self, value: &str, width: f32, height: f32, style: &StyleParams) -> Result<Drawing> {
        let code = Self::encode(value)?;
        let size = code.width();
        let quiet = match style.flag("quiet")? {
            Some(false) => 0,
            _ => QUIET_MODULES,
        };
        let side = (size + 2 * quiet) as f32 * QR_MODULE_SIZE;
        let natural = Rect::new(0.0, 0.0, side, side);

        let fill = style.color("fillColor")?;
        let dark = style.color("barFillColor")?.or(fill).unwrap_or_else(Color::black);

        let mut shapes = Vec::new();
        if let Some(background) = style.color("background")? {
            shapes.push(Shape::filled_rect(natural, background));
        }

        // Row 0 is the top row; runs of dark modules in a row merge
        let colors = code.to_colors();
        for (row, modules) in colors.chunks(size).enumerate() {
            let y = (quiet + size - 1 - row) as f32 * QR_MODULE_SIZE;
            let mut col = 0;
            while col < modules.len() {
                if modules[col] == qrcode::Color::Dark {
                    let start = col;
                    while col < modules.len() && modules[col] == qrcode::Color::Dark {
                        col += 1;
                    }
                    shapes.push(Shape::filled_rect(
                        Rect::new(
                            (quiet + start) as f32 * QR_MODULE_SIZE,
                            y,
                            (col - start) as f32 * QR_MODULE_SIZE,
                            QR_MODULE_SIZE,
                        ),
                        dark,
                    ));
                } else {
                    col += 1;
                }
            }
        }

        if let Some(stroke) = outline(style)? {
            shapes.push(Shape::outlined_rect(natural, stroke));
        }

        log::trace!("QR '{}': {}x{} modules, {} shapes", value, size, size, shapes.len());
        Ok(Drawing::fit(natural, width, height, shapes))
    }
}
