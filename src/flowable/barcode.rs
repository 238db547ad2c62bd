//! Absolutely positioned barcode flowable.
//!
//! Geometry comes from the element's `x`, `y`, `width` and `height`
//! attributes. A missing or zero `width`/`height` falls back to the natural
//! size the symbology reports for the value. The symbology is chosen by the
//! `code` attribute (`Code128` when absent).
//!
//! Style attributes are read again on every draw, so changes made to the
//! element through [`BarcodeFlowable::node_mut`] show up in later draws.
//! Geometry does not change after construction.
//!
//! # Example
//!
//! ```
//! use pdf_barcode::elements::AttributeMap;
//! use pdf_barcode::flowable::{BarcodeFlowable, Flowable};
//! use pdf_barcode::RenderContext;
//!
//! let ctx = RenderContext::new();
//! let node = AttributeMap::new()
//!     .with("x", "1cm")
//!     .with("y", "2cm")
//!     .with("width", "50mm")
//!     .with("height", "10mm");
//! let barcode = BarcodeFlowable::new(node, "HELLO", &ctx).unwrap();
//! assert_eq!(barcode.code_name(), "Code128");
//! let (width, height) = barcode.wrap(0.0, 0.0);
//! assert!((width - 141.732).abs() < 1e-3);
//! assert!((height - 28.346).abs() < 1e-3);
//! ```

use super::Flowable;
use crate::config::RenderContext;
use crate::elements::SourceElement;
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::style::StyleParams;
use crate::symbology::DEFAULT_SYMBOLOGY;
use crate::units::UnitParser;
use crate::writer::Canvas;

/// Symbology name selected by `node`: its `code` attribute, or `Code128`
/// when that is absent or empty. The name is not normalized.
pub fn resolve_code_name<E: SourceElement + ?Sized>(node: &E) -> String {
    match node.get_attribute("code") {
        "" => DEFAULT_SYMBOLOGY.to_string(),
        code => code.to_string(),
    }
}

/// Length attribute `name`, or `None` when absent or empty.
fn length_attribute<E: SourceElement + ?Sized>(
    node: &E,
    name: &str,
    units: &dyn UnitParser,
) -> Result<Option<f32>> {
    match node.get_attribute(name) {
        "" => Ok(None),
        raw => units.parse_length(raw).map(Some),
    }
}

/// A barcode placed at a fixed page position.
#[derive(Debug, Clone)]
pub struct BarcodeFlowable<E: SourceElement> {
    node: E,
    position: Point,
    width: f32,
    height: f32,
    code_name: String,
    value: String,
}

impl<E: SourceElement> BarcodeFlowable<E> {
    /// Resolve geometry and symbology for `value` encoded as described by
    /// `node`.
    ///
    /// # Errors
    ///
    /// Malformed lengths, an unknown symbology (only when a natural size is
    /// needed), or a value the symbology cannot measure.
    pub fn new(node: E, value: impl Into<String>, ctx: &RenderContext) -> Result<Self> {
        let value = value.into();
        let units = ctx.units();

        let x = length_attribute(&node, "x", units)?.unwrap_or(0.0);
        let y = length_attribute(&node, "y", units)?.unwrap_or(0.0);
        let width = length_attribute(&node, "width", units)?.filter(|w| *w != 0.0);
        let height = length_attribute(&node, "height", units)?.filter(|h| *h != 0.0);
        let code_name = resolve_code_name(&node);

        let mut natural: Option<Rect> = None;
        let mut natural_bounds = || -> Result<Rect> {
            if let Some(bounds) = natural {
                return Ok(bounds);
            }
            let bounds = ctx.catalog().measure(&code_name, &value)?;
            log::debug!("Measured {} '{}': {}x{}", code_name, value, bounds.width, bounds.height);
            natural = Some(bounds);
            Ok(bounds)
        };

        let width = match width {
            Some(w) => w,
            None => natural_bounds()?.width,
        };
        let height = match height {
            Some(h) => h,
            None => natural_bounds()?.height,
        };

        log::debug!(
            "Barcode {} '{}' at ({}, {}) size {}x{}",
            code_name,
            value,
            x,
            y,
            width,
            height
        );

        Ok(Self {
            node,
            position: Point::new(x, y),
            width,
            height,
            code_name,
            value,
        })
    }

    /// Lower-left corner on the page, in points.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Drawn width in points.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Drawn height in points.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Page rectangle covered by the barcode.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    /// Selected symbology name.
    pub fn code_name(&self) -> &str {
        &self.code_name
    }

    /// Encoded value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Source element.
    pub fn node(&self) -> &E {
        &self.node
    }

    /// Mutable source element; style changes apply to later draws.
    pub fn node_mut(&mut self) -> &mut E {
        &mut self.node
    }

    /// Style parameters as they would be passed to the symbology right now.
    pub fn style(&self, ctx: &RenderContext) -> Result<StyleParams> {
        StyleParams::collect(&self.node, ctx.units(), ctx.colors())
    }
}

impl<E: SourceElement> Flowable for BarcodeFlowable<E> {
    fn wrap(&self, _avail_width: f32, _avail_height: f32) -> (f32, f32) {
        (self.width, self.height)
    }

    fn draw(&self, canvas: &mut dyn Canvas, ctx: &RenderContext) -> Result<()> {
        let style = self.style(ctx)?;
        let drawing = ctx
            .catalog()
            .build(&self.code_name, &self.value, self.width, self.height, &style)?;
        log::trace!(
            "Drawing {} '{}' with {} shapes at ({}, {})",
            self.code_name,
            self.value,
            drawing.shapes.len(),
            self.position.x,
            self.position.y
        );
        canvas.draw(
            &drawing,
            self.position.x,
            self.position.y,
            self.node.get_attribute("showBoundary"),
        )
    }

    fn debug_name(&self) -> &'static str {
        "BarcodeFlowable"
    }
}
