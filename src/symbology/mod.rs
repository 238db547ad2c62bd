//! Barcode symbologies and the catalog that names them.
//!
//! A [`Symbology`] knows two things about a value: how big its symbol is
//! before any style is applied ([`measure`](Symbology::measure)), and how to
//! draw it into a box of a given size with a given style
//! ([`build`](Symbology::build)). Measuring and building are independent; a
//! value that measures fine may still be rejected by `build`.
//!
//! The [`SymbologyCatalog`] maps markup names such as `"Code128"` or
//! `"EAN13"` to symbologies. It is populated once and read-only afterwards.
//!
//! ## Standard symbologies
//!
//! | Name | Encoder |
//! |------|---------|
//! | `Code128` | Code 128, character set B unless the value selects one |
//! | `Standard39` | Code 39 |
//! | `Standard93` | Code 93 |
//! | `I2of5` | Interleaved 2 of 5 |
//! | `Codabar` | Codabar |
//! | `EAN13` | EAN-13 |
//! | `EAN8` | EAN-8 |
//! | `UPCA` | UPC-A |
//! | `Extended39` | Code 39, full ASCII |
//! | `Extended93` | Code 93, full ASCII |
//! | `Code11` | Code 11 |
//! | `MSI` | MSI (modified Plessey) |
//! | `POSTNET` | USPS POSTNET |
//! | `FIM` | USPS facing identification mark |
//! | `QR` | QR code, error correction level M |
//!
//! `USPS_4State` (Intelligent Mail) is not part of the standard set.

mod linear;
mod matrix;
mod options;
mod postal;
mod tables;

pub use linear::{LinearKind, LinearSymbology};
pub use matrix::QrSymbology;
pub use postal::{PostalBar, PostalKind, PostalSymbology};
pub use options::{LinearOptions, QuietZone};

use crate::drawing::Drawing;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::style::StyleParams;
use indexmap::IndexMap;

/// Name used when markup does not select a symbology.
pub const DEFAULT_SYMBOLOGY: &str = "Code128";

/// A barcode encoding scheme that can size and draw values.
pub trait Symbology: Send + Sync {
    /// Natural bounds `(x, y, width, height)` of `value` with default style.
    fn measure(&self, value: &str) -> Result<Rect>;

    /// Drawing of `value` filling `width` x `height`, styled by `style`.
    fn build(&self, value: &str, width: f32, height: f32, style: &StyleParams)
        -> Result<Drawing>;
}

/// Registry of symbologies by markup name.
#[derive(Default)]
pub struct SymbologyCatalog {
    entries: IndexMap<String, Box<dyn Symbology>>,
}

impl std::fmt::Debug for SymbologyCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbologyCatalog")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl SymbologyCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with every standard symbology registered.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for kind in LinearKind::ALL {
            catalog.register(kind.name(), LinearSymbology::new(kind));
        }
        for kind in PostalKind::ALL {
            catalog.register(kind.name(), PostalSymbology::new(kind));
        }
        catalog.register("QR", QrSymbology::new());
        log::debug!("Registered {} standard symbologies", catalog.len());
        catalog
    }

    /// Register `symbology` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, symbology: impl Symbology + 'static) -> &mut Self {
        self.entries.insert(name.into(), Box::new(symbology));
        self
    }

    /// Builder-style register.
    pub fn with(mut self, name: impl Into<String>, symbology: impl Symbology + 'static) -> Self {
        self.register(name, symbology);
        self
    }

    /// Find the symbology registered under `name` (exact match).
    pub fn lookup(&self, name: &str) -> Result<&dyn Symbology> {
        self.entries
            .get(name)
            .map(|s| &**s)
            .ok_or_else(|| Error::UnknownSymbology(name.to_string()))
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered symbologies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Natural bounds of `value` under symbology `name`.
    pub fn measure(&self, name: &str, value: &str) -> Result<Rect> {
        self.lookup(name)?.measure(value)
    }

    /// Drawing of `value` under symbology `name`.
    pub fn build(
        &self,
        name: &str,
        value: &str,
        width: f32,
        height: f32,
        style: &StyleParams,
    ) -> Result<Drawing> {
        self.lookup(name)?.build(value, width, height, style)
    }
}
