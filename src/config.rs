//! Rendering configuration shared by every barcode flowable.

use crate::color::{ColorResolver, StandardColors};
use crate::symbology::SymbologyCatalog;
use crate::units::{StandardUnits, UnitParser};

/// Collaborators used to resolve and draw barcode elements.
///
/// Built once and passed by reference; nothing in it changes after
/// construction, so one context can serve any number of elements.
pub struct RenderContext {
    /// Symbology registry.
    catalog: SymbologyCatalog,

    /// Length parser for geometry and length-valued style attributes.
    units: Box<dyn UnitParser>,

    /// Color parser for color-valued style attributes.
    colors: Box<dyn ColorResolver>,
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderContext {
    /// Create a context with the standard catalog, units and colors.
    pub fn new() -> Self {
        Self {
            catalog: SymbologyCatalog::standard(),
            units: Box::new(StandardUnits::new()),
            colors: Box::new(StandardColors::new()),
        }
    }

    /// Replace the symbology catalog.
    pub fn with_catalog(mut self, catalog: SymbologyCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replace the unit parser.
    pub fn with_units(mut self, units: impl UnitParser + 'static) -> Self {
        self.units = Box::new(units);
        self
    }

    /// Replace the color resolver.
    pub fn with_colors(mut self, colors: impl ColorResolver + 'static) -> Self {
        self.colors = Box::new(colors);
        self
    }

    /// Symbology registry.
    pub fn catalog(&self) -> &SymbologyCatalog {
        &self.catalog
    }

    /// Unit parser.
    pub fn units(&self) -> &dyn UnitParser {
        self.units.as_ref()
    }

    /// Color resolver.
    pub fn colors(&self) -> &dyn ColorResolver {
        self.colors.as_ref()
    }
}
