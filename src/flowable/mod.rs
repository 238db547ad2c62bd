//! Flowables: page content that reports its size and draws itself.
//!
//! A flowable is asked for the space it needs ([`Flowable::wrap`]) and is
//! then drawn onto a [`Canvas`]. Barcode flowables are absolutely
//! positioned, so they carry their own page coordinates and ignore the space
//! they are offered.

mod barcode;

pub use barcode::{resolve_code_name, BarcodeFlowable};

use crate::config::RenderContext;
use crate::error::Result;
use crate::writer::Canvas;

/// Content that can be sized and drawn onto a page.
pub trait Flowable {
    /// Size `(width, height)` this flowable occupies given the available
    /// space.
    fn wrap(&self, avail_width: f32, avail_height: f32) -> (f32, f32);

    /// Draw onto `canvas` using the collaborators in `ctx`.
    fn draw(&self, canvas: &mut dyn Canvas, ctx: &RenderContext) -> Result<()>;

    /// Short name for logs.
    fn debug_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
