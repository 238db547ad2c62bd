//! PDF output for barcode drawings.
//!
//! ## Architecture
//!
//! ```text
//! Drawing (shapes + transform)
//!     ↓
//! [Canvas] (places a drawing at a page position)
//!     ↓
//! [ContentStreamBuilder] (operators → content stream bytes)
//!     ↓
//! [PdfWriter] (pages, fonts, xref, trailer)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```
//! use pdf_barcode::drawing::{Drawing, Shape};
//! use pdf_barcode::geometry::Rect;
//! use pdf_barcode::color::Color;
//! use pdf_barcode::writer::{Canvas, PdfWriter};
//!
//! let mut drawing = Drawing::new(20.0, 10.0);
//! drawing.push(Shape::filled_rect(Rect::new(0.0, 0.0, 2.0, 10.0), Color::black()));
//!
//! let mut writer = PdfWriter::new();
//! let mut page = writer.add_letter_page();
//! page.draw(&drawing, 72.0, 720.0, "").unwrap();
//! page.finish();
//! let bytes = writer.finish().unwrap();
//! assert!(bytes.starts_with(b"%PDF-1.7"));
//! ```

mod canvas;
mod content_stream;
mod fonts;
mod object;
mod pdf_writer;

pub use canvas::{boundary_flag, Canvas};
pub use content_stream::{ContentStreamBuilder, ContentStreamOp};
pub use fonts::{font_resource_name, FontMetrics, SimpleFontMetrics, BASE14_FONTS};
pub use object::{ObjectRef, ObjectSerializer, PdfObject};
pub use pdf_writer::{PageBuilder, PageSize, PdfWriter, PdfWriterConfig};
