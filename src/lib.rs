// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::enum_variant_names)]
#![allow(clippy::new_without_default)]

//! # PDF Barcode
//!
//! Barcode flowables for PDF pages: a markup element describes where a
//! barcode goes and how it looks, and the flowable turns it into vector
//! drawing operations at that position.
//!
//! ## Core Features
//!
//! - **Geometry resolution**: explicit `width`/`height` in any markup unit
//!   (`in`, `cm`, `mm`, `pt`, `px`), or the symbology's natural size
//! - **Symbology catalog**: Code 128, Code 39, Code 93, Interleaved 2 of 5,
//!   Codabar, EAN-13, EAN-8, UPC-A, full-ASCII Code 39/93, Code 11, MSI,
//!   POSTNET, FIM and QR, looked up by markup name
//! - **Style collection**: colors, lengths and flags read from markup on
//!   every draw
//! - **PDF output**: vector bars written straight into content streams
//!
//! ## Quick Start
//!
//! ```
//! use pdf_barcode::elements::XmlElement;
//! use pdf_barcode::flowable::{BarcodeFlowable, Flowable};
//! use pdf_barcode::writer::PdfWriter;
//! use pdf_barcode::RenderContext;
//!
//! # fn main() -> pdf_barcode::Result<()> {
//! let ctx = RenderContext::new();
//! let node = XmlElement::parse(
//!     r#"<barCode x="2cm" y="25cm" code="EAN13" barFillColor="navy">5901234123457</barCode>"#,
//! )?;
//! let value = node.text().to_string();
//! let barcode = BarcodeFlowable::new(node, value, &ctx)?;
//!
//! let mut writer = PdfWriter::new();
//! let mut page = writer.add_a4_page();
//! barcode.draw(&mut page, &ctx)?;
//! page.finish();
//! let pdf = writer.finish()?;
//! assert!(pdf.starts_with(b"%PDF"));
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Markup input
pub mod elements;
pub mod units;
pub mod color;
pub mod style;

// Geometry and drawings
pub mod geometry;
pub mod drawing;

// Symbologies
pub mod symbology;

// Flowables
pub mod flowable;

// PDF output
pub mod writer;

// Configuration
pub mod config;

pub use config::RenderContext;
pub use error::{Error, Result};
pub use flowable::{BarcodeFlowable, Flowable};
pub use symbology::{Symbology, SymbologyCatalog};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
