//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer.

use super::canvas::Canvas;
use super::content_stream::ContentStreamBuilder;
use super::fonts::base_font_for_resource;
use super::object::{ObjectSerializer, PdfObject};
use crate::drawing::Drawing;
use crate::error::{Error, Result};
use indexmap::{IndexMap, IndexSet};
use std::io::Write;
use std::str::FromStr;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Whether to compress streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            author: None,
            subject: None,
            creator: Some("pdf_barcode".to_string()),
            compress: true,
        }
    }
}

impl PdfWriterConfig {
    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set document subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Enable or disable stream compression.
    ///
    /// When enabled, content streams are compressed using FlateDecode.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Standard page sizes in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageSize {
    /// US Letter (8.5" x 11")
    Letter,
    /// A4 (210mm x 297mm)
    A4,
    /// Explicit width and height
    Custom(f32, f32),
}

impl PageSize {
    /// `(width, height)` in points.
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.0, 842.0),
            PageSize::Custom(w, h) => (*w, *h),
        }
    }
}

impl FromStr for PageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "letter" => Ok(PageSize::Letter),
            "a4" => Ok(PageSize::A4),
            _ => Err(Error::InvalidStyle {
                name: "page-size".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Compress data using Flate/Deflate compression.
fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// A page being built.
pub struct PageBuilder<'a> {
    writer: &'a mut PdfWriter,
    page_index: usize,
}

impl<'a> PageBuilder<'a> {
    fn content(&mut self) -> &mut ContentStreamBuilder {
        &mut self.writer.pages[self.page_index].content_builder
    }

    /// Page `(width, height)` in points.
    pub fn size(&self) -> (f32, f32) {
        let page = &self.writer.pages[self.page_index];
        (page.width, page.height)
    }

    /// Finish building this page and return to the writer.
    pub fn finish(mut self) -> &'a mut PdfWriter {
        self.content().end_text();
        self.writer
    }
}

impl Canvas for PageBuilder<'_> {
    fn draw(&mut self, drawing: &Drawing, x: f32, y: f32, show_boundary: &str) -> Result<()> {
        self.content().draw(drawing, x, y, show_boundary)
    }
}

/// Internal page data.
struct PageData {
    width: f32,
    height: f32,
    content_builder: ContentStreamBuilder,
}

/// PDF document writer.
///
/// Builds a complete PDF document with pages, fonts, and content.
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
    /// Object ID counter
    next_obj_id: u32,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            next_obj_id: 1,
        }
    }

    /// Allocate a new object ID.
    fn alloc_obj_id(&mut self) -> u32 {
        let id = self.next_obj_id;
        self.next_obj_id += 1;
        id
    }

    /// Number of pages added.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Add a page with the given dimensions.
    pub fn add_page(&mut self, width: f32, height: f32) -> PageBuilder<'_> {
        let page_index = self.pages.len();
        self.pages.push(PageData {
            width,
            height,
            content_builder: ContentStreamBuilder::new(),
        });
        PageBuilder {
            writer: self,
            page_index,
        }
    }

    /// Add a page of a standard size.
    pub fn add_sized_page(&mut self, size: PageSize) -> PageBuilder<'_> {
        let (width, height) = size.dimensions();
        self.add_page(width, height)
    }

    /// Add a US Letter sized page (8.5" x 11").
    pub fn add_letter_page(&mut self) -> PageBuilder<'_> {
        self.add_sized_page(PageSize::Letter)
    }

    /// Add an A4 sized page (210mm x 297mm).
    pub fn add_a4_page(&mut self) -> PageBuilder<'_> {
        self.add_sized_page(PageSize::A4)
    }

    /// Build the complete PDF document.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let serializer = ObjectSerializer::new();
        let mut output = Vec::new();
        let mut xref_offsets: Vec<(u32, usize)> = Vec::new();

        // PDF Header
        writeln!(output, "%PDF-{}", self.config.version)?;
        // Binary marker (recommended for binary content)
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let catalog_id = self.alloc_obj_id();
        let pages_id = self.alloc_obj_id();

        // One font object per base-14 font referenced on any page
        let used_fonts: IndexSet<String> = self
            .pages
            .iter()
            .flat_map(|page| page.content_builder.fonts().map(str::to_string))
            .collect();
        let mut font_objects: Vec<(u32, PdfObject)> = Vec::new();
        let mut font_resources: IndexMap<String, PdfObject> = IndexMap::new();
        for resource in &used_fonts {
            let base_font = base_font_for_resource(resource).ok_or_else(|| Error::InvalidStyle {
                name: "fontName".to_string(),
                value: resource.clone(),
            })?;
            let font_id = self.alloc_obj_id();
            font_objects.push((
                font_id,
                PdfObject::dict(vec![
                    ("Type", PdfObject::name("Font")),
                    ("Subtype", PdfObject::name("Type1")),
                    ("BaseFont", PdfObject::name(base_font)),
                    ("Encoding", PdfObject::name("WinAnsiEncoding")),
                ]),
            ));
            font_resources.insert(resource.clone(), PdfObject::reference(font_id));
        }

        let mut page_refs: Vec<PdfObject> = Vec::new();
        let mut page_objects: Vec<(u32, PdfObject)> = Vec::new();
        let page_count = self.pages.len();
        for i in 0..page_count {
            let page_id = self.alloc_obj_id();
            let content_id = self.alloc_obj_id();
            let page_data = &self.pages[i];

            let raw_content = page_data.content_builder.build()?;
            let mut content_dict = IndexMap::new();
            let content_bytes = if self.config.compress {
                content_dict.insert("Filter".to_string(), PdfObject::name("FlateDecode"));
                compress_data(&raw_content)?
            } else {
                raw_content
            };

            let page_obj = PdfObject::dict(vec![
                ("Type", PdfObject::name("Page")),
                ("Parent", PdfObject::reference(pages_id)),
                (
                    "MediaBox",
                    PdfObject::rect(0.0, 0.0, page_data.width as f64, page_data.height as f64),
                ),
                ("Contents", PdfObject::reference(content_id)),
                (
                    "Resources",
                    PdfObject::dict(vec![("Font", PdfObject::Dictionary(font_resources.clone()))]),
                ),
            ]);

            page_refs.push(PdfObject::reference(page_id));
            page_objects.push((page_id, page_obj));
            page_objects.push((
                content_id,
                PdfObject::Stream {
                    dict: content_dict,
                    data: content_bytes,
                },
            ));
        }

        let pages_obj = PdfObject::dict(vec![
            ("Type", PdfObject::name("Pages")),
            ("Kids", PdfObject::Array(page_refs)),
            ("Count", PdfObject::Integer(page_count as i64)),
        ]);

        let catalog_obj = PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::reference(pages_id)),
        ]);

        let info_id = self.alloc_obj_id();
        let mut info_entries = Vec::new();
        if let Some(title) = &self.config.title {
            info_entries.push(("Title", PdfObject::string(title)));
        }
        if let Some(author) = &self.config.author {
            info_entries.push(("Author", PdfObject::string(author)));
        }
        if let Some(subject) = &self.config.subject {
            info_entries.push(("Subject", PdfObject::string(subject)));
        }
        if let Some(creator) = &self.config.creator {
            info_entries.push(("Creator", PdfObject::string(creator)));
        }
        let info_obj = PdfObject::dict(info_entries);

        let body = [(catalog_id, &catalog_obj), (pages_id, &pages_obj)]
            .into_iter()
            .chain(font_objects.iter().map(|(id, obj)| (*id, obj)))
            .chain(page_objects.iter().map(|(id, obj)| (*id, obj)))
            .chain(std::iter::once((info_id, &info_obj)));
        for (id, obj) in body {
            xref_offsets.push((id, output.len()));
            output.extend_from_slice(&serializer.serialize_indirect(id, obj)?);
        }

        // Write xref table
        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", self.next_obj_id)?;
        writeln!(output, "0000000000 65535 f ")?;
        xref_offsets.sort_by_key(|(id, _)| *id);
        for (_, offset) in &xref_offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        let trailer = PdfObject::dict(vec![
            ("Size", PdfObject::Integer(self.next_obj_id as i64)),
            ("Root", PdfObject::reference(catalog_id)),
            ("Info", PdfObject::reference(info_id)),
        ]);

        writeln!(output, "trailer")?;
        output.extend_from_slice(&serializer.serialize(&trailer)?);
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;

        log::debug!("Wrote PDF with {} pages, {} bytes", page_count, output.len());
        Ok(output)
    }

    /// Save the PDF to a file.
    pub fn save(self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.finish()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
