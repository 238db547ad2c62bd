//! PDF content stream builder.
//!
//! Builds PDF content streams containing graphics and text operators
//! according to PDF specification ISO 32000-1:2008 Section 8-9.

use super::object::{write_escaped, write_real};
use crate::color::Color;
use crate::error::Result;
use indexmap::IndexSet;
use std::io::Write;

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Set transformation matrix (cm)
    Transform(f32, f32, f32, f32, f32, f32),
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font resource and size (Tf)
    SetFont(String, f32),
    /// Set text matrix (Tm)
    SetTextMatrix(f32, f32, f32, f32, f32, f32),
    /// Show text (Tj) - literal string
    ShowText(String),
    /// Set fill color RGB (rg)
    SetFillColorRGB(f32, f32, f32),
    /// Set stroke color RGB (RG)
    SetStrokeColorRGB(f32, f32, f32),
    /// Set line width (w)
    SetLineWidth(f32),
    /// Rectangle (re)
    Rectangle(f32, f32, f32, f32),
    /// Stroke (S)
    Stroke,
    /// Fill (f)
    Fill,
    /// Fill and stroke (B)
    FillStroke,
}

/// Builder for PDF content streams.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    /// Operations in the stream
    operations: Vec<ContentStreamOp>,
    /// Current font resource
    current_font: Option<String>,
    /// Current font size
    current_font_size: f32,
    /// Whether we're in a text object
    in_text_object: bool,
    /// Font resources referenced by the stream
    fonts: IndexSet<String>,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Add multiple operations.
    pub fn ops(&mut self, ops: impl IntoIterator<Item = ContentStreamOp>) -> &mut Self {
        self.operations.extend(ops);
        self
    }

    /// Operations added so far.
    pub fn operations(&self) -> &[ContentStreamOp] {
        &self.operations
    }

    /// Font resource names referenced by `Tf` operators, in first-use order.
    pub fn fonts(&self) -> impl Iterator<Item = &str> {
        self.fonts.iter().map(String::as_str)
    }

    /// Save graphics state.
    pub fn save_state(&mut self) -> &mut Self {
        self.end_text();
        self.op(ContentStreamOp::SaveState)
    }

    /// Restore graphics state.
    ///
    /// Font selection is part of the graphics state, so it is forgotten.
    pub fn restore_state(&mut self) -> &mut Self {
        self.end_text();
        self.current_font = None;
        self.op(ContentStreamOp::RestoreState)
    }

    /// Concatenate a transformation matrix.
    pub fn transform(&mut self, m: [f32; 6]) -> &mut Self {
        self.op(ContentStreamOp::Transform(m[0], m[1], m[2], m[3], m[4], m[5]))
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
        }
        self
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Set font resource for text operations.
    pub fn set_font(&mut self, resource: &str, size: f32) -> &mut Self {
        if self.current_font.as_deref() != Some(resource) || self.current_font_size != size {
            self.op(ContentStreamOp::SetFont(resource.to_string(), size));
            self.current_font = Some(resource.to_string());
            self.current_font_size = size;
            self.fonts.insert(resource.to_string());
        }
        self
    }

    /// Add text at a position (literal string for Base-14 fonts).
    pub fn text(&mut self, text: &str, x: f32, y: f32) -> &mut Self {
        self.begin_text();
        self.op(ContentStreamOp::SetTextMatrix(1.0, 0.0, 0.0, 1.0, x, y));
        self.op(ContentStreamOp::ShowText(text.to_string()));
        self
    }

    /// Set fill color.
    pub fn fill_color(&mut self, color: Color) -> &mut Self {
        self.op(ContentStreamOp::SetFillColorRGB(color.r, color.g, color.b))
    }

    /// Set stroke color.
    pub fn stroke_color(&mut self, color: Color) -> &mut Self {
        self.op(ContentStreamOp::SetStrokeColorRGB(color.r, color.g, color.b))
    }

    /// Set line width.
    pub fn set_line_width(&mut self, width: f32) -> &mut Self {
        self.op(ContentStreamOp::SetLineWidth(width))
    }

    /// Add a rectangle to the current path.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.op(ContentStreamOp::Rectangle(x, y, width, height))
    }

    /// Stroke the current path.
    pub fn stroke(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Stroke)
    }

    /// Fill the current path.
    pub fn fill(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Fill)
    }

    /// Fill and stroke the current path.
    pub fn fill_stroke(&mut self) -> &mut Self {
        self.op(ContentStreamOp::FillStroke)
    }

    /// Build the content stream to bytes.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();

        for op in &self.operations {
            write_op(&mut buf, op)?;
            writeln!(buf)?;
        }

        Ok(buf)
    }
}

fn write_numbers<W: Write>(w: &mut W, values: &[f32]) -> std::io::Result<()> {
    for value in values {
        write_real(w, *value as f64)?;
        write!(w, " ")?;
    }
    Ok(())
}

/// Write a single operation.
fn write_op<W: Write>(w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
    match op {
        ContentStreamOp::SaveState => write!(w, "q"),
        ContentStreamOp::RestoreState => write!(w, "Q"),
        ContentStreamOp::Transform(a, b, c, d, e, f) => {
            write_numbers(w, &[*a, *b, *c, *d, *e, *f])?;
            write!(w, "cm")
        },
        ContentStreamOp::BeginText => write!(w, "BT"),
        ContentStreamOp::EndText => write!(w, "ET"),
        ContentStreamOp::SetFont(name, size) => {
            write!(w, "/{} ", name)?;
            write_numbers(w, &[*size])?;
            write!(w, "Tf")
        },
        ContentStreamOp::SetTextMatrix(a, b, c, d, e, f) => {
            write_numbers(w, &[*a, *b, *c, *d, *e, *f])?;
            write!(w, "Tm")
        },
        ContentStreamOp::ShowText(text) => {
            write!(w, "(")?;
            write_escaped(w, text.as_bytes())?;
            write!(w, ") Tj")
        },
        ContentStreamOp::SetFillColorRGB(r, g, b) => {
            write_numbers(w, &[*r, *g, *b])?;
            write!(w, "rg")
        },
        ContentStreamOp::SetStrokeColorRGB(r, g, b) => {
            write_numbers(w, &[*r, *g, *b])?;
            write!(w, "RG")
        },
        ContentStreamOp::SetLineWidth(width) => {
            write_numbers(w, &[*width])?;
            write!(w, "w")
        },
        ContentStreamOp::Rectangle(x, y, width, height) => {
            write_numbers(w, &[*x, *y, *width, *height])?;
            write!(w, "re")
        },
        ContentStreamOp::Stroke => write!(w, "S"),
        ContentStreamOp::Fill => write!(w, "f"),
        ContentStreamOp::FillStroke => write!(w, "B"),
    }
}
