//! Page canvas: where drawings are placed.

use super::content_stream::ContentStreamBuilder;
use super::fonts::{font_resource_name, FontMetrics, SimpleFontMetrics};
use crate::color::Color;
use crate::drawing::{Drawing, Shape, TextAnchor};
use crate::error::Result;
use crate::style::parse_flag;

/// A surface that accepts drawings at absolute page positions.
pub trait Canvas {
    /// Render `drawing` with its lower-left corner at `(x, y)`.
    ///
    /// `show_boundary` is the raw boundary flag from markup, read with
    /// [`boundary_flag`]; a true value outlines the drawing's box.
    fn draw(&mut self, drawing: &Drawing, x: f32, y: f32, show_boundary: &str) -> Result<()>;
}

/// Interpret a raw `showBoundary` value.
///
/// Empty and the false words (`0`, `false`, `no`, `off`) hide the boundary.
/// Any other non-empty value shows it.
pub fn boundary_flag(raw: &str) -> bool {
    parse_flag(raw).unwrap_or(true)
}

impl Canvas for ContentStreamBuilder {
    fn draw(&mut self, drawing: &Drawing, x: f32, y: f32, show_boundary: &str) -> Result<()> {
        let show_boundary = boundary_flag(show_boundary);

        // Resolve every font before emitting anything
        let resources = drawing
            .shapes
            .iter()
            .filter_map(|shape| match shape {
                Shape::Text { font_name, .. } => Some(font_resource_name(font_name)),
                _ => None,
            })
            .collect::<Result<Vec<_>>>()?;
        let mut resources = resources.into_iter();

        self.save_state();
        self.transform([1.0, 0.0, 0.0, 1.0, x, y]);

        if show_boundary {
            self.stroke_color(Color::black())
                .set_line_width(1.0)
                .rect(0.0, 0.0, drawing.width, drawing.height)
                .stroke();
        }

        if !drawing.is_untransformed() {
            self.transform(drawing.transform);
        }

        for shape in &drawing.shapes {
            match shape {
                Shape::Rect { rect, fill, stroke } => {
                    if let Some(color) = fill {
                        self.fill_color(*color);
                    }
                    if let Some(stroke) = stroke {
                        self.stroke_color(stroke.color).set_line_width(stroke.width);
                    }
                    match (fill.is_some(), stroke.is_some()) {
                        (true, true) => {
                            self.rect(rect.x, rect.y, rect.width, rect.height).fill_stroke();
                        },
                        (true, false) => {
                            self.rect(rect.x, rect.y, rect.width, rect.height).fill();
                        },
                        (false, true) => {
                            self.rect(rect.x, rect.y, rect.width, rect.height).stroke();
                        },
                        (false, false) => {},
                    }
                },
                Shape::Text {
                    x,
                    y,
                    text,
                    font_name,
                    font_size,
                    color,
                    anchor,
                } => {
                    let Some(resource) = resources.next() else {
                        continue;
                    };
                    let width = SimpleFontMetrics::for_font(font_name).text_width(text, *font_size);
                    let start = match anchor {
                        TextAnchor::Start => *x,
                        TextAnchor::Middle => x - width / 2.0,
                        TextAnchor::End => x - width,
                    };
                    self.fill_color(*color)
                        .set_font(&resource, *font_size)
                        .text(text, start, *y)
                        .end_text();
                },
            }
        }

        self.restore_state();
        log::trace!("Placed {} shapes at ({}, {})", drawing.shapes.len(), x, y);
        Ok(())
    }
}
