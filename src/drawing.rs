//! Vector drawings produced by symbologies.
//!
//! A [`Drawing`] is a fixed-size box of shapes. Shapes are laid out in the
//! symbology's natural coordinate system; the drawing's `transform` maps them
//! onto the `width` x `height` box the drawing was requested at.

use crate::color::Color;
use crate::geometry::Rect;
use serde::Serialize;

/// Outline applied to a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    /// Line color
    pub color: Color,
    /// Line width in natural units
    pub width: f32,
}

/// Horizontal anchor of a text shape relative to its x position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    /// x is the left edge
    #[default]
    Start,
    /// x is the center
    Middle,
    /// x is the right edge
    End,
}

/// A primitive in a drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// Axis-aligned rectangle
    Rect {
        /// Geometry
        rect: Rect,
        /// Fill color, if filled
        fill: Option<Color>,
        /// Outline, if stroked
        stroke: Option<Stroke>,
    },
    /// Single line of text; `y` is the baseline
    Text {
        /// Anchor x
        x: f32,
        /// Baseline y
        y: f32,
        /// Text content
        text: String,
        /// Base-14 font name
        font_name: String,
        /// Font size in natural units
        font_size: f32,
        /// Fill color
        color: Color,
        /// Horizontal anchor
        anchor: TextAnchor,
    },
}

impl Shape {
    /// Filled rectangle without outline.
    pub fn filled_rect(rect: Rect, fill: Color) -> Self {
        Shape::Rect {
            rect,
            fill: Some(fill),
            stroke: None,
        }
    }

    /// Outlined rectangle without fill.
    pub fn outlined_rect(rect: Rect, stroke: Stroke) -> Self {
        Shape::Rect {
            rect,
            fill: None,
            stroke: Some(stroke),
        }
    }
}

/// A sized, renderable group of shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Drawing {
    /// Rendered width in points
    pub width: f32,
    /// Rendered height in points
    pub height: f32,
    /// Affine map `[a b c d e f]` from shape space into the drawing box
    pub transform: [f32; 6],
    /// Shapes in paint order
    pub shapes: Vec<Shape>,
}

impl Drawing {
    /// Empty drawing whose shapes are already in drawing space.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            transform: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            shapes: Vec::new(),
        }
    }

    /// Drawing of `width` x `height` showing the `natural` box of `shapes`
    /// stretched to fill it.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_barcode::drawing::Drawing;
    /// use pdf_barcode::geometry::Rect;
    ///
    /// let drawing = Drawing::fit(Rect::new(0.0, 0.0, 50.0, 10.0), 100.0, 30.0, Vec::new());
    /// assert_eq!(drawing.transform, [2.0, 0.0, 0.0, 3.0, 0.0, 0.0]);
    /// ```
    pub fn fit(natural: Rect, width: f32, height: f32, shapes: Vec<Shape>) -> Self {
        let (sx, sy) = natural.scale_to(width, height);
        Self {
            width,
            height,
            transform: [sx, 0.0, 0.0, sy, -natural.x * sx, -natural.y * sy],
            shapes,
        }
    }

    /// Append a shape.
    pub fn push(&mut self, shape: Shape) -> &mut Self {
        self.shapes.push(shape);
        self
    }

    /// Whether the transform is the identity.
    pub fn is_untransformed(&self) -> bool {
        self.transform == [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]
    }

    /// Bounding box of the drawing at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Number of filled rectangles painted with `color`.
    pub fn count_filled(&self, color: Color) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Rect { fill: Some(c), .. } if *c == color))
            .count()
    }

    /// Text strings in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
